use std::env;

#[derive(Clone, Debug, PartialEq)]
pub enum StorageBackend {
    Sqlite,
    File,
    Memory,
}

impl StorageBackend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Some(StorageBackend::Sqlite),
            "file" => Some(StorageBackend::File),
            "memory" => Some(StorageBackend::Memory),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub storage_backend: StorageBackend,
    pub database_url: String,
    pub data_dir: String,
    pub admin_token: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(raw) => StorageBackend::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown STORAGE_BACKEND, using sqlite");
                StorageBackend::Sqlite
            }),
            Err(_) => StorageBackend::Sqlite,
        };

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            storage_backend,
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "ayursutra.db".to_string()),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_storage_backend() {
        assert_eq!(StorageBackend::parse("SQLite"), Some(StorageBackend::Sqlite));
        assert_eq!(StorageBackend::parse(" file "), Some(StorageBackend::File));
        assert_eq!(StorageBackend::parse("memory"), Some(StorageBackend::Memory));
        assert_eq!(StorageBackend::parse("redis"), None);
    }
}
