use rusqlite::Connection;

use super::StorageMedium;
use crate::db::{self, queries};

pub struct SqliteMedium {
    conn: Connection,
}

impl SqliteMedium {
    pub fn open(path: &str) -> anyhow::Result<Self> {
        Ok(Self {
            conn: db::init_db(path)?,
        })
    }
}

impl StorageMedium for SqliteMedium {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        queries::get_value(&self.conn, key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        queries::set_value(&self.conn, key, value)
    }

    fn remove_item(&mut self, key: &str) -> anyhow::Result<()> {
        queries::delete_value(&self.conn, key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let path = path.to_str().unwrap();

        {
            let mut medium = SqliteMedium::open(path).unwrap();
            medium.set_item("app.bookings.v1", "[]").unwrap();
        }

        let medium = SqliteMedium::open(path).unwrap();
        assert_eq!(
            medium.get_item("app.bookings.v1").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let mut medium = SqliteMedium::open(":memory:").unwrap();
        assert!(medium.remove_item("missing").is_ok());
    }
}
