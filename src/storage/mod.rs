//! Key-value persistence with JSON values.
//!
//! [`StorageMedium`] is the raw, fallible backend. [`Storage`] wraps a shared
//! medium and never fails: reads fall back, writes are dropped and logged.

pub mod file;
pub mod memory;
pub mod sqlite;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use file::FileMedium;
pub use memory::MemoryMedium;
pub use sqlite::SqliteMedium;

pub trait StorageMedium: Send {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove_item(&mut self, key: &str) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct Storage {
    medium: Arc<Mutex<dyn StorageMedium>>,
}

impl Storage {
    pub fn new<M: StorageMedium + 'static>(medium: M) -> Self {
        Self {
            medium: Arc::new(Mutex::new(medium)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryMedium::default())
    }

    /// Returns `fallback` when the key is absent, empty, unparsable, or the
    /// medium is unavailable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let raw = match self.medium.lock() {
            Ok(medium) => medium.get_item(key),
            Err(_) => {
                tracing::warn!(key, "storage medium lock poisoned, using fallback");
                return fallback;
            }
        };

        let raw = match raw {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return fallback,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed, using fallback");
                return fallback;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is not valid JSON, using fallback");
                fallback
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to serialize value, write dropped");
                return;
            }
        };

        let result = match self.medium.lock() {
            Ok(mut medium) => medium.set_item(key, &raw),
            Err(_) => Err(anyhow::anyhow!("storage medium lock poisoned")),
        };
        if let Err(e) = result {
            tracing::warn!(key, error = %e, "storage write failed, write dropped");
        }
    }

    pub fn remove(&self, key: &str) {
        let result = match self.medium.lock() {
            Ok(mut medium) => medium.remove_item(key),
            Err(_) => Err(anyhow::anyhow!("storage medium lock poisoned")),
        };
        if let Err(e) = result {
            tracing::warn!(key, error = %e, "storage remove failed");
        }
    }
}

#[cfg(test)]
pub(crate) mod test_media {
    use super::StorageMedium;

    /// Reads nothing, rejects every write.
    pub struct FailingMedium;

    impl StorageMedium for FailingMedium {
        fn get_item(&self, _key: &str) -> anyhow::Result<Option<String>> {
            anyhow::bail!("storage unavailable")
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("quota exceeded")
        }

        fn remove_item(&mut self, _key: &str) -> anyhow::Result<()> {
            anyhow::bail!("storage unavailable")
        }
    }

    /// Returns the same non-JSON payload for every key and accepts writes
    /// without keeping them.
    pub struct GarbageMedium;

    impl StorageMedium for GarbageMedium {
        fn get_item(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(Some("{not json".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            Ok(())
        }

        fn remove_item(&mut self, _key: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }
}
