use std::sync::Mutex;

use crate::config::{AppConfig, StorageBackend};
use crate::services::audit::AuditLog;
use crate::services::bookings::BookingStore;
use crate::storage::{FileMedium, SqliteMedium, Storage};

/// Shared by every handler. Each mutex serialises the read-modify-write
/// cycles of its store within this process.
pub struct AppState {
    pub bookings: Mutex<BookingStore>,
    pub audit: Mutex<AuditLog>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(storage: Storage, config: AppConfig) -> Self {
        Self {
            bookings: Mutex::new(BookingStore::new(storage.clone())),
            audit: Mutex::new(AuditLog::new(storage)),
            config,
        }
    }

    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let storage = match config.storage_backend {
            StorageBackend::Sqlite => Storage::new(SqliteMedium::open(&config.database_url)?),
            StorageBackend::File => Storage::new(FileMedium::open(&config.data_dir)?),
            StorageBackend::Memory => Storage::in_memory(),
        };
        Ok(Self::new(storage, config))
    }
}
