use chrono::{FixedOffset, Utc};

use crate::models::AuditEntry;
use crate::storage::Storage;

pub const AUDIT_KEY: &str = "app.audit.v1";

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Current time in IST as RFC 3339.
pub fn now_ist() -> String {
    match FixedOffset::east_opt(IST_OFFSET_SECS) {
        Some(ist) => Utc::now().with_timezone(&ist).to_rfc3339(),
        None => Utc::now().to_rfc3339(),
    }
}

/// Append-only log of booking mutations, stored next to the bookings.
pub struct AuditLog {
    storage: Storage,
}

impl AuditLog {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn record(&self, event: &str, data: serde_json::Value) {
        let mut entries = self.entries();
        entries.push(AuditEntry {
            ts: now_ist(),
            event: event.to_string(),
            data,
        });
        self.storage.set(AUDIT_KEY, &entries);
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.storage.get(AUDIT_KEY, Vec::new())
    }
}
