use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    /// RFC 3339 timestamp in IST.
    pub ts: String,
    pub event: String,
    pub data: serde_json::Value,
}
