use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use super::lock;
use crate::errors::AppError;
use crate::models::AuditEntry;
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// DELETE /api/admin/bookings
pub async fn clear_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let cleared = {
        let store = lock(&state.bookings)?;
        let count = store.get_all().len();
        store.clear_all();
        count
    };
    lock(&state.audit)?.record("clear_bookings", serde_json::json!({ "count": cleared }));

    tracing::warn!(count = cleared, "all bookings cleared");
    Ok(Json(serde_json::json!({"ok": true, "cleared": cleared})))
}

// GET /api/admin/audit
pub async fn get_audit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<AuditEntry>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let entries = lock(&state.audit)?.entries();
    Ok(Json(entries))
}

// POST /api/admin/actions
#[derive(Deserialize)]
pub struct AdminActionRequest {
    pub actor: String,
    pub action: String,
    pub target: Option<String>,
    #[serde(default)]
    pub meta: serde_json::Value,
}

pub async fn record_action(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<AdminActionRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let meta = if body.meta.is_null() {
        serde_json::json!({})
    } else {
        body.meta
    };
    lock(&state.audit)?.record(
        "admin_action",
        serde_json::json!({
            "actor": body.actor,
            "action": body.action,
            "target": body.target,
            "meta": meta,
        }),
    );

    tracing::info!(actor = %body.actor, action = %body.action, "admin action recorded");
    Ok(Json(serde_json::json!({"ok": true})))
}
