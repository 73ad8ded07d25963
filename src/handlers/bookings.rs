use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::lock;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus};
use crate::services::scheduling::{build_booking, BookingRequest};
use crate::state::AppState;

fn parse_status(raw: &str) -> Result<BookingStatus, AppError> {
    BookingStatus::parse(raw).ok_or_else(|| AppError::InvalidStatus(raw.to_string()))
}

// GET /api/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let status_filter = query.status.as_deref().map(parse_status).transpose()?;

    let bookings = lock(&state.bookings)?.get_all();
    let bookings = match status_filter {
        Some(status) => bookings.into_iter().filter(|b| b.status == status).collect(),
        None => bookings,
    };

    Ok(Json(bookings))
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let role = body.role;
    let booking = build_booking(body)?;

    lock(&state.bookings)?.add(booking.clone());
    lock(&state.audit)?.record(
        "create_booking",
        serde_json::json!({ "booking": booking, "role": role.as_str() }),
    );

    tracing::info!(id = %booking.id, therapy = %booking.therapy_id, date = %booking.date, "booking created");
    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let booking = lock(&state.bookings)?.find(&id);
    booking
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))
}

// POST /api/bookings/:id/status
#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Booking>, AppError> {
    let status = parse_status(&body.status)?;
    let booking = set_status(
        &state,
        &id,
        status,
        "update_booking_status",
        serde_json::Map::new(),
    )?;
    Ok(Json(booking))
}

// POST /api/bookings/:id/cancel
#[derive(Deserialize, Default)]
pub struct CancelRequest {
    pub by: Option<String>,
    pub reason: Option<String>,
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<CancelRequest>>,
) -> Result<Json<Booking>, AppError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let mut details = serde_json::Map::new();
    details.insert("cancelled_by".to_string(), body.by.into());
    details.insert("cancellation_reason".to_string(), body.reason.into());

    let booking = set_status(&state, &id, BookingStatus::Cancelled, "cancel_booking", details)?;
    Ok(Json(booking))
}

fn set_status(
    state: &AppState,
    id: &str,
    status: BookingStatus,
    event: &str,
    details: serde_json::Map<String, serde_json::Value>,
) -> Result<Booking, AppError> {
    let booking = {
        let store = lock(&state.bookings)?;
        if store.find(id).is_none() {
            return Err(AppError::NotFound(format!("booking {id}")));
        }
        store.update_status(id, status);
        store
            .find(id)
            .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?
    };

    let mut data = serde_json::Map::new();
    data.insert("id".to_string(), id.into());
    data.insert("status".to_string(), status.as_str().into());
    data.extend(details);
    lock(&state.audit)?.record(event, serde_json::Value::Object(data));
    tracing::info!(id, status = status.as_str(), "booking status updated");

    Ok(booking)
}

// POST /api/bookings/:id/escalate
#[derive(Deserialize)]
pub struct EscalateRequest {
    pub escalated_to: String,
    pub reason: Option<String>,
}

pub async fn escalate_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<EscalateRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = lock(&state.bookings)?.find(&id);
    let booking = booking.ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;

    lock(&state.audit)?.record(
        "escalate_booking",
        serde_json::json!({
            "id": id,
            "escalated_to": body.escalated_to,
            "escalation_reason": body.reason,
        }),
    );
    tracing::info!(id = %id, escalated_to = %body.escalated_to, "booking escalated");

    Ok(Json(booking))
}

// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    lock(&state.bookings)?.remove(&id);
    lock(&state.audit)?.record("remove_booking", serde_json::json!({ "id": id }));

    Ok(Json(serde_json::json!({"ok": true})))
}
