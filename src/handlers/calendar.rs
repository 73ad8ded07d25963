use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use super::lock;
use crate::errors::AppError;
use crate::services::calendar::generate_ics;
use crate::state::AppState;

pub async fn download_ics(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    // Strip .ics suffix if present
    let booking_id = raw_id.strip_suffix(".ics").unwrap_or(&raw_id);

    let booking = lock(&state.bookings)?
        .find(booking_id)
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id}")))?;

    let Some(ics) = generate_ics(&booking) else {
        tracing::warn!(id = %booking.id, date = %booking.date, time = %booking.time, "booking has no usable date/time for .ics");
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, "Booking date or time is not valid").into_response());
    };

    let filename = format!("booking-{booking_id}.ics");

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        ics,
    )
        .into_response())
}
