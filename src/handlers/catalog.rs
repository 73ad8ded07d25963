use axum::Json;
use serde::Serialize;

use crate::models::{Therapy, THERAPIES, TIME_SLOTS};

// GET /api/therapies
#[derive(Serialize)]
pub struct CatalogResponse {
    therapies: &'static [Therapy],
    time_slots: &'static [&'static str],
}

pub async fn get_therapies() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        therapies: THERAPIES,
        time_slots: TIME_SLOTS,
    })
}
