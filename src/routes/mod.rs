pub mod booking;
pub mod extract;
pub mod pet;
pub mod service;
pub mod user;

use axum::{Json, response::IntoResponse};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "pet-grooming-api",
    }))
}
