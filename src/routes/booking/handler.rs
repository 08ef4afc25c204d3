use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::{Booking, CreateBookingRequest, UpdateBookingRequest},
    routes::extract::{AppJson, AppPath},
};

#[axum::debug_handler]
pub async fn list_bookings(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> impl IntoResponse {
    tracing::debug!(%user_id, "listing bookings");
    Json(Vec::<Booking>::new())
}

#[axum::debug_handler]
pub async fn create_booking(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppJson(req): AppJson<CreateBookingRequest>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(
        %user_id,
        pet_id = %req.pet_id,
        service_id = %req.service_id,
        scheduled_time = %req.scheduled_time,
        "booking requested"
    );
    Err(AppError::NotImplemented)
}

#[axum::debug_handler]
pub async fn get_booking(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppPath(booking_id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(%user_id, %booking_id, "booking lookup requested");
    Err(AppError::NotImplemented)
}

#[axum::debug_handler]
pub async fn update_booking(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppPath(booking_id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateBookingRequest>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(%user_id, %booking_id, changes = ?req, "booking update requested");
    Err(AppError::NotImplemented)
}

#[axum::debug_handler]
pub async fn cancel_booking(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppPath(booking_id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(%user_id, %booking_id, "booking cancellation requested");
    Err(AppError::NotImplemented)
}
