use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::{CreateServiceRequest, Service, UpdateServiceRequest},
    routes::extract::{AppJson, AppPath},
};

// 服务目录尚未接入存储，列表固定为空

#[axum::debug_handler]
pub async fn list_services() -> impl IntoResponse {
    Json(Vec::<Service>::new())
}

#[axum::debug_handler]
pub async fn get_service(AppPath(service_id): AppPath<Uuid>) -> Result<StatusCode, AppError> {
    tracing::debug!(%service_id, "service lookup requested");
    Err(AppError::NotImplemented)
}

#[axum::debug_handler]
pub async fn create_service(
    Extension(CurrentUser(provider_id)): Extension<CurrentUser>,
    AppJson(req): AppJson<CreateServiceRequest>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(%provider_id, name = %req.name, category = ?req.category, "service creation requested");
    Err(AppError::NotImplemented)
}

#[axum::debug_handler]
pub async fn update_service(
    Extension(CurrentUser(provider_id)): Extension<CurrentUser>,
    AppPath(service_id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateServiceRequest>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(%provider_id, %service_id, changes = ?req, "service update requested");
    Err(AppError::NotImplemented)
}

#[axum::debug_handler]
pub async fn delete_service(
    Extension(CurrentUser(provider_id)): Extension<CurrentUser>,
    AppPath(service_id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(%provider_id, %service_id, "service deletion requested");
    Err(AppError::NotImplemented)
}
