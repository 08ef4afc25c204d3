use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    AppState,
    error::AppError,
    middleware::CurrentUser,
    models::{CreatePetRequest, UpdatePetRequest},
    routes::extract::{AppJson, AppPath},
};

#[axum::debug_handler]
pub async fn list_pets(
    Extension(CurrentUser(owner_id)): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let pets = state.pets.list_by_owner(owner_id).await?;
    Ok(Json(pets))
}

#[axum::debug_handler]
pub async fn create_pet(
    Extension(CurrentUser(owner_id)): Extension<CurrentUser>,
    State(state): State<AppState>,
    AppJson(req): AppJson<CreatePetRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;
    let pet = state.pets.create(owner_id, req).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

#[axum::debug_handler]
pub async fn get_pet(
    Extension(CurrentUser(owner_id)): Extension<CurrentUser>,
    State(state): State<AppState>,
    AppPath(pet_id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pet = state
        .pets
        .find_owned(pet_id, owner_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(pet))
}

/// 部分更新，只写入请求体中出现的字段
#[axum::debug_handler]
pub async fn update_pet(
    Extension(CurrentUser(owner_id)): Extension<CurrentUser>,
    State(state): State<AppState>,
    AppPath(pet_id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdatePetRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;
    let pet = state
        .pets
        .apply_partial_update(pet_id, owner_id, req)
        .await?;
    Ok(Json(pet))
}

#[axum::debug_handler]
pub async fn delete_pet(
    Extension(CurrentUser(owner_id)): Extension<CurrentUser>,
    State(state): State<AppState>,
    AppPath(pet_id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.pets.delete_owned(pet_id, owner_id).await?;
    Ok(Json(json!({ "message": "Pet deleted successfully" })))
}
