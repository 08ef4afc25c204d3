use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    middleware::CurrentUser,
    models::{CreateUserRequest, LoginRequest},
    routes::extract::AppJson,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.auth.register(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.auth.login(req).await?;
    Ok(Json(session))
}

#[axum::debug_handler]
pub async fn get_profile(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(user.without_password()))
}

// 资料修改尚未开放
#[axum::debug_handler]
pub async fn update_profile(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(%user_id, "profile update requested");
    Err(AppError::NotImplemented)
}
