use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use uuid::Uuid;

use crate::{AppState, error::AppError};

/// 通过认证的调用方，所有受保护接口都按它限定数据范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::MissingToken)?;

    let user_id = state.auth.validate_token(bearer.token()).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        AppError::from(e)
    })?;

    request.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(request).await)
}
