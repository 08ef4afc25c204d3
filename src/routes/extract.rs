use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Json` 的包装，解析失败时返回 `AppError` 的统一错误体
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
