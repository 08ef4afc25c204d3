use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::utils::error_codes;
use crate::utils::token::TokenError;

#[derive(Debug, Error)]
pub enum AppError {
    /// 邮箱不存在与密码错误共用同一个结果
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already registered")]
    DuplicateEmail,
    /// 不存在和不属于当前用户共用同一个结果
    #[error("resource not found")]
    NotFound,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("missing bearer token")]
    MissingToken,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("password hashing failed: {0}")]
    Hashing(#[source] bcrypt::BcryptError),
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(#[source] bcrypt::BcryptError),
    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
    #[error("not implemented")]
    NotImplemented,
}

#[derive(Serialize)]
struct ErrorResponse {
    code: i32,
    error_message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::Token(TokenError::Signing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Token(_) => StatusCode::UNAUTHORIZED,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            AppError::Hashing(_) | AppError::MalformedHash(_) | AppError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            AppError::Validation(_) => error_codes::VALIDATION_ERROR,
            AppError::DuplicateEmail => error_codes::USER_EXISTS,
            AppError::InvalidCredentials => error_codes::AUTH_FAILED,
            AppError::MissingToken => error_codes::MISSING_TOKEN,
            AppError::NotFound => error_codes::NOT_FOUND,
            AppError::Token(TokenError::Expired) => error_codes::TOKEN_EXPIRED,
            AppError::Token(TokenError::InvalidSignature) => error_codes::TOKEN_INVALID,
            AppError::Token(TokenError::MalformedClaims(_)) => error_codes::TOKEN_MALFORMED,
            AppError::NotImplemented => error_codes::NOT_IMPLEMENTED,
            AppError::Token(TokenError::Signing(_))
            | AppError::Hashing(_)
            | AppError::MalformedHash(_)
            | AppError::Persistence(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidCredentials => "Invalid credentials".into(),
            AppError::DuplicateEmail => "Email already registered".into(),
            AppError::MissingToken => "Authorization header required".into(),
            AppError::NotFound => "Not found".into(),
            AppError::Token(TokenError::Expired) => "Token expired".into(),
            AppError::Token(TokenError::InvalidSignature) => "Invalid token".into(),
            AppError::Token(TokenError::MalformedClaims(_)) => "Malformed token".into(),
            AppError::NotImplemented => "Not implemented".into(),
            internal => {
                // 内部错误只记日志，不返回细节
                tracing::error!(error = %internal, "internal error");
                "Internal server error".into()
            }
        };

        let body = Json(ErrorResponse {
            code: self.code(),
            error_message,
        });

        (status, body).into_response()
    }
}

// 请求体和路径参数解析失败统一按校验错误返回，不透出 serde 细节
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        let message = match rejection {
            JsonRejection::JsonDataError(_) => "request body has missing or invalid fields",
            JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
            JsonRejection::MissingJsonContentType(_) => "expected an application/json body",
            _ => "failed to read request body",
        };
        AppError::Validation(message.into())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected path parameter");
        AppError::Validation("invalid path parameter".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_map_to_distinct_codes() {
        let expired = AppError::from(TokenError::Expired);
        let forged = AppError::from(TokenError::InvalidSignature);
        let garbled = AppError::from(TokenError::MalformedClaims("bad user_id".into()));

        assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(garbled.status(), StatusCode::UNAUTHORIZED);
        assert_ne!(expired.code(), forged.code());
        assert_ne!(forged.code(), garbled.code());
    }

    #[test]
    fn persistence_errors_hide_detail() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), error_codes::INTERNAL_ERROR);
    }

    #[test]
    fn ownership_and_absence_share_not_found() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotImplemented.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(AppError::DuplicateEmail.status(), StatusCode::CONFLICT);
    }
}
