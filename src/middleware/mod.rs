mod auth;
mod error_handler;

pub use auth::{CurrentUser, auth_middleware};
pub use error_handler::log_errors;
