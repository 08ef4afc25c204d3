use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::database::UserRepository;
use crate::error::AppError;
use crate::models::{CreateUserRequest, LoginRequest, LoginResponse, User};
use crate::utils::{TokenError, TokenIssuer, hash_password, verify_password};

/// 注册、登录和令牌校验，不依赖 Web 框架
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
    // 邮箱不存在时也做一次 bcrypt 校验，两种失败耗时一致
    dummy_hash: String,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenIssuer, bcrypt_cost: u32) -> Self {
        let dummy_hash = hash_password("not-a-real-password", bcrypt_cost).unwrap_or_else(|e| {
            warn!("failed to prepare dummy password hash: {}", e);
            String::new()
        });

        Self {
            users,
            tokens,
            bcrypt_cost,
            dummy_hash,
        }
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register(&self, req: CreateUserRequest) -> Result<User, AppError> {
        req.validate()?;

        let password_hash = hash_password(&req.password, self.bcrypt_cost)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: req.email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            address: req.address,
            role: req.role,
            created_at: now,
            updated_at: now,
        };

        let user = self.users.insert(&user).await?;
        info!(user_id = %user.id, role = user.role.as_str(), "user_registered");
        Ok(user.without_password())
    }

    /// 邮箱不存在和密码错误返回同一个 `InvalidCredentials`
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        req.validate()?;

        let Some(user) = self.users.find_by_email(&req.email).await? else {
            debug!("login for unknown email");
            let _ = verify_password(&req.password, &self.dummy_hash);
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(&req.password, &user.password_hash)? {
            debug!(user_id = %user.id, "password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(LoginResponse {
            token,
            user: user.without_password(),
        })
    }

    pub fn validate_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.tokens.validate(token)
    }
}
