use bcrypt::{hash, verify};

use crate::error::AppError;

/// bcrypt 接受的最低成本，测试里用它让哈希足够快
pub const MIN_COST: u32 = 4;

/// 生成 bcrypt 哈希，格式为 `$2b$<cost>$<salt+digest>`
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password.as_bytes(), cost).map_err(AppError::Hashing)
}

/// 密码不匹配返回 `Ok(false)`；存储的哈希无法解析时返回 `MalformedHash`
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password.as_bytes(), hash).map_err(AppError::MalformedHash)
}
