// 存储层接口
// Postgres 实现用于生产，内存实现用于测试和演示模式

mod pet;
mod user;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CreatePetRequest, Pet, UpdatePetRequest, User};

pub use pet::{PgPetRepository, build_pet_update};
pub use user::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 邮箱唯一约束冲突时返回 `DuplicateEmail`
    async fn insert(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError>;
}

/// 所有操作都按 owner_id 限定范围
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Pet>, AppError>;
    async fn create(&self, owner_id: Uuid, req: CreatePetRequest) -> Result<Pet, AppError>;
    async fn find_owned(&self, pet_id: Uuid, owner_id: Uuid) -> Result<Option<Pet>, AppError>;
    /// 只写入请求中出现的字段，并刷新 updated_at；记录不存在或不属于 owner 时返回 `NotFound`
    async fn apply_partial_update(
        &self,
        pet_id: Uuid,
        owner_id: Uuid,
        changes: UpdatePetRequest,
    ) -> Result<Pet, AppError>;
    async fn delete_owned(&self, pet_id: Uuid, owner_id: Uuid) -> Result<(), AppError>;
}
