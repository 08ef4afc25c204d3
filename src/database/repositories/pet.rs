use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::PetRepository;
use crate::error::AppError;
use crate::models::{CreatePetRequest, PET_COLUMNS, Pet, PetField, UpdatePetRequest};

#[derive(Clone)]
pub struct PgPetRepository {
    pool: PgPool,
}

impl PgPetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 生成单条带 owner 条件的 UPDATE ... RETURNING 语句。
///
/// 列名只来自 [`PetField::column`]，值一律走绑定参数。
/// 没有任何字段时仍然刷新 updated_at。
pub fn build_pet_update(
    pet_id: Uuid,
    owner_id: Uuid,
    changes: UpdatePetRequest,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE pets SET updated_at = NOW()");

    for field in changes.into_fields() {
        builder.push(", ").push(field.column()).push(" = ");
        match field {
            PetField::Name(v)
            | PetField::Species(v)
            | PetField::Breed(v)
            | PetField::Color(v)
            | PetField::Notes(v)
            | PetField::PhotoUrl(v) => builder.push_bind(v),
            PetField::Age(v) => builder.push_bind(v),
            PetField::Weight(v) => builder.push_bind(v),
        };
    }

    builder
        .push(" WHERE id = ")
        .push_bind(pet_id)
        .push(" AND owner_id = ")
        .push_bind(owner_id)
        .push(" RETURNING ")
        .push(PET_COLUMNS);

    builder
}

#[async_trait]
impl PetRepository for PgPetRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Pet>, AppError> {
        let sql = format!(
            "SELECT {} FROM pets WHERE owner_id = $1 ORDER BY created_at DESC",
            PET_COLUMNS
        );
        let pets = sqlx::query_as::<_, Pet>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(pets)
    }

    async fn create(&self, owner_id: Uuid, req: CreatePetRequest) -> Result<Pet, AppError> {
        let pet = Pet::new(owner_id, req, Utc::now());
        let sql = format!(
            r#"
            INSERT INTO pets (id, owner_id, name, species, breed, age, weight, color, notes, photo_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            PET_COLUMNS
        );

        let pet = sqlx::query_as::<_, Pet>(&sql)
            .bind(pet.id)
            .bind(pet.owner_id)
            .bind(&pet.name)
            .bind(&pet.species)
            .bind(&pet.breed)
            .bind(pet.age)
            .bind(pet.weight)
            .bind(&pet.color)
            .bind(&pet.notes)
            .bind(&pet.photo_url)
            .bind(pet.created_at)
            .bind(pet.updated_at)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!("Created pet {} for owner {}", pet.id, owner_id);
        Ok(pet)
    }

    async fn find_owned(&self, pet_id: Uuid, owner_id: Uuid) -> Result<Option<Pet>, AppError> {
        let sql = format!(
            "SELECT {} FROM pets WHERE id = $1 AND owner_id = $2",
            PET_COLUMNS
        );
        let pet = sqlx::query_as::<_, Pet>(&sql)
            .bind(pet_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(pet)
    }

    async fn apply_partial_update(
        &self,
        pet_id: Uuid,
        owner_id: Uuid,
        changes: UpdatePetRequest,
    ) -> Result<Pet, AppError> {
        let mut builder = build_pet_update(pet_id, owner_id, changes);

        // 存在性、归属校验和写入在同一条语句里完成
        builder
            .build_query_as::<Pet>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn delete_owned(&self, pet_id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1 AND owner_id = $2")
            .bind(pet_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!("Deleted pet {} for owner {}", pet_id, owner_id);
        Ok(())
    }
}
