use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

/// pets 表的完整列清单，查询和 RETURNING 共用
pub const PET_COLUMNS: &str =
    "id, owner_id, name, species, breed, age, weight, color, notes, photo_url, created_at, updated_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Pet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: i32,
    pub weight: f64,
    pub color: String,
    pub notes: String,
    pub photo_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    pub fn new(owner_id: Uuid, req: CreatePetRequest, now: DateTime<Utc>) -> Self {
        Pet {
            id: Uuid::new_v4(),
            owner_id,
            name: req.name,
            species: req.species,
            breed: req.breed,
            age: req.age,
            weight: req.weight,
            color: req.color,
            notes: req.notes,
            photo_url: req.photo_url,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, field: PetField) {
        match field {
            PetField::Name(v) => self.name = v,
            PetField::Species(v) => self.species = v,
            PetField::Breed(v) => self.breed = v,
            PetField::Age(v) => self.age = v,
            PetField::Weight(v) => self.weight = v,
            PetField::Color(v) => self.color = v,
            PetField::Notes(v) => self.notes = v,
            PetField::PhotoUrl(v) => self.photo_url = v,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePetRequest {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub photo_url: String,
}

impl CreatePetRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() || self.species.trim().is_empty() {
            return Err(AppError::Validation("name and species are required".into()));
        }
        check_measurements(Some(self.age), Some(self.weight))
    }
}

/// 部分更新请求：字段缺省或为 null 都表示保持不变
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub color: Option<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}

impl UpdatePetRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_measurements(self.age, self.weight)
    }

    /// 按固定列顺序展开成需要写入的字段
    pub fn into_fields(self) -> Vec<PetField> {
        let Self {
            name,
            species,
            breed,
            age,
            weight,
            color,
            notes,
            photo_url,
        } = self;

        [
            name.map(PetField::Name),
            species.map(PetField::Species),
            breed.map(PetField::Breed),
            age.map(PetField::Age),
            weight.map(PetField::Weight),
            color.map(PetField::Color),
            notes.map(PetField::Notes),
            photo_url.map(PetField::PhotoUrl),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// 可更新字段的封闭集合，列名只能来自这里
#[derive(Debug, Clone, PartialEq)]
pub enum PetField {
    Name(String),
    Species(String),
    Breed(String),
    Age(i32),
    Weight(f64),
    Color(String),
    Notes(String),
    PhotoUrl(String),
}

impl PetField {
    pub fn column(&self) -> &'static str {
        match self {
            PetField::Name(_) => "name",
            PetField::Species(_) => "species",
            PetField::Breed(_) => "breed",
            PetField::Age(_) => "age",
            PetField::Weight(_) => "weight",
            PetField::Color(_) => "color",
            PetField::Notes(_) => "notes",
            PetField::PhotoUrl(_) => "photo_url",
        }
    }
}

fn check_measurements(age: Option<i32>, weight: Option<f64>) -> Result<(), AppError> {
    if age.is_some_and(|a| a < 0) {
        return Err(AppError::Validation("age must not be negative".into()));
    }
    if weight.is_some_and(|w| w < 0.0 || w.is_nan()) {
        return Err(AppError::Validation("weight must not be negative".into()));
    }
    Ok(())
}
