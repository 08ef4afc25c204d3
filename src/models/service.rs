use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Grooming,
    Sitting,
    Walking,
    Training,
    Boarding,
}

/// 服务商发布的服务项目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub description: String,
    pub category: ServiceCategory,
    pub price: f64,
    /// 分钟
    pub duration: i32,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ServiceCategory,
    pub price: f64,
    pub duration: i32,
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ServiceCategory>,
    pub price: Option<f64>,
    pub duration: Option<i32>,
    pub available: Option<bool>,
}
