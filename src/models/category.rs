use crate::entities::category_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<category_entity::Model> for CategoryResponse {
    fn from(m: category_entity::Model) -> Self {
        Self {
            category_id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
        }
    }
}

/// 分类 + 菜单项数量
#[derive(Debug, Serialize, Deserialize, ToSchema, sea_orm::FromQueryResult)]
pub struct CategoryWithCount {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub item_count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Main Course")]
    pub name: String,
    pub description: Option<String>,
}
