use crate::entities::menu_item_entity;
use crate::utils::from_cents;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuItemResponse {
    pub menu_item_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl From<menu_item_entity::Model> for MenuItemResponse {
    fn from(m: menu_item_entity::Model) -> Self {
        Self {
            menu_item_id: m.id,
            category_id: m.category_id,
            name: m.name,
            description: m.description,
            price: from_cents(m.price_cents),
            is_available: m.is_available,
            created_at: m.created_at,
            updated_at: m.updated_at,
            category_name: None,
        }
    }
}

impl MenuItemResponse {
    pub fn with_category_name(mut self, category_name: String) -> Self {
        self.category_name = Some(category_name);
        self
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuQuery {
    pub category_id: Option<i32>,
    pub available: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMenuItemRequest {
    pub category_id: i32,
    #[schema(example = "Paneer Tikka")]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = f64, example = 12.5)]
    pub price: Decimal,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// 部分更新：未提供的字段保持原值
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateMenuItemRequest {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub is_available: Option<bool>,
}
