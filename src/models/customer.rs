use crate::entities::customer_entity;
use crate::utils::from_cents;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub customer_id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<customer_entity::Model> for CustomerResponse {
    fn from(m: customer_entity::Model) -> Self {
        Self {
            customer_id: m.id,
            name: m.name,
            phone: m.phone,
            email: m.email,
            created_at: m.created_at,
        }
    }
}

/// 客户 + 订单统计
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerSummary {
    #[serde(flatten)]
    pub customer: CustomerResponse,
    pub order_count: i64,
    #[schema(value_type = String, example = "250.00")]
    pub total_spent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_order_date: Option<DateTime<Utc>>,
}

#[derive(Debug, sea_orm::FromQueryResult)]
pub(crate) struct CustomerStatsRow {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub order_count: i64,
    pub total_spent_cents: Option<i64>,
    pub last_order_date: Option<DateTime<Utc>>,
}

impl From<CustomerStatsRow> for CustomerSummary {
    fn from(r: CustomerStatsRow) -> Self {
        Self {
            customer: CustomerResponse {
                customer_id: r.id,
                name: r.name,
                phone: r.phone,
                email: r.email,
                created_at: r.created_at,
            },
            order_count: r.order_count,
            total_spent: from_cents(r.total_spent_cents.unwrap_or(0)),
            last_order_date: r.last_order_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "5551234567")]
    pub phone: String,
    pub email: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
