use crate::entities::{OrderStatus, OrderType, order_entity, order_item_entity};
use crate::utils::from_cents;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub order_id: i32,
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    #[schema(value_type = String, example = "250.00")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub order_type: OrderType,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<order_entity::Model> for OrderResponse {
    fn from(m: order_entity::Model) -> Self {
        Self {
            order_id: m.id,
            customer_id: m.customer_id,
            order_date: m.order_date,
            total_amount: from_cents(m.total_amount_cents),
            status: m.status,
            order_type: m.order_type,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub order_item_id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
    #[schema(value_type = String, example = "100.00")]
    pub unit_price: Decimal,
    #[schema(value_type = String, example = "200.00")]
    pub subtotal: Decimal,
}

impl From<order_item_entity::Model> for OrderItemResponse {
    fn from(m: order_item_entity::Model) -> Self {
        Self {
            order_item_id: m.id,
            order_id: m.order_id,
            menu_item_id: m.menu_item_id,
            quantity: m.quantity,
            unit_price: from_cents(m.unit_price_cents),
            subtotal: from_cents(m.subtotal_cents),
        }
    }
}

/// 新建订单的返回：订单 + 明细
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
}

/// 订单列表行：订单 + 客户信息 + 明细条数
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderListItem {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub customer_name: String,
    pub customer_phone: String,
    pub item_count: i64,
}

#[derive(Debug, sea_orm::FromQueryResult)]
pub(crate) struct OrderListRow {
    pub id: i32,
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub total_amount_cents: i64,
    pub status: OrderStatus,
    pub order_type: OrderType,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_phone: String,
    pub item_count: i64,
}

impl From<OrderListRow> for OrderListItem {
    fn from(r: OrderListRow) -> Self {
        Self {
            order: OrderResponse {
                order_id: r.id,
                customer_id: r.customer_id,
                order_date: r.order_date,
                total_amount: from_cents(r.total_amount_cents),
                status: r.status,
                order_type: r.order_type,
                notes: r.notes,
                created_at: r.created_at,
                updated_at: r.updated_at,
            },
            customer_name: r.customer_name,
            customer_phone: r.customer_phone,
            item_count: r.item_count,
        }
    }
}

/// 订单明细行 (详情页)，菜名/分类取当前值
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailItem {
    #[serde(flatten)]
    pub item: OrderItemResponse,
    pub item_name: String,
    pub item_description: Option<String>,
    pub category_name: String,
}

#[derive(Debug, sea_orm::FromQueryResult)]
pub(crate) struct OrderDetailItemRow {
    pub id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
    pub item_name: String,
    pub item_description: Option<String>,
    pub category_name: String,
}

impl From<OrderDetailItemRow> for OrderDetailItem {
    fn from(r: OrderDetailItemRow) -> Self {
        Self {
            item: OrderItemResponse {
                order_item_id: r.id,
                order_id: r.order_id,
                menu_item_id: r.menu_item_id,
                quantity: r.quantity,
                unit_price: from_cents(r.unit_price_cents),
                subtotal: from_cents(r.subtotal_cents),
            },
            item_name: r.item_name,
            item_description: r.item_description,
            category_name: r.category_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub items: Vec<OrderDetailItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderQuery {
    pub status: Option<String>,
    pub customer_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub menu_item_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: i32,
    pub order_type: OrderType,
    pub items: Vec<OrderLineRequest>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    #[schema(example = "ready")]
    pub status: String,
    pub notes: Option<String>,
}
