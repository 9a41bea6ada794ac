use crate::entities::{OrderStatus, OrderType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_orders: u64,
    #[schema(value_type = String, example = "1250.00")]
    pub total_revenue: Decimal,
    pub total_customers: u64,
    pub total_menu_items: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopSellingItem {
    pub name: String,
    pub category: String,
    pub total_sold: i64,
    #[schema(value_type = String)]
    pub revenue: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecentOrder {
    pub order_id: i32,
    pub order_date: DateTime<Utc>,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub customer_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevenueByType {
    pub order_type: OrderType,
    pub count: i64,
    #[schema(value_type = String)]
    pub revenue: Decimal,
}

/// 仪表盘统计
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub summary: StatsSummary,
    pub orders_by_status: Vec<StatusCount>,
    pub top_selling_items: Vec<TopSellingItem>,
    pub recent_orders: Vec<RecentOrder>,
    pub revenue_by_type: Vec<RevenueByType>,
}
