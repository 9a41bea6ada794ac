use crate::database::sum_bigint;
use crate::entities::{
    OrderStatus, OrderType, category_entity as categories, customer_entity as customers,
    menu_item_entity as menu_items, order_entity as orders, order_item_entity as order_items,
};
use crate::error::AppResult;
use crate::models::*;
use crate::utils::from_cents;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

const TOP_SELLING_LIMIT: u64 = 5;
const RECENT_ORDERS_LIMIT: u64 = 10;

#[derive(Debug, FromQueryResult)]
struct RevenueRow {
    revenue_cents: Option<i64>,
}

#[derive(Debug, FromQueryResult)]
struct StatusCountRow {
    status: OrderStatus,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct TopItemRow {
    name: String,
    category: String,
    total_sold: Option<i64>,
    revenue_cents: Option<i64>,
}

#[derive(Debug, FromQueryResult)]
struct RecentOrderRow {
    id: i32,
    order_date: DateTime<Utc>,
    total_amount_cents: i64,
    status: OrderStatus,
    customer_name: String,
}

#[derive(Debug, FromQueryResult)]
struct RevenueByTypeRow {
    order_type: OrderType,
    count: i64,
    revenue_cents: Option<i64>,
}

/// 仪表盘统计，只读
#[derive(Clone)]
pub struct StatsService {
    pool: DatabaseConnection,
}

impl StatsService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_dashboard_stats(&self) -> AppResult<DashboardStats> {
        Ok(DashboardStats {
            summary: self.summary().await?,
            orders_by_status: self.orders_by_status().await?,
            top_selling_items: self.top_selling_items().await?,
            recent_orders: self.recent_orders().await?,
            revenue_by_type: self.revenue_by_type().await?,
        })
    }

    /// 总订单数、已送达订单收入、客户数、可售菜单项数
    pub async fn summary(&self) -> AppResult<StatsSummary> {
        let total_orders = orders::Entity::find().count(&self.pool).await?;

        let revenue_cents = orders::Entity::find()
            .select_only()
            .column_as(sum_bigint(orders::Column::TotalAmountCents), "revenue_cents")
            .filter(orders::Column::Status.eq(OrderStatus::Delivered))
            .into_model::<RevenueRow>()
            .one(&self.pool)
            .await?
            .and_then(|r| r.revenue_cents)
            .unwrap_or(0);

        let total_customers = customers::Entity::find().count(&self.pool).await?;
        let total_menu_items = menu_items::Entity::find()
            .filter(menu_items::Column::IsAvailable.eq(true))
            .count(&self.pool)
            .await?;

        Ok(StatsSummary {
            total_orders,
            total_revenue: from_cents(revenue_cents),
            total_customers,
            total_menu_items,
        })
    }

    /// 只返回至少有一笔订单的状态
    pub async fn orders_by_status(&self) -> AppResult<Vec<StatusCount>> {
        let rows = orders::Entity::find()
            .select_only()
            .column(orders::Column::Status)
            .column_as(Expr::col(orders::Column::Id).count(), "count")
            .group_by(orders::Column::Status)
            .order_by_asc(orders::Column::Status)
            .into_model::<StatusCountRow>()
            .all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| StatusCount {
                status: r.status,
                count: r.count,
            })
            .collect())
    }

    /// 销量前 5，名称取当前菜单/分类
    pub async fn top_selling_items(&self) -> AppResult<Vec<TopSellingItem>> {
        let rows = order_items::Entity::find()
            .select_only()
            .column_as(menu_items::Column::Name, "name")
            .column_as(categories::Column::Name, "category")
            .column_as(
                sum_bigint((order_items::Entity, order_items::Column::Quantity)),
                "total_sold",
            )
            .column_as(
                sum_bigint((order_items::Entity, order_items::Column::SubtotalCents)),
                "revenue_cents",
            )
            .join(JoinType::InnerJoin, order_items::Relation::MenuItem.def())
            .join(JoinType::InnerJoin, menu_items::Relation::Category.def())
            .group_by(menu_items::Column::Id)
            .group_by(menu_items::Column::Name)
            .group_by(categories::Column::Id)
            .group_by(categories::Column::Name)
            .order_by_desc(Expr::cust("total_sold"))
            .order_by_asc(menu_items::Column::Name)
            .limit(TOP_SELLING_LIMIT)
            .into_model::<TopItemRow>()
            .all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| TopSellingItem {
                name: r.name,
                category: r.category,
                total_sold: r.total_sold.unwrap_or(0),
                revenue: from_cents(r.revenue_cents.unwrap_or(0)),
            })
            .collect())
    }

    pub async fn recent_orders(&self) -> AppResult<Vec<RecentOrder>> {
        let rows = orders::Entity::find()
            .select_only()
            .column(orders::Column::Id)
            .column(orders::Column::OrderDate)
            .column(orders::Column::TotalAmountCents)
            .column(orders::Column::Status)
            .column_as(customers::Column::Name, "customer_name")
            .join(JoinType::InnerJoin, orders::Relation::Customer.def())
            .order_by_desc(orders::Column::OrderDate)
            .order_by_desc(orders::Column::Id)
            .limit(RECENT_ORDERS_LIMIT)
            .into_model::<RecentOrderRow>()
            .all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| RecentOrder {
                order_id: r.id,
                order_date: r.order_date,
                total_amount: from_cents(r.total_amount_cents),
                status: r.status,
                customer_name: r.customer_name,
            })
            .collect())
    }

    /// 已送达订单按类型汇总
    pub async fn revenue_by_type(&self) -> AppResult<Vec<RevenueByType>> {
        let rows = orders::Entity::find()
            .select_only()
            .column(orders::Column::OrderType)
            .column_as(Expr::col(orders::Column::Id).count(), "count")
            .column_as(sum_bigint(orders::Column::TotalAmountCents), "revenue_cents")
            .filter(orders::Column::Status.eq(OrderStatus::Delivered))
            .group_by(orders::Column::OrderType)
            .order_by_asc(orders::Column::OrderType)
            .into_model::<RevenueByTypeRow>()
            .all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| RevenueByType {
                order_type: r.order_type,
                count: r.count,
                revenue: from_cents(r.revenue_cents.unwrap_or(0)),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::setup_pool;
    use crate::services::{CategoryService, CustomerService, MenuService, OrderService};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_empty_dashboard() {
        let stats = StatsService::new(setup_pool().await)
            .get_dashboard_stats()
            .await
            .unwrap();
        assert_eq!(stats.summary.total_orders, 0);
        assert_eq!(stats.summary.total_revenue.to_string(), "0.00");
        assert!(stats.orders_by_status.is_empty());
        assert!(stats.top_selling_items.is_empty());
        assert!(stats.recent_orders.is_empty());
        assert!(stats.revenue_by_type.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_aggregates() {
        let pool = setup_pool().await;
        let category = CategoryService::new(pool.clone())
            .create_category(CreateCategoryRequest {
                name: "Drinks".to_string(),
                description: None,
            })
            .await
            .unwrap();
        let menu = MenuService::new(pool.clone());
        let mut item_ids = Vec::new();
        for (name, price) in [("Chai", "2.50"), ("Coffee", "3.00"), ("Juice", "4.00")] {
            let item = menu
                .create_menu_item(CreateMenuItemRequest {
                    category_id: category.category_id,
                    name: name.to_string(),
                    description: None,
                    price: Decimal::from_str(price).unwrap(),
                    is_available: true,
                })
                .await
                .unwrap();
            item_ids.push(item.menu_item_id);
        }
        menu.toggle_availability(item_ids[2]).await.unwrap();

        let customer = CustomerService::new(pool.clone())
            .create_customer(CreateCustomerRequest {
                name: "Kiran".to_string(),
                phone: "5557778888".to_string(),
                email: None,
            })
            .await
            .unwrap();

        let orders = OrderService::new(pool.clone());
        let mut order_ids = Vec::new();
        for (order_type, lines) in [
            (OrderType::DineIn, vec![(item_ids[0], 4)]),
            (OrderType::Takeaway, vec![(item_ids[0], 1), (item_ids[1], 2)]),
            (OrderType::Takeaway, vec![(item_ids[2], 1)]),
        ] {
            let created = orders
                .create_order(CreateOrderRequest {
                    customer_id: customer.customer_id,
                    order_type,
                    items: lines
                        .into_iter()
                        .map(|(menu_item_id, quantity)| OrderLineRequest {
                            menu_item_id,
                            quantity,
                        })
                        .collect(),
                    notes: None,
                })
                .await
                .unwrap();
            order_ids.push(created.order.order_id);
        }
        for id in &order_ids[..2] {
            orders
                .update_order_status(
                    *id,
                    UpdateOrderRequest {
                        status: "delivered".to_string(),
                        notes: None,
                    },
                )
                .await
                .unwrap();
        }

        let stats = StatsService::new(pool).get_dashboard_stats().await.unwrap();

        assert_eq!(stats.summary.total_orders, 3);
        // 10.00 + 8.50，第三单未送达
        assert_eq!(stats.summary.total_revenue.to_string(), "18.50");
        assert_eq!(stats.summary.total_customers, 1);
        assert_eq!(stats.summary.total_menu_items, 2);

        let by_status: Vec<(OrderStatus, i64)> = stats
            .orders_by_status
            .iter()
            .map(|s| (s.status, s.count))
            .collect();
        assert_eq!(
            by_status,
            vec![(OrderStatus::Delivered, 2), (OrderStatus::Pending, 1)]
        );

        assert_eq!(stats.top_selling_items.len(), 3);
        assert_eq!(stats.top_selling_items[0].name, "Chai");
        assert_eq!(stats.top_selling_items[0].category, "Drinks");
        assert_eq!(stats.top_selling_items[0].total_sold, 5);
        assert_eq!(stats.top_selling_items[0].revenue.to_string(), "12.50");

        assert_eq!(stats.recent_orders.len(), 3);
        assert_eq!(stats.recent_orders[0].order_id, order_ids[2]);
        assert_eq!(stats.recent_orders[0].customer_name, "Kiran");

        let by_type: Vec<(OrderType, i64, String)> = stats
            .revenue_by_type
            .iter()
            .map(|r| (r.order_type, r.count, r.revenue.to_string()))
            .collect();
        assert_eq!(
            by_type,
            vec![
                (OrderType::DineIn, 1, "10.00".to_string()),
                (OrderType::Takeaway, 1, "8.50".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_top_items_and_recent_orders_are_limited() {
        let pool = setup_pool().await;
        let category = CategoryService::new(pool.clone())
            .create_category(CreateCategoryRequest {
                name: "Snacks".to_string(),
                description: None,
            })
            .await
            .unwrap();
        let menu = MenuService::new(pool.clone());
        let mut item_ids = Vec::new();
        for name in ["Item A", "Item B", "Item C", "Item D", "Item E", "Item F"] {
            let item = menu
                .create_menu_item(CreateMenuItemRequest {
                    category_id: category.category_id,
                    name: name.to_string(),
                    description: None,
                    price: Decimal::ONE,
                    is_available: true,
                })
                .await
                .unwrap();
            item_ids.push(item.menu_item_id);
        }
        let customer = CustomerService::new(pool.clone())
            .create_customer(CreateCustomerRequest {
                name: "Meera".to_string(),
                phone: "5550001111".to_string(),
                email: None,
            })
            .await
            .unwrap();

        // 前 6 单：第 i 个菜品数量 i+1；后 5 单：Item F 各 1 份
        let mut lines: Vec<(i32, i32)> = item_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i as i32 + 1))
            .collect();
        lines.extend(std::iter::repeat((item_ids[5], 1)).take(5));

        let orders = OrderService::new(pool.clone());
        let mut order_ids = Vec::new();
        for (menu_item_id, quantity) in lines {
            let created = orders
                .create_order(CreateOrderRequest {
                    customer_id: customer.customer_id,
                    order_type: OrderType::Takeaway,
                    items: vec![OrderLineRequest {
                        menu_item_id,
                        quantity,
                    }],
                    notes: None,
                })
                .await
                .unwrap();
            order_ids.push(created.order.order_id);
        }
        assert_eq!(order_ids.len(), 11);

        let service = StatsService::new(pool);

        let top = service.top_selling_items().await.unwrap();
        let top: Vec<(&str, i64)> = top.iter().map(|t| (t.name.as_str(), t.total_sold)).collect();
        assert_eq!(
            top,
            vec![
                ("Item F", 11),
                ("Item E", 5),
                ("Item D", 4),
                ("Item C", 3),
                ("Item B", 2),
            ]
        );

        let recent = service.recent_orders().await.unwrap();
        assert_eq!(recent.len(), 10);
        let recent_ids: Vec<i32> = recent.iter().map(|r| r.order_id).collect();
        let expected: Vec<i32> = order_ids[1..].iter().rev().copied().collect();
        assert_eq!(recent_ids, expected);
        assert!(!recent_ids.contains(&order_ids[0]));
    }
}
