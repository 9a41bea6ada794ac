use std::collections::HashMap;

use crate::entities::{
    OrderStatus, category_entity as categories, customer_entity as customers,
    menu_item_entity as menu_items, order_entity as orders, order_item_entity as order_items,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::line_subtotal;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, SqlErr,
    TransactionTrait,
};

/// 一行已定价的订单明细
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PricedLine {
    pub menu_item_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

/// 按当前菜单价格给每行定价并汇总。
/// 返回 (明细, 总额)，金额单位均为分。
pub(crate) fn price_lines(
    lines: &[OrderLineRequest],
    prices: &HashMap<i32, i64>,
) -> AppResult<(Vec<PricedLine>, i64)> {
    let mut priced = Vec::with_capacity(lines.len());
    let mut total_cents: i64 = 0;
    for line in lines {
        let unit_price_cents = *prices.get(&line.menu_item_id).ok_or_else(|| {
            AppError::NotFound(format!("Menu item {} not found", line.menu_item_id))
        })?;
        let subtotal_cents = line_subtotal(unit_price_cents, line.quantity)?;
        total_cents = total_cents
            .checked_add(subtotal_cents)
            .ok_or_else(|| AppError::ValidationError("Order total out of range".to_string()))?;
        priced.push(PricedLine {
            menu_item_id: line.menu_item_id,
            quantity: line.quantity,
            unit_price_cents,
            subtotal_cents,
        });
    }
    Ok((priced, total_cents))
}

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 下单
    ///
    /// 逻辑 (单个事务内):
    /// 1. 校验客户存在
    /// 2. 读取每个菜单项的当前价格，计算小计与总额
    /// 3. 写订单 (status = pending)，再逐行写明细 (单价快照)
    ///
    /// 任一步失败都会显式回滚，不会留下部分数据。
    pub async fn create_order(&self, request: CreateOrderRequest) -> AppResult<OrderWithItems> {
        Self::validate_create(&request)?;

        let txn = self.pool.begin().await?;
        match Self::insert_order(&txn, &request).await {
            Ok(created) => {
                txn.commit().await?;
                log::info!(
                    "Order created: id={} customer_id={} items={} total={}",
                    created.order.order_id,
                    created.order.customer_id,
                    created.items.len(),
                    created.order.total_amount
                );
                Ok(created)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    log::error!("Failed to roll back order creation: {rollback_err}");
                }
                Err(e)
            }
        }
    }

    fn validate_create(request: &CreateOrderRequest) -> AppResult<()> {
        if request.customer_id <= 0 || request.items.is_empty() {
            return Err(AppError::ValidationError(
                "Missing required fields: customer_id, order_type, items".to_string(),
            ));
        }
        if let Some(line) = request.items.iter().find(|line| line.quantity < 1) {
            return Err(AppError::ValidationError(format!(
                "Quantity for menu item {} must be a positive integer",
                line.menu_item_id
            )));
        }
        Ok(())
    }

    async fn insert_order(
        txn: &DatabaseTransaction,
        request: &CreateOrderRequest,
    ) -> AppResult<OrderWithItems> {
        customers::Entity::find_by_id(request.customer_id)
            .one(txn)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Customer {} not found", request.customer_id))
            })?;

        let ids: Vec<i32> = request.items.iter().map(|l| l.menu_item_id).collect();
        let prices: HashMap<i32, i64> = menu_items::Entity::find()
            .filter(menu_items::Column::Id.is_in(ids))
            .all(txn)
            .await?
            .into_iter()
            .map(|m| (m.id, m.price_cents))
            .collect();
        let (lines, total_cents) = price_lines(&request.items, &prices)?;

        let now = Utc::now();
        let order = orders::ActiveModel {
            customer_id: Set(request.customer_id),
            order_date: Set(now),
            total_amount_cents: Set(total_cents),
            status: Set(OrderStatus::Pending),
            order_type: Set(request.order_type),
            notes: Set(request
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let item = order_items::ActiveModel {
                order_id: Set(order.id),
                menu_item_id: Set(line.menu_item_id),
                quantity: Set(line.quantity),
                unit_price_cents: Set(line.unit_price_cents),
                subtotal_cents: Set(line.subtotal_cents),
                ..Default::default()
            }
            .insert(txn)
            .await
            .map_err(|e| match e.sql_err() {
                // 定价之后菜单项被删除
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    AppError::NotFound(format!("Menu item {} not found", line.menu_item_id))
                }
                _ => AppError::DatabaseError(e),
            })?;
            items.push(OrderItemResponse::from(item));
        }

        Ok(OrderWithItems {
            order: order.into(),
            items,
        })
    }

    /// 更新订单状态 / 备注。状态之间不做流转限制。
    pub async fn update_order_status(
        &self,
        order_id: i32,
        request: UpdateOrderRequest,
    ) -> AppResult<OrderResponse> {
        let status: OrderStatus = request.status.parse()?;

        let existing = orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        let previous = existing.status;

        let mut model = existing.into_active_model();
        model.status = Set(status);
        if let Some(notes) = request.notes.filter(|n| !n.trim().is_empty()) {
            model.notes = Set(Some(notes));
        }
        model.updated_at = Set(Utc::now());
        let updated = model.update(&self.pool).await?;

        log::info!("Order {order_id} status: {previous} -> {status}");
        Ok(updated.into())
    }

    /// 删除订单：同一事务内先删明细再删订单
    pub async fn delete_order(&self, order_id: i32) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let items_deleted = order_items::Entity::delete_many()
            .filter(order_items::Column::OrderId.eq(order_id))
            .exec(&txn)
            .await?
            .rows_affected;
        let orders_deleted = orders::Entity::delete_by_id(order_id)
            .exec(&txn)
            .await?
            .rows_affected;

        if orders_deleted == 0 {
            txn.rollback().await?;
            return Err(AppError::NotFound("Order not found".to_string()));
        }

        txn.commit().await?;
        log::info!("Order deleted: id={order_id} items={items_deleted}");
        Ok(())
    }

    /// 订单列表（含客户信息、明细条数），按下单时间倒序
    pub async fn list_orders(&self, query: &OrderQuery) -> AppResult<Vec<OrderListItem>> {
        let status = query
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<OrderStatus>)
            .transpose()?;

        let mut select = orders::Entity::find()
            .select_only()
            .column(orders::Column::Id)
            .column(orders::Column::CustomerId)
            .column(orders::Column::OrderDate)
            .column(orders::Column::TotalAmountCents)
            .column(orders::Column::Status)
            .column(orders::Column::OrderType)
            .column(orders::Column::Notes)
            .column(orders::Column::CreatedAt)
            .column(orders::Column::UpdatedAt)
            .column_as(customers::Column::Name, "customer_name")
            .column_as(customers::Column::Phone, "customer_phone")
            .column_as(
                Expr::col((order_items::Entity, order_items::Column::Id)).count(),
                "item_count",
            )
            .join(JoinType::InnerJoin, orders::Relation::Customer.def())
            .join(JoinType::LeftJoin, orders::Relation::OrderItems.def());

        if let Some(status) = status {
            select = select.filter(orders::Column::Status.eq(status));
        }
        if let Some(customer_id) = query.customer_id {
            select = select.filter(orders::Column::CustomerId.eq(customer_id));
        }

        let rows = select
            .group_by(orders::Column::Id)
            .group_by(customers::Column::Id)
            .order_by_desc(orders::Column::OrderDate)
            .order_by_desc(orders::Column::Id)
            .into_model::<OrderListRow>()
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(OrderListItem::from).collect())
    }

    /// 订单详情：订单 + 客户 + 明细（菜名/分类为当前值，单价为下单时快照）
    pub async fn get_order(&self, order_id: i32) -> AppResult<OrderDetail> {
        let (order, customer) = orders::Entity::find_by_id(order_id)
            .find_also_related(customers::Entity)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        let customer = customer.ok_or_else(|| {
            AppError::InternalError(format!("Order {order_id} references a missing customer"))
        })?;

        let items = order_items::Entity::find()
            .select_only()
            .column(order_items::Column::Id)
            .column(order_items::Column::OrderId)
            .column(order_items::Column::MenuItemId)
            .column(order_items::Column::Quantity)
            .column(order_items::Column::UnitPriceCents)
            .column(order_items::Column::SubtotalCents)
            .column_as(menu_items::Column::Name, "item_name")
            .column_as(menu_items::Column::Description, "item_description")
            .column_as(categories::Column::Name, "category_name")
            .join(JoinType::InnerJoin, order_items::Relation::MenuItem.def())
            .join(JoinType::InnerJoin, menu_items::Relation::Category.def())
            .filter(order_items::Column::OrderId.eq(order_id))
            .order_by_asc(order_items::Column::Id)
            .into_model::<OrderDetailItemRow>()
            .all(&self.pool)
            .await?;

        Ok(OrderDetail {
            order: order.into(),
            customer_name: customer.name,
            customer_phone: customer.phone,
            customer_email: customer.email,
            items: items.into_iter().map(OrderDetailItem::from).collect(),
        })
    }
}
