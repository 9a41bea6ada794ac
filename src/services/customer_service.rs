use crate::database::sum_bigint;
use crate::entities::{customer_entity as customers, order_entity as orders};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{non_blank, validate_phone};
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Select, Set, SqlErr,
};

#[derive(Clone)]
pub struct CustomerService {
    pool: DatabaseConnection,
}

impl CustomerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 客户列表（含订单数、消费总额），search 对姓名/手机号/邮箱做不区分大小写的模糊匹配
    pub async fn list_customers(&self, query: &CustomerQuery) -> AppResult<Vec<CustomerSummary>> {
        let mut select = Self::select_with_stats();
        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search.to_lowercase());
            select = select.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            customers::Entity,
                            customers::Column::Name,
                        ))))
                        .like(pattern.clone()),
                    )
                    .add(Expr::col((customers::Entity, customers::Column::Phone)).like(pattern.clone()))
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            customers::Entity,
                            customers::Column::Email,
                        ))))
                        .like(pattern),
                    ),
            );
        }

        let rows = select
            .order_by_asc(customers::Column::Name)
            .into_model::<CustomerStatsRow>()
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(CustomerSummary::from).collect())
    }

    pub async fn get_customer(&self, id: i32) -> AppResult<CustomerSummary> {
        let row = Self::select_with_stats()
            .filter(customers::Column::Id.eq(id))
            .into_model::<CustomerStatsRow>()
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;
        Ok(row.into())
    }

    /// 新建客户。手机号唯一性由唯一索引保证，这里只负责把冲突翻译成 409。
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> AppResult<CustomerResponse> {
        let name = request.name.trim();
        if name.is_empty() || request.phone.is_empty() {
            return Err(AppError::ValidationError(
                "Name and phone are required".to_string(),
            ));
        }
        validate_phone(&request.phone)?;

        let result = customers::ActiveModel {
            name: Set(name.to_string()),
            phone: Set(request.phone.clone()),
            email: Set(non_blank(request.email)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        let model = result.map_err(|e| {
            map_phone_conflict(e, "Phone number already registered")
        })?;
        log::info!("Customer created: id={}", model.id);
        Ok(model.into())
    }

    /// 部分更新：未提供的字段保持原值
    pub async fn update_customer(
        &self,
        id: i32,
        request: UpdateCustomerRequest,
    ) -> AppResult<CustomerResponse> {
        if let Some(phone) = &request.phone {
            validate_phone(phone)?;
        }
        let name = match request.name.as_deref().map(str::trim) {
            Some("") => {
                return Err(AppError::ValidationError(
                    "Customer name cannot be empty".to_string(),
                ));
            }
            other => other.map(str::to_string),
        };

        let existing = customers::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        let mut model = existing.clone().into_active_model();
        if let Some(name) = name {
            model.name = Set(name);
        }
        if let Some(phone) = request.phone {
            model.phone = Set(phone);
        }
        if let Some(email) = request.email {
            model.email = Set(non_blank(Some(email)));
        }
        if !model.is_changed() {
            return Ok(existing.into());
        }

        let updated = model.update(&self.pool).await.map_err(|e| {
            map_phone_conflict(e, "Phone number already registered to another customer")
        })?;
        log::info!("Customer updated: id={}", updated.id);
        Ok(updated.into())
    }

    /// 有订单的客户不能删除
    pub async fn delete_customer(&self, id: i32) -> AppResult<()> {
        let order_count = orders::Entity::find()
            .filter(orders::Column::CustomerId.eq(id))
            .count(&self.pool)
            .await?;
        if order_count > 0 {
            return Err(AppError::Conflict(
                "Cannot delete customer with existing orders".to_string(),
            ));
        }

        match customers::Entity::delete_by_id(id).exec(&self.pool).await {
            Ok(res) if res.rows_affected == 0 => {
                Err(AppError::NotFound("Customer not found".to_string()))
            }
            Ok(_) => {
                log::info!("Customer deleted: id={id}");
                Ok(())
            }
            // 检查与删除之间插入了订单
            Err(e) => match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(AppError::Conflict(
                    "Cannot delete customer with existing orders".to_string(),
                )),
                _ => Err(e.into()),
            },
        }
    }

    fn select_with_stats() -> Select<customers::Entity> {
        customers::Entity::find()
            .select_only()
            .column(customers::Column::Id)
            .column(customers::Column::Name)
            .column(customers::Column::Phone)
            .column(customers::Column::Email)
            .column(customers::Column::CreatedAt)
            .column_as(
                Expr::col((orders::Entity, orders::Column::Id)).count(),
                "order_count",
            )
            .column_as(
                sum_bigint((orders::Entity, orders::Column::TotalAmountCents)),
                "total_spent_cents",
            )
            .column_as(
                Expr::col((orders::Entity, orders::Column::OrderDate)).max(),
                "last_order_date",
            )
            .join(JoinType::LeftJoin, customers::Relation::Orders.def())
            .group_by(customers::Column::Id)
    }
}

fn map_phone_conflict(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message.to_string()),
        _ => AppError::DatabaseError(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::setup_pool;

    fn new_customer(name: &str, phone: &str) -> CreateCustomerRequest {
        CreateCustomerRequest {
            name: name.to_string(),
            phone: phone.to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn test_create_customer_validates_phone() {
        let service = CustomerService::new(setup_pool().await);
        for phone in ["12345", "555-123-4567", "55512345678"] {
            let err = service
                .create_customer(new_customer("Asha", phone))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)), "phone {phone}");
        }
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_conflict() {
        let service = CustomerService::new(setup_pool().await);
        service
            .create_customer(new_customer("Asha", "5551234567"))
            .await
            .unwrap();
        let err = service
            .create_customer(new_customer("Ravi", "5551234567"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == "Phone number already registered"));
    }

    #[tokio::test]
    async fn test_update_phone_conflict_and_partial_update() {
        let service = CustomerService::new(setup_pool().await);
        let asha = service
            .create_customer(CreateCustomerRequest {
                name: "Asha".to_string(),
                phone: "5551234567".to_string(),
                email: Some("asha@example.com".to_string()),
            })
            .await
            .unwrap();
        service
            .create_customer(new_customer("Ravi", "5559876543"))
            .await
            .unwrap();

        let err = service
            .update_customer(
                asha.customer_id,
                UpdateCustomerRequest {
                    phone: Some("5559876543".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = service
            .update_customer(
                asha.customer_id,
                UpdateCustomerRequest {
                    phone: Some("98765".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        // 保留自己的手机号不算冲突
        let updated = service
            .update_customer(
                asha.customer_id,
                UpdateCustomerRequest {
                    name: Some("Asha R".to_string()),
                    phone: Some("5551234567".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Asha R");
        assert_eq!(updated.email.as_deref(), Some("asha@example.com"));
    }

    #[tokio::test]
    async fn test_update_missing_customer() {
        let service = CustomerService::new(setup_pool().await);
        let err = service
            .update_customer(42, UpdateCustomerRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_customer_without_orders() {
        let service = CustomerService::new(setup_pool().await);
        let c = service
            .create_customer(new_customer("Meera", "5550001111"))
            .await
            .unwrap();
        service.delete_customer(c.customer_id).await.unwrap();

        let err = service.get_customer(c.customer_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = service.delete_customer(c.customer_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_search_customers() {
        let service = CustomerService::new(setup_pool().await);
        service
            .create_customer(CreateCustomerRequest {
                name: "Zoya Khan".to_string(),
                phone: "5552223333".to_string(),
                email: Some("zoya@Example.com".to_string()),
            })
            .await
            .unwrap();
        service
            .create_customer(new_customer("Arjun Mehta", "5554445555"))
            .await
            .unwrap();

        let by_name = service
            .list_customers(&CustomerQuery {
                search: Some("zoya".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].customer.name, "Zoya Khan");
        assert_eq!(by_name[0].order_count, 0);
        assert_eq!(by_name[0].total_spent.to_string(), "0.00");

        let by_phone = service
            .list_customers(&CustomerQuery {
                search: Some("4445".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].customer.name, "Arjun Mehta");

        let by_email = service
            .list_customers(&CustomerQuery {
                search: Some("EXAMPLE.COM".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_email.len(), 1);

        let all = service
            .list_customers(&CustomerQuery { search: None })
            .await
            .unwrap();
        let names: Vec<&str> = all.iter().map(|c| c.customer.name.as_str()).collect();
        assert_eq!(names, vec!["Arjun Mehta", "Zoya Khan"]);
    }
}
