use crate::entities::{category_entity as categories, menu_item_entity as menu_items};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{non_blank, positive_price_cents};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

#[derive(Clone)]
pub struct MenuService {
    pool: DatabaseConnection,
}

impl MenuService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 菜单列表，可按分类 / 是否可售过滤
    pub async fn list_menu_items(&self, query: &MenuQuery) -> AppResult<Vec<MenuItemResponse>> {
        let mut select = menu_items::Entity::find();
        if let Some(category_id) = query.category_id {
            select = select.filter(menu_items::Column::CategoryId.eq(category_id));
        }
        if let Some(available) = query.available {
            select = select.filter(menu_items::Column::IsAvailable.eq(available));
        }

        let rows = select
            .find_also_related(categories::Entity)
            .order_by_asc(menu_items::Column::CategoryId)
            .order_by_asc(menu_items::Column::Name)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(item, category)| Self::to_response(item, category))
            .collect())
    }

    pub async fn get_menu_item(&self, id: i32) -> AppResult<MenuItemResponse> {
        let (item, category) = menu_items::Entity::find_by_id(id)
            .find_also_related(categories::Entity)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))?;
        Ok(Self::to_response(item, category))
    }

    pub async fn create_menu_item(
        &self,
        request: CreateMenuItemRequest,
    ) -> AppResult<MenuItemResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Missing required fields: category_id, name, price".to_string(),
            ));
        }
        let price_cents = positive_price_cents(request.price)?;
        let category = Self::require_category(&self.pool, request.category_id).await?;

        let now = Utc::now();
        let model = menu_items::ActiveModel {
            category_id: Set(category.id),
            name: Set(name.to_string()),
            description: Set(non_blank(request.description)),
            price_cents: Set(price_cents),
            is_available: Set(request.is_available),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Menu item created: id={} name={} price_cents={}",
            model.id,
            model.name,
            model.price_cents
        );
        Ok(MenuItemResponse::from(model).with_category_name(category.name))
    }

    /// 部分更新：只覆盖请求中提供的字段
    pub async fn update_menu_item(
        &self,
        id: i32,
        request: UpdateMenuItemRequest,
    ) -> AppResult<MenuItemResponse> {
        let name = match request.name.as_deref().map(str::trim) {
            Some("") => {
                return Err(AppError::ValidationError(
                    "Menu item name cannot be empty".to_string(),
                ));
            }
            other => other.map(str::to_string),
        };
        let price_cents = request.price.map(positive_price_cents).transpose()?;

        let existing = self.find_model(id).await?;
        let mut model = existing.into_active_model();
        if let Some(category_id) = request.category_id {
            Self::require_category(&self.pool, category_id).await?;
            model.category_id = Set(category_id);
        }
        if let Some(name) = name {
            model.name = Set(name);
        }
        if let Some(description) = request.description {
            model.description = Set(non_blank(Some(description)));
        }
        if let Some(cents) = price_cents {
            model.price_cents = Set(cents);
        }
        if let Some(available) = request.is_available {
            model.is_available = Set(available);
        }
        model.updated_at = Set(Utc::now());
        let updated = model.update(&self.pool).await?;

        self.with_category_name(updated).await
    }

    /// 切换可售状态，调用两次恢复原值
    pub async fn toggle_availability(&self, id: i32) -> AppResult<MenuItemResponse> {
        let existing = self.find_model(id).await?;
        let flipped = !existing.is_available;
        let mut model = existing.into_active_model();
        model.is_available = Set(flipped);
        model.updated_at = Set(Utc::now());
        let updated = model.update(&self.pool).await?;

        log::info!("Menu item {} availability set to {}", updated.id, flipped);
        self.with_category_name(updated).await
    }

    /// 已被订单明细引用的菜单项不能删除
    pub async fn delete_menu_item(&self, id: i32) -> AppResult<()> {
        let result = menu_items::Entity::delete_by_id(id).exec(&self.pool).await;
        match result {
            Ok(res) if res.rows_affected == 0 => {
                Err(AppError::NotFound("Menu item not found".to_string()))
            }
            Ok(_) => {
                log::info!("Menu item deleted: id={id}");
                Ok(())
            }
            Err(e) => match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(AppError::Conflict(
                    "Cannot delete menu item referenced by existing orders".to_string(),
                )),
                _ => Err(e.into()),
            },
        }
    }

    async fn find_model(&self, id: i32) -> AppResult<menu_items::Model> {
        menu_items::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))
    }

    async fn with_category_name(&self, item: menu_items::Model) -> AppResult<MenuItemResponse> {
        let category = item.find_related(categories::Entity).one(&self.pool).await?;
        Ok(Self::to_response(item, category))
    }

    async fn require_category<C: ConnectionTrait>(
        db: &C,
        category_id: i32,
    ) -> AppResult<categories::Model> {
        categories::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {category_id} not found")))
    }

    fn to_response(
        item: menu_items::Model,
        category: Option<categories::Model>,
    ) -> MenuItemResponse {
        let response = MenuItemResponse::from(item);
        match category {
            Some(c) => response.with_category_name(c.name),
            None => response,
        }
    }
}
