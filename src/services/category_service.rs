use crate::entities::{category_entity as categories, menu_item_entity as menu_items};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, JoinType, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

#[derive(Clone)]
pub struct CategoryService {
    pool: DatabaseConnection,
}

impl CategoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 分类列表（含菜单项数量），按名称排序
    pub async fn list_categories(&self) -> AppResult<Vec<CategoryWithCount>> {
        let rows = categories::Entity::find()
            .select_only()
            .column_as(categories::Column::Id, "category_id")
            .column(categories::Column::Name)
            .column(categories::Column::Description)
            .column(categories::Column::CreatedAt)
            .column_as(
                Expr::col((menu_items::Entity, menu_items::Column::Id)).count(),
                "item_count",
            )
            .join(JoinType::LeftJoin, categories::Relation::MenuItems.def())
            .group_by(categories::Column::Id)
            .order_by_asc(categories::Column::Name)
            .into_model::<CategoryWithCount>()
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create_category(&self, request: CreateCategoryRequest) -> AppResult<CategoryResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Category name is required".to_string(),
            ));
        }

        let model = categories::ActiveModel {
            name: Set(name.to_string()),
            description: Set(request.description.filter(|d| !d.trim().is_empty())),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Category created: id={} name={}", model.id, model.name);
        Ok(model.into())
    }
}
