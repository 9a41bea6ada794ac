use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::CategoryService;

#[utoipa::path(
    get,
    path = "/categories",
    tag = "category",
    responses(
        (status = 200, description = "Categories with item counts", body = Vec<CategoryWithCount>)
    )
)]
pub async fn list_categories(category_service: web::Data<CategoryService>) -> Result<HttpResponse> {
    match category_service.list_categories().await {
        Ok(categories) => Ok(HttpResponse::Ok().json(ApiResponse::list(categories))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/categories",
    tag = "category",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_category(
    category_service: web::Data<CategoryService>,
    request: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse> {
    match category_service.create_category(request.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            category,
            "Category created successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn category_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category)),
    );
}
