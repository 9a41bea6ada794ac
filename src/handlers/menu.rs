use actix_web::{HttpResponse, ResponseError, Result, web};

use super::parse_id;
use crate::models::*;
use crate::services::MenuService;

const ENTITY: &str = "menu item";

#[utoipa::path(
    get,
    path = "/menu",
    tag = "menu",
    params(
        ("category_id" = Option<i32>, Query, description = "Filter by category"),
        ("available" = Option<bool>, Query, description = "Filter by availability")
    ),
    responses(
        (status = 200, description = "Menu items", body = Vec<MenuItemResponse>)
    )
)]
pub async fn list_menu_items(
    menu_service: web::Data<MenuService>,
    query: web::Query<MenuQuery>,
) -> Result<HttpResponse> {
    match menu_service.list_menu_items(&query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::list(items))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/menu/{id}",
    tag = "menu",
    params(("id" = i32, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Menu item", body = MenuItemResponse),
        (status = 404, description = "Menu item not found")
    )
)]
pub async fn get_menu_item(
    menu_service: web::Data<MenuService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = match parse_id(&path, ENTITY) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match menu_service.get_menu_item(id).await {
        Ok(item) => Ok(HttpResponse::Ok().json(ApiResponse::success(item))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/menu",
    tag = "menu",
    request_body = CreateMenuItemRequest,
    responses(
        (status = 201, description = "Menu item created", body = MenuItemResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn create_menu_item(
    menu_service: web::Data<MenuService>,
    request: web::Json<CreateMenuItemRequest>,
) -> Result<HttpResponse> {
    match menu_service.create_menu_item(request.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            item,
            "Menu item created successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/menu/{id}",
    tag = "menu",
    params(("id" = i32, Path, description = "Menu item ID")),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = MenuItemResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Menu item not found")
    )
)]
pub async fn update_menu_item(
    menu_service: web::Data<MenuService>,
    path: web::Path<String>,
    request: web::Json<UpdateMenuItemRequest>,
) -> Result<HttpResponse> {
    let id = match parse_id(&path, ENTITY) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match menu_service.update_menu_item(id, request.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            item,
            "Menu item updated successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/menu/{id}/availability",
    tag = "menu",
    params(("id" = i32, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Availability toggled", body = MenuItemResponse),
        (status = 404, description = "Menu item not found")
    )
)]
pub async fn toggle_availability(
    menu_service: web::Data<MenuService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = match parse_id(&path, ENTITY) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match menu_service.toggle_availability(id).await {
        Ok(item) => Ok(HttpResponse::Ok().json(ApiResponse::success(item))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/menu/{id}",
    tag = "menu",
    params(("id" = i32, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Menu item deleted"),
        (status = 404, description = "Menu item not found"),
        (status = 409, description = "Menu item is referenced by orders")
    )
)]
pub async fn delete_menu_item(
    menu_service: web::Data<MenuService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = match parse_id(&path, ENTITY) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match menu_service.delete_menu_item(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Menu item deleted successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn menu_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/menu")
            .route("", web::get().to(list_menu_items))
            .route("", web::post().to(create_menu_item))
            .route("/{id}", web::get().to(get_menu_item))
            .route("/{id}", web::put().to(update_menu_item))
            .route("/{id}", web::delete().to(delete_menu_item))
            .route("/{id}/availability", web::patch().to(toggle_availability)),
    );
}
