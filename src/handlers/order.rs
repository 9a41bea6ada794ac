use actix_web::{HttpResponse, ResponseError, Result, web};

use super::parse_id;
use crate::models::*;
use crate::services::OrderService;

const ENTITY: &str = "order";

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    params(
        ("status" = Option<String>, Query, description = "pending, preparing, ready, delivered or cancelled"),
        ("customer_id" = Option<i32>, Query, description = "Filter by customer")
    ),
    responses(
        (status = 200, description = "Orders, newest first", body = Vec<OrderListItem>),
        (status = 400, description = "Invalid status filter")
    )
)]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    match order_service.list_orders(&query).await {
        Ok(orders) => Ok(HttpResponse::Ok().json(ApiResponse::list(orders))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "order",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with customer and line items", body = OrderDetail),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    order_service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = match parse_id(&path, ENTITY) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match order_service.get_order(id).await {
        Ok(order) => Ok(HttpResponse::Ok().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderWithItems),
        (status = 400, description = "Invalid order"),
        (status = 404, description = "Customer or menu item not found")
    )
)]
pub async fn create_order(
    order_service: web::Data<OrderService>,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    match order_service.create_order(request.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            order,
            "Order created successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/orders/{id}",
    tag = "order",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order(
    order_service: web::Data<OrderService>,
    path: web::Path<String>,
    request: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse> {
    let id = match parse_id(&path, ENTITY) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match order_service.update_order_status(id, request.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            order,
            "Order updated successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "order",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order and its items deleted"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    order_service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = match parse_id(&path, ENTITY) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match order_service.delete_order(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Order deleted successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(list_orders))
            .route("", web::post().to(create_order))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}", web::patch().to(update_order))
            .route("/{id}", web::delete().to(delete_order)),
    );
}
