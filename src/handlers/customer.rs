use actix_web::{HttpResponse, ResponseError, Result, web};

use super::parse_id;
use crate::models::*;
use crate::services::CustomerService;

const ENTITY: &str = "customer";

#[utoipa::path(
    get,
    path = "/customers",
    tag = "customer",
    params(
        ("search" = Option<String>, Query, description = "Match name, phone or email")
    ),
    responses(
        (status = 200, description = "Customers with order statistics", body = Vec<CustomerSummary>)
    )
)]
pub async fn list_customers(
    customer_service: web::Data<CustomerService>,
    query: web::Query<CustomerQuery>,
) -> Result<HttpResponse> {
    match customer_service.list_customers(&query).await {
        Ok(customers) => Ok(HttpResponse::Ok().json(ApiResponse::list(customers))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customer",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer", body = CustomerSummary),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    customer_service: web::Data<CustomerService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = match parse_id(&path, ENTITY) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match customer_service.get_customer(id).await {
        Ok(customer) => Ok(HttpResponse::Ok().json(ApiResponse::success(customer))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/customers",
    tag = "customer",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer registered", body = CustomerResponse),
        (status = 400, description = "Invalid name or phone"),
        (status = 409, description = "Phone number already registered")
    )
)]
pub async fn create_customer(
    customer_service: web::Data<CustomerService>,
    request: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse> {
    match customer_service.create_customer(request.into_inner()).await {
        Ok(customer) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            customer,
            "Customer created successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customer",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 400, description = "Invalid name or phone"),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Phone number already registered to another customer")
    )
)]
pub async fn update_customer(
    customer_service: web::Data<CustomerService>,
    path: web::Path<String>,
    request: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse> {
    let id = match parse_id(&path, ENTITY) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match customer_service.update_customer(id, request.into_inner()).await {
        Ok(customer) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            customer,
            "Customer updated successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customer",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Customer has existing orders")
    )
)]
pub async fn delete_customer(
    customer_service: web::Data<CustomerService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = match parse_id(&path, ENTITY) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match customer_service.delete_customer(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Customer deleted successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn customer_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::get().to(list_customers))
            .route("", web::post().to(create_customer))
            .route("/{id}", web::get().to(get_customer))
            .route("/{id}", web::put().to(update_customer))
            .route("/{id}", web::delete().to(delete_customer)),
    );
}
