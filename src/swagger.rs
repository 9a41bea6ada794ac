use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{OrderStatus, OrderType};
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::category::list_categories,
        handlers::category::create_category,
        handlers::menu::list_menu_items,
        handlers::menu::get_menu_item,
        handlers::menu::create_menu_item,
        handlers::menu::update_menu_item,
        handlers::menu::toggle_availability,
        handlers::menu::delete_menu_item,
        handlers::customer::list_customers,
        handlers::customer::get_customer,
        handlers::customer::create_customer,
        handlers::customer::update_customer,
        handlers::customer::delete_customer,
        handlers::order::list_orders,
        handlers::order::get_order,
        handlers::order::create_order,
        handlers::order::update_order,
        handlers::order::delete_order,
        handlers::stats::get_stats,
    ),
    components(
        schemas(
            CategoryResponse,
            CategoryWithCount,
            CreateCategoryRequest,
            MenuItemResponse,
            CreateMenuItemRequest,
            UpdateMenuItemRequest,
            CustomerResponse,
            CustomerSummary,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            OrderStatus,
            OrderType,
            OrderResponse,
            OrderItemResponse,
            OrderWithItems,
            OrderListItem,
            OrderDetailItem,
            OrderDetail,
            OrderLineRequest,
            CreateOrderRequest,
            UpdateOrderRequest,
            StatsSummary,
            StatusCount,
            TopSellingItem,
            RecentOrder,
            RevenueByType,
            DashboardStats,
        )
    ),
    tags(
        (name = "category", description = "Menu categories"),
        (name = "menu", description = "Menu items"),
        (name = "customer", description = "Customer registration and lookup"),
        (name = "order", description = "Order workflow"),
        (name = "stats", description = "Dashboard reporting"),
    ),
    info(
        title = "Restaurant Backend API",
        version = "1.0.0",
        description = "Restaurant order management REST API"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
