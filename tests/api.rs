use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use restaurant_backend::config::DatabaseConfig;
use restaurant_backend::database::{DbPool, create_pool, run_migrations};
use restaurant_backend::handlers;
use restaurant_backend::services::*;

async fn setup_pool() -> DbPool {
    let mut config = DatabaseConfig::new("sqlite::memory:");
    config.max_connections = 1;
    config.min_connections = 1;
    config.idle_timeout_secs = 3600;
    let pool = create_pool(&config).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

macro_rules! app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(CategoryService::new($pool.clone())))
                .app_data(web::Data::new(MenuService::new($pool.clone())))
                .app_data(web::Data::new(CustomerService::new($pool.clone())))
                .app_data(web::Data::new(OrderService::new($pool.clone())))
                .app_data(web::Data::new(StatsService::new($pool.clone())))
                .service(web::scope("/api").configure(handlers::api_config)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_order_lifecycle_end_to_end() {
    let pool = setup_pool().await;
    let app = app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .set_json(json!({"name": "Mains"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let category_id = body["data"]["category_id"].as_i64().unwrap();

    let mut menu_ids = Vec::new();
    for (name, price) in [("Thali", json!(100)), ("Lassi", json!("50.00"))] {
        let req = test::TestRequest::post()
            .uri("/api/menu")
            .set_json(json!({"category_id": category_id, "name": name, "price": price}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["is_available"], true);
        menu_ids.push(body["data"]["menu_item_id"].as_i64().unwrap());
    }

    let req = test::TestRequest::post()
        .uri("/api/customers")
        .set_json(json!({"name": "Asha", "phone": "5551234567"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let customer_id = body["data"]["customer_id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/orders")
        .set_json(json!({
            "customer_id": customer_id,
            "order_type": "dine-in",
            "items": [
                {"menu_item_id": menu_ids[0], "quantity": 2},
                {"menu_item_id": menu_ids[1], "quantity": 1}
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Order created successfully");
    assert_eq!(body["data"]["total_amount"], "250.00");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    let order_id = body["data"]["order_id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/orders/{order_id}"))
        .set_json(json!({"status": "delivered"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Order updated successfully");
    assert_eq!(body["data"]["status"], "delivered");

    let req = test::TestRequest::get()
        .uri(&format!("/api/orders/{order_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["customer_name"], "Asha");
    assert_eq!(body["data"]["items"][0]["subtotal"], "200.00");

    let req = test::TestRequest::get().uri("/api/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let stats = &body["data"];
    assert_eq!(stats["summary"]["totalOrders"], 1);
    assert_eq!(stats["summary"]["totalRevenue"], "250.00");
    assert_eq!(stats["ordersByStatus"], json!([{"status": "delivered", "count": 1}]));
    assert_eq!(stats["topSellingItems"][0]["name"], "Thali");
    assert_eq!(stats["revenueByType"][0]["order_type"], "dine-in");

    let req = test::TestRequest::get()
        .uri(&format!("/api/orders?customer_id={customer_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/customers/{customer_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/orders/{order_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Order deleted successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/api/orders/{order_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_bad_input_returns_400_envelope() {
    let pool = setup_pool().await;
    let app = app!(pool);

    let req = test::TestRequest::get().uri("/api/orders/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid order ID");

    let req = test::TestRequest::post()
        .uri("/api/customers")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    let req = test::TestRequest::post()
        .uri("/api/customers")
        .set_json(json!({"name": "Ravi", "phone": "12345"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Phone must be a 10-digit number");

    let req = test::TestRequest::get()
        .uri("/api/menu?available=maybe")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/orders?status=archived")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/customers/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_toggle_availability_twice_restores_value() {
    let pool = setup_pool().await;
    let app = app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .set_json(json!({"name": "Desserts"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let category_id = body["data"]["category_id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/menu")
        .set_json(json!({"category_id": category_id, "name": "Kulfi", "price": 4.5}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["menu_item_id"].as_i64().unwrap();
    assert_eq!(body["data"]["price"], "4.50");

    for expected in [false, true] {
        let req = test::TestRequest::patch()
            .uri(&format!("/api/menu/{id}/availability"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["is_available"], expected);
    }

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["item_count"], 1);
}

#[actix_web::test]
async fn test_oversized_price_returns_400() {
    let pool = setup_pool().await;
    let app = app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .set_json(json!({"name": "Specials"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let category_id = body["data"]["category_id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/menu")
        .set_json(json!({
            "category_id": category_id,
            "name": "Gold",
            "price": "79228162514264337593543950335"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Amount out of range"));

    let req = test::TestRequest::post()
        .uri("/api/menu")
        .set_json(json!({"category_id": category_id, "name": "Crumb", "price": "0.001"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Price must be at least 0.01");
}
