pub mod category;
pub mod customer;
pub mod menu;
pub mod order;
pub mod stats;

pub use category::category_config;
pub use customer::customer_config;
pub use menu::menu_config;
pub use order::order_config;
pub use stats::stats_config;

use actix_web::web;

use crate::error::{AppError, AppResult};

/// 路径中的 id 必须是整数，否则返回 `Invalid {entity} ID`
pub(crate) fn parse_id(raw: &str, entity: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::ValidationError(format!("Invalid {entity} ID")))
}

/// JSON / query 反序列化失败统一返回 400 包装
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .configure(category_config)
    .configure(menu_config)
    .configure(customer_config)
    .configure(order_config)
    .configure(stats_config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "order").unwrap(), 42);
        let err = parse_id("abc", "order").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg == "Invalid order ID"));
        assert!(parse_id("1.5", "menu item").is_err());
    }
}
