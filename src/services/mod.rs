pub mod category_service;
pub mod customer_service;
pub mod menu_service;
pub mod order_service;
pub mod stats_service;

pub use category_service::*;
pub use customer_service::*;
pub use menu_service::*;
pub use order_service::*;
pub use stats_service::*;
