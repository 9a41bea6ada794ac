pub mod categories;
pub mod customers;
pub mod menu_items;
pub mod order_items;
pub mod orders;

pub use categories as category_entity;
pub use customers as customer_entity;
pub use menu_items as menu_item_entity;
pub use order_items as order_item_entity;
pub use orders as order_entity;
pub use orders::{OrderStatus, OrderType};
