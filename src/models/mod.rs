pub mod category;
pub mod common;
pub mod customer;
pub mod menu_item;
pub mod order;
pub mod stats;

pub use category::*;
pub use common::*;
pub use customer::*;
pub use menu_item::*;
pub use order::*;
pub use stats::*;
