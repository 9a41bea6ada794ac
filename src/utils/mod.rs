pub mod money;
pub mod phone;
pub mod text;

pub use money::*;
pub use phone::*;
pub use text::*;
