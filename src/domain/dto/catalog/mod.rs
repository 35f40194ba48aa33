//! 카탈로그(카테고리, 상품) DTO

pub mod category;
pub mod product;

pub use category::*;
pub use product::*;
