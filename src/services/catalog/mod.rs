//! 카탈로그 서비스 (카테고리, 상품)

pub mod category_service;
pub mod product_service;

pub use category_service::CategoryService;
pub use product_service::ProductService;
