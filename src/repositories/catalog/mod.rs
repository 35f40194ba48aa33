//! 카탈로그 리포지토리

pub mod category_repo;
pub mod product_repo;

pub use category_repo::CategoryRepository;
pub use product_repo::ProductRepository;
