//! 카탈로그 엔티티 (카테고리, 상품)

pub mod category;
pub mod product;
