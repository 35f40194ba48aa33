//! 쇼핑 흐름 엔티티 (장바구니, 위시리스트, 주문)

pub mod cart;
pub mod wishlist;
pub mod order;
