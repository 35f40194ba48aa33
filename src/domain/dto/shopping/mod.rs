//! 장바구니/위시리스트 DTO

pub mod cart;
pub mod wishlist;

pub use cart::*;
pub use wishlist::*;
