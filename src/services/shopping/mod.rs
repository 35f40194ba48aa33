//! 장바구니, 위시리스트 서비스

pub mod cart_service;
pub mod wishlist_service;

pub use cart_service::CartService;
pub use wishlist_service::WishlistService;
