//! 장바구니, 위시리스트, 주문 리포지토리

pub mod cart_repo;
pub mod wishlist_repo;
pub mod order_repo;

pub use cart_repo::CartRepository;
pub use wishlist_repo::WishlistRepository;
pub use order_repo::OrderRepository;
