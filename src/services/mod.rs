//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `#[service(name = ..)]` 매크로로 싱글톤이 되며, `Arc<T>` 필드는
//! [`ServiceLocator`](crate::core::registry::ServiceLocator)에서 주입됩니다.
//! 핸들러는 `XxxService::instance()`로 꺼내 씁니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{catalog::ProductService, shopping::CartService};
//!
//! let product_service = ProductService::instance();
//! let cart = CartService::instance().get(&user_id).await?;
//! ```

pub mod auth;
pub mod users;
pub mod catalog;
pub mod shopping;
pub mod engagement;
pub mod media;
pub mod payments;
