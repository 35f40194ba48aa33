//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 세션 인증 (AuthMiddleware)
//! - `CustomerToken` 쿠키, 없으면 `Authorization: Bearer` 헤더의 JWT 검증
//! - 사용자 정보를 request extension에 저장
//! - 선택적/필수/관리자 모드
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new()
//!     .wrap(AuthMiddleware::optional()) // 모든 라우트에 선택적 인증
//!     .service(
//!         web::scope("/cart")
//!             .wrap(AuthMiddleware::required()) // 로그인 필수
//!             .route("", web::get().to(get_cart))
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
