//! # HTTP Request Handlers Module
//!
//! 리소스별 HTTP 엔드포인트 핸들러입니다. 모든 핸들러는
//! `Result<HttpResponse, AppError>`를 반환하고, 상태 코드 변환은 `AppError`가 맡습니다.
//!
//! ```text
//!   Handlers (이 모듈) - 요청 검증, 응답 조립      ← Web Layer
//!   Services - 비즈니스 로직                      ← Service Layer
//!   Repositories - MongoDB 컬렉션 접근            ← Repository Layer
//! ```
//!
//! ## 공통 패턴
//!
//! ```rust,ignore
//! #[post("/items")]
//! pub async fn add_item(
//!     user: AuthenticatedUser,                  // 세션 없으면 401
//!     payload: web::Json<AddCartItemRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()?;                      // 400
//!     let service = CartService::instance();
//!     Ok(HttpResponse::Ok().json(service.add_item(&user.object_id()?, payload.into_inner()).await?))
//! }
//! ```
//!
//! 관리자 전용 핸들러는 `user.require_admin()?`(403)로 시작합니다.

pub mod session;
pub mod users;
pub mod user_details;
pub mod messages;
pub mod categories;
pub mod products;
pub mod cart;
pub mod wishlist;
pub mod reviews;
pub mod feedback;
pub mod images;
pub mod payments;
