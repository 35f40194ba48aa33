//! 사용자 관리 서비스 모듈
//!
//! # Features
//!
//! - 회원가입, 로그인 (bcrypt + JWT 세션 쿠키)
//! - 프로필/비밀번호 변경, 계정 삭제
//! - 이름, 전화번호, 배송지 관리
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::instance();
//! let response = user_service.signup(request).await?;
//! ```

pub mod user_service;
pub mod user_details_service;

pub use user_service::UserService;
pub use user_details_service::UserDetailsService;
