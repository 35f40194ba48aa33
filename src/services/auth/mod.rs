//! 인증 서비스 모듈
//!
//! JWT 세션 토큰의 발급과 검증을 담당합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명
//! - 토큰 만료 시간 관리 (`JWT_EXPIRATION_HOURS`)
//! - http-only 세션 쿠키 (`CustomerToken`)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::instance()?;
//! let issued = token_service.issue(&user)?;
//! let claims = token_service.verify(&issued.token)?;
//! ```

pub mod token_service;

pub use token_service::*;
