//! # Core Framework Module
//!
//! 백엔드 전역에서 쓰이는 기반 기능을 모아 둔 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 서비스 로케이터
//! - **ServiceLocator**: 타입 기반 싱글톤 저장소 (`Arc<T>`)
//! - **Service / Repository**: `#[service]`, `#[repository]` 매크로가 구현하는 trait
//! - **ServiceRegistration / RepositoryRegistration**: `inventory`로 수집되는 등록 정보
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현으로 상태 코드 변환을 한 곳에서 처리
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::core::registry::ServiceLocator;
//!
//! // main.rs
//! ServiceLocator::set(Arc::new(database));
//! ServiceLocator::set(Arc::new(redis_client));
//! ServiceLocator::initialize_all().await?;
//!
//! // 핸들러
//! let service = ProductService::instance();
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
