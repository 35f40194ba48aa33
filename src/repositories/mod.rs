//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 리포지토리는 `#[repository(name = .., collection = ..)]` 매크로로 싱글톤이 되며,
//! `db` 필드는 `ServiceLocator`에 등록된 `Database`로 주입됩니다.
//! 인덱스는 [`base::ensure_all_indexes`]가 시작 시 생성합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::UserRepository;
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod base;
pub mod users;
pub mod catalog;
pub mod shopping;
pub mod engagement;
