//! 요청 처리 과정에서 쓰이는 비영속 모델
//!
//! - [`auth`] - 인증된 사용자, 인증 모드/역할 요구사항
//! - [`token`] - JWT 클레임
//! - [`external`] - 결제 게이트웨이, 이미지 호스트 API 와이어 타입

pub mod auth;
pub mod token;
pub mod external;
