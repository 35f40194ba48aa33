//! # Domain Layer
//!
//! - [`entities`] - MongoDB에 저장되는 문서
//! - [`dto`] - HTTP 요청/응답 본문
//! - [`models`] - 인증 컨텍스트, 토큰 클레임, 외부 API 와이어 타입

pub mod entities;
pub mod dto;
pub mod models;
