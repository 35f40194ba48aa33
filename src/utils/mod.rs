//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 슬러그 생성
//! - [`bson_utils`] - ObjectId 파싱, BSON 시간 변환

pub mod string_utils;
pub mod bson_utils;
