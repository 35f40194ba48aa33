//! BSON 값 변환 헬퍼
//!
//! 경로 파라미터의 ObjectId 파싱과 BSON 시간값의 chrono 변환을 담당합니다.

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime};
use crate::core::errors::{AppError, AppResult};

/// 24자리 16진수 문자열을 ObjectId로 변환합니다.
///
/// # Errors
///
/// * `AppError::ValidationError` - 형식이 잘못된 경우
pub fn parse_object_id(id: &str, label: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError(format!("유효하지 않은 {} ID 형식입니다", label)))
}

/// BSON DateTime → `chrono::DateTime<Utc>` (응답 직렬화용)
pub fn to_chrono(value: DateTime) -> ChronoDateTime<Utc> {
    ChronoDateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let id = parse_object_id("507f1f77bcf86cd799439011", "상품").unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");

        let error = parse_object_id("not-an-id", "상품").unwrap_err();
        assert!(matches!(error, AppError::ValidationError(msg) if msg.contains("상품")));
    }

    #[test]
    fn test_to_chrono_preserves_millis() {
        let bson_time = DateTime::from_millis(1_700_000_000_123);
        assert_eq!(to_chrono(bson_time).timestamp_millis(), 1_700_000_000_123);
    }
}
