//! 상품 리뷰 엔티티 (`reviews` 컬렉션)
//!
//! 사용자는 상품당 하나의 리뷰만 남길 수 있습니다 (`product_user_unique` 인덱스).

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub product_id: ObjectId,
    pub user_id: ObjectId,
    pub author_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Review {
    pub fn new(product_id: ObjectId, user_id: ObjectId, author_name: String, rating: i32, comment: String) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            product_id,
            user_id,
            author_name,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 상품에 비정규화해 저장하는 평점 요약
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub average: f64,
    pub count: i64,
}

impl RatingSummary {
    /// 집계 결과(평균, 개수)를 소수점 첫째 자리로 반올림해 요약합니다.
    pub fn new(raw_average: f64, count: i64) -> Self {
        if count <= 0 || !raw_average.is_finite() {
            return Self::default();
        }

        Self {
            average: (raw_average * 10.0).round() / 10.0,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rounds_to_one_decimal() {
        let summary = RatingSummary::new(13.0 / 3.0, 3);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 4.3);

        assert_eq!(RatingSummary::new(3.666_666, 3).average, 3.7);
        assert_eq!(RatingSummary::new(4.25, 4).average, 4.3);
    }

    #[test]
    fn test_empty_summary_resets() {
        assert_eq!(RatingSummary::new(0.0, 0), RatingSummary { average: 0.0, count: 0 });
        assert_eq!(RatingSummary::new(4.0, -1), RatingSummary::default());
        assert_eq!(RatingSummary::new(f64::NAN, 2), RatingSummary::default());
    }

    #[test]
    fn test_new_review_timestamps() {
        let review = Review::new(ObjectId::new(), ObjectId::new(), "kim".into(), 5, "good".into());
        assert!(review.id.is_none());
        assert_eq!(review.created_at, review.updated_at);
    }
}
