use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::engagement::review::Review;
use crate::utils::bson_utils::to_chrono;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, message = "상품 ID가 필요합니다"))]
    pub product_id: String,

    #[validate(range(min = 1, max = 5, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: i32,

    #[serde(default)]
    #[validate(length(max = 2000, message = "리뷰는 2000자 이하여야 합니다"))]
    pub comment: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: Option<i32>,

    #[validate(length(max = 2000, message = "리뷰는 2000자 이하여야 합니다"))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub author_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.map(|id| id.to_hex()).unwrap_or_default(),
            product_id: review.product_id.to_hex(),
            user_id: review.user_id.to_hex(),
            author_name: review.author_name,
            rating: review.rating,
            comment: review.comment,
            created_at: to_chrono(review.created_at),
            updated_at: to_chrono(review.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let mut req = CreateReviewRequest {
            product_id: "507f1f77bcf86cd799439011".to_string(),
            rating: 6,
            comment: String::new(),
        };
        assert!(req.validate().is_err());
        req.rating = 5;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_comment_length_limit() {
        let req = UpdateReviewRequest {
            rating: None,
            comment: Some("x".repeat(2001)),
        };
        assert!(req.validate().is_err());
    }
}
