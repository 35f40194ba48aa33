use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::engagement::feedback::Feedback;
use crate::utils::bson_utils::to_chrono;
use crate::utils::string_utils::deserialize_optional_string;

/// 피드백 제출 (비로그인 허용)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFeedbackRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "이름은 100자 이하여야 합니다"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[validate(range(min = 1, max = 5, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: Option<i32>,

    #[validate(length(min = 1, max = 2000, message = "내용은 1-2000자 사이여야 합니다"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub id: String,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub rating: Option<i32>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: feedback.user_id.map(|id| id.to_hex()),
            name: feedback.name,
            email: feedback.email,
            rating: feedback.rating,
            message: feedback.message,
            created_at: to_chrono(feedback.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_feedback_is_valid() {
        let req: CreateFeedbackRequest =
            serde_json::from_str(r#"{"message": "Fast delivery!", "email": ""}"#).unwrap();
        assert!(req.email.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_message_rejected() {
        let req: CreateFeedbackRequest =
            serde_json::from_str(r#"{"message": "", "rating": 4}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
