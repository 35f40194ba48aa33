use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::engagement::message::ContactMessage;
use crate::utils::bson_utils::to_chrono;

/// 문의하기 폼
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자 사이여야 합니다"))]
    pub name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 150, message = "제목은 150자 이하여야 합니다"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "내용은 1-5000자 사이여야 합니다"))]
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for MessageResponse {
    fn from(message: ContactMessage) -> Self {
        Self {
            id: message.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: message.user_id.map(|id| id.to_hex()),
            name: message.name,
            email: message.email,
            subject: message.subject,
            body: message.body,
            is_read: message.is_read,
            created_at: to_chrono(message.created_at),
        }
    }
}
