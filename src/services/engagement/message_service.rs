//! 문의하기 메시지 접수와 관리자 처리

use std::sync::Arc;
use mongodb::bson::{oid::ObjectId, DateTime};
use singleton_macro::service;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::{
            common::{PageQuery, Paginated},
            engagement::message::{CreateMessageRequest, MessageResponse},
        },
        entities::engagement::message::ContactMessage,
    },
    repositories::engagement::MessageRepository,
    utils::{bson_utils::parse_object_id, string_utils::validate_required_string},
};

#[service(name = "message")]
pub struct MessageService {
    message_repo: Arc<MessageRepository>,
}

impl MessageService {
    pub async fn submit(&self, user_id: Option<ObjectId>, request: CreateMessageRequest) -> AppResult<MessageResponse> {
        let now = DateTime::now();
        let message = ContactMessage {
            id: None,
            user_id,
            name: validate_required_string(&request.name, "이름")?,
            email: request.email.trim().to_lowercase(),
            subject: validate_required_string(&request.subject, "제목")?,
            body: validate_required_string(&request.body, "내용")?,
            is_read: false,
            created_at: now,
            updated_at: now,
        };

        let created = self.message_repo.create(message).await?;
        log::info!("📨 문의 접수: {}", created.id.map(|id| id.to_hex()).unwrap_or_default());

        Ok(MessageResponse::from(created))
    }

    pub async fn list(&self, query: &PageQuery) -> AppResult<Paginated<MessageResponse>> {
        let (items, total) = self.message_repo.list(query.skip(), query.limit()).await?;
        Ok(Paginated::new(items, query, total).map(MessageResponse::from))
    }

    pub async fn mark_read(&self, id: &str) -> AppResult<MessageResponse> {
        let object_id = parse_object_id(id, "메시지")?;
        self.message_repo
            .mark_read(&object_id)
            .await?
            .map(MessageResponse::from)
            .ok_or_else(|| AppError::NotFound("메시지를 찾을 수 없습니다".to_string()))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id, "메시지")?;
        if !self.message_repo.delete(&object_id).await? {
            return Err(AppError::NotFound("메시지를 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }
}
