use std::sync::Arc;
use mongodb::bson::{oid::ObjectId, DateTime};
use singleton_macro::service;
use crate::{
    core::errors::AppResult,
    domain::{
        dto::{
            common::{PageQuery, Paginated},
            engagement::feedback::{CreateFeedbackRequest, FeedbackResponse},
        },
        entities::engagement::feedback::Feedback,
    },
    repositories::engagement::FeedbackRepository,
    utils::string_utils::validate_required_string,
};

#[service(name = "feedback")]
pub struct FeedbackService {
    feedback_repo: Arc<FeedbackRepository>,
}

impl FeedbackService {
    /// 로그인 사용자가 보낸 경우 `user_id`를 함께 기록합니다.
    pub async fn submit(&self, user_id: Option<ObjectId>, request: CreateFeedbackRequest) -> AppResult<FeedbackResponse> {
        let feedback = Feedback {
            id: None,
            user_id,
            name: request.name,
            email: request.email.map(|email| email.to_lowercase()),
            rating: request.rating,
            message: validate_required_string(&request.message, "피드백 내용")?,
            created_at: DateTime::now(),
        };

        let created = self.feedback_repo.create(feedback).await?;
        log::info!("💬 피드백 접수 (rating={:?})", created.rating);

        Ok(FeedbackResponse::from(created))
    }

    pub async fn list(&self, query: &PageQuery) -> AppResult<Paginated<FeedbackResponse>> {
        let (items, total) = self.feedback_repo.list(query.skip(), query.limit()).await?;
        Ok(Paginated::new(items, query, total).map(FeedbackResponse::from))
    }
}
