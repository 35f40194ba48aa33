//! # 리뷰 서비스
//!
//! 리뷰를 작성/수정/삭제할 때마다 저장된 리뷰 전체를 다시 집계해
//! 상품의 `average_rating`(소수 첫째 자리 반올림)과 `review_count`를 갱신합니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::service;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::{
            common::{PageQuery, Paginated},
            engagement::review::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest},
        },
        entities::engagement::review::Review,
        models::auth::authenticated_user::AuthenticatedUser,
    },
    repositories::{engagement::ReviewRepository, users::UserRepository},
    services::catalog::ProductService,
    utils::bson_utils::parse_object_id,
};

#[service(name = "review")]
pub struct ReviewService {
    review_repo: Arc<ReviewRepository>,
    user_repo: Arc<UserRepository>,
    product_service: Arc<ProductService>,
}

impl ReviewService {
    pub async fn list_for_product(&self, product_id: &str, query: &PageQuery) -> AppResult<Paginated<ReviewResponse>> {
        let product_id = parse_object_id(product_id, "상품")?;
        self.product_service.find(&product_id).await?;

        let (reviews, total) = self
            .review_repo
            .find_by_product(&product_id, query.skip(), query.limit())
            .await?;

        Ok(Paginated::new(reviews, query, total).map(ReviewResponse::from))
    }

    /// 리뷰 작성
    ///
    /// # Errors
    ///
    /// * `NotFound` - 상품이 없거나 판매 중이 아님
    /// * `ConflictError` - 이미 같은 상품에 리뷰를 작성함
    pub async fn create(&self, author: &AuthenticatedUser, request: CreateReviewRequest) -> AppResult<ReviewResponse> {
        let user_id = author.object_id()?;
        let product_id = parse_object_id(&request.product_id, "상품")?;
        self.product_service.find_active(&product_id).await?;

        let author_name = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .map(|user| user.display_name)
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        let review = Review::new(
            product_id,
            user_id,
            author_name,
            request.rating,
            request.comment.trim().to_string(),
        );

        let created = self.review_repo.create(review).await?;
        self.refresh_rating(&product_id).await?;

        log::info!("⭐ 리뷰 작성: product={} rating={}", product_id, created.rating);
        Ok(ReviewResponse::from(created))
    }

    pub async fn update(&self, actor: &AuthenticatedUser, review_id: &str, request: UpdateReviewRequest) -> AppResult<ReviewResponse> {
        let review = self.find_owned(actor, review_id).await?;

        let mut update_doc = doc! {};
        if let Some(rating) = request.rating {
            update_doc.insert("rating", rating);
        }
        if let Some(comment) = request.comment {
            update_doc.insert("comment", comment.trim());
        }
        if update_doc.is_empty() {
            return Err(AppError::ValidationError("변경할 항목이 없습니다".to_string()));
        }

        let review_object_id = review
            .id
            .ok_or_else(|| AppError::InternalError("리뷰 ID가 없습니다".to_string()))?;

        let updated = self
            .review_repo
            .update(&review_object_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()))?;

        self.refresh_rating(&updated.product_id).await?;
        Ok(ReviewResponse::from(updated))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, review_id: &str) -> AppResult<()> {
        let review = self.find_owned(actor, review_id).await?;
        let review_object_id = review
            .id
            .ok_or_else(|| AppError::InternalError("리뷰 ID가 없습니다".to_string()))?;

        if !self.review_repo.delete(&review_object_id).await? {
            return Err(AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()));
        }

        self.refresh_rating(&review.product_id).await
    }

    /// 작성자 본인 또는 관리자만 통과
    async fn find_owned(&self, actor: &AuthenticatedUser, review_id: &str) -> AppResult<Review> {
        let review_id = parse_object_id(review_id, "리뷰")?;
        let review = self
            .review_repo
            .find_by_id(&review_id)
            .await?
            .ok_or_else(|| AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()))?;

        actor.require_owner_or_admin(&review.user_id)?;
        Ok(review)
    }

    async fn refresh_rating(&self, product_id: &ObjectId) -> AppResult<()> {
        let summary = self.review_repo.rating_summary(product_id).await?;
        self.product_service.apply_rating(product_id, summary).await?;
        log::debug!(
            "평점 재계산: product={} avg={} count={}",
            product_id, summary.average, summary.count
        );
        Ok(())
    }
}
