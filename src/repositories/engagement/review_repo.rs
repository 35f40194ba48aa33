//! # 리뷰 리포지토리
//!
//! `reviews` 컬렉션. `(product_id, user_id)` 유니크 인덱스로
//! 사용자당 상품 하나에 리뷰 하나만 허용합니다.
//!
//! [`ReviewRepository::rating_summary`]는 저장된 리뷰 전체를 집계해
//! 상품의 평균 평점과 리뷰 수를 계산합니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, DateTime, Document}, options::ReturnDocument};
use futures_util::{FutureExt, TryStreamExt};
use singleton_macro::repository;
use crate::{
    core::errors::AppResult,
    db::Database,
    domain::entities::engagement::review::{RatingSummary, Review},
    repositories::base::{find_page, index, map_write_error, read_count, IndexRegistration},
};

#[repository(name = "review", collection = "reviews")]
pub struct ReviewRepository {
    db: Arc<Database>,
}

impl ReviewRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Review>> {
        Ok(self.collection::<Review>().find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_product(&self, product_id: &ObjectId, skip: u64, limit: u64) -> AppResult<(Vec<Review>, u64)> {
        find_page(
            &self.collection::<Review>(),
            doc! { "product_id": product_id },
            doc! { "created_at": -1, "_id": -1 },
            skip,
            limit,
        )
        .await
    }

    pub async fn create(&self, mut review: Review) -> AppResult<Review> {
        let result = self
            .collection::<Review>()
            .insert_one(&review)
            .await
            .map_err(|e| map_write_error(e, "이미 이 상품에 리뷰를 작성했습니다"))?;

        review.id = result.inserted_id.as_object_id();
        Ok(review)
    }

    pub async fn update(&self, id: &ObjectId, mut update_doc: Document) -> AppResult<Option<Review>> {
        update_doc.insert("updated_at", DateTime::now());

        Ok(self
            .collection::<Review>()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update_doc })
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Review>().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn delete_by_product(&self, product_id: &ObjectId) -> AppResult<u64> {
        let result = self
            .collection::<Review>()
            .delete_many(doc! { "product_id": product_id })
            .await?;
        Ok(result.deleted_count)
    }

    /// 상품 리뷰 집계 (리뷰가 없으면 0점, 0개)
    pub async fn rating_summary(&self, product_id: &ObjectId) -> AppResult<RatingSummary> {
        let pipeline = [
            doc! { "$match": { "product_id": product_id } },
            doc! { "$group": {
                "_id": "$product_id",
                "average": { "$avg": "$rating" },
                "count": { "$sum": 1 },
            } },
        ];

        let mut cursor = self.collection::<Review>().aggregate(pipeline).await?;

        let summary = match cursor.try_next().await? {
            Some(group) => RatingSummary::new(
                group.get_f64("average").unwrap_or(0.0),
                read_count(&group, "count"),
            ),
            None => RatingSummary::default(),
        };

        Ok(summary)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        self.collection::<Review>()
            .create_indexes([
                index(doc! { "product_id": 1, "user_id": 1 }, "product_user_unique", true),
                index(doc! { "product_id": 1, "created_at": -1 }, "product_recent", false),
            ])
            .await?;
        Ok(())
    }
}

inventory::submit! {
    IndexRegistration {
        repository: "review_repository",
        ensure: || async { ReviewRepository::instance().create_indexes().await }.boxed(),
    }
}
