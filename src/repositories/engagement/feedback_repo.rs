//! `feedback` 컬렉션

use std::sync::Arc;
use mongodb::bson::doc;
use futures_util::FutureExt;
use singleton_macro::repository;
use crate::{
    core::errors::AppResult,
    db::Database,
    domain::entities::engagement::feedback::Feedback,
    repositories::base::{find_page, index, IndexRegistration},
};

#[repository(name = "feedback", collection = "feedback")]
pub struct FeedbackRepository {
    db: Arc<Database>,
}

impl FeedbackRepository {
    pub async fn create(&self, mut feedback: Feedback) -> AppResult<Feedback> {
        let result = self.collection::<Feedback>().insert_one(&feedback).await?;
        feedback.id = result.inserted_id.as_object_id();
        Ok(feedback)
    }

    pub async fn list(&self, skip: u64, limit: u64) -> AppResult<(Vec<Feedback>, u64)> {
        find_page(
            &self.collection::<Feedback>(),
            doc! {},
            doc! { "created_at": -1 },
            skip,
            limit,
        )
        .await
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        self.collection::<Feedback>()
            .create_index(index(doc! { "created_at": -1 }, "created_at_desc", false))
            .await?;
        Ok(())
    }
}

inventory::submit! {
    IndexRegistration {
        repository: "feedback_repository",
        ensure: || async { FeedbackRepository::instance().create_indexes().await }.boxed(),
    }
}
