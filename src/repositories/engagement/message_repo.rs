//! `messages` 컬렉션 (문의하기)

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, DateTime}, options::ReturnDocument};
use futures_util::FutureExt;
use singleton_macro::repository;
use crate::{
    core::errors::AppResult,
    db::Database,
    domain::entities::engagement::message::ContactMessage,
    repositories::base::{find_page, index, IndexRegistration},
};

#[repository(name = "message", collection = "messages")]
pub struct MessageRepository {
    db: Arc<Database>,
}

impl MessageRepository {
    pub async fn create(&self, mut message: ContactMessage) -> AppResult<ContactMessage> {
        let result = self.collection::<ContactMessage>().insert_one(&message).await?;
        message.id = result.inserted_id.as_object_id();
        Ok(message)
    }

    pub async fn list(&self, skip: u64, limit: u64) -> AppResult<(Vec<ContactMessage>, u64)> {
        find_page(
            &self.collection::<ContactMessage>(),
            doc! {},
            doc! { "created_at": -1 },
            skip,
            limit,
        )
        .await
    }

    pub async fn mark_read(&self, id: &ObjectId) -> AppResult<Option<ContactMessage>> {
        Ok(self
            .collection::<ContactMessage>()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "is_read": true, "updated_at": DateTime::now() } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection::<ContactMessage>()
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        self.collection::<ContactMessage>()
            .create_index(index(doc! { "is_read": 1, "created_at": -1 }, "unread_recent", false))
            .await?;
        Ok(())
    }
}

inventory::submit! {
    IndexRegistration {
        repository: "message_repository",
        ensure: || async { MessageRepository::instance().create_indexes().await }.boxed(),
    }
}
