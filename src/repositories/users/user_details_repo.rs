//! `user_details` 컬렉션 (사용자당 최대 1개 문서)

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::ReturnDocument};
use futures_util::FutureExt;
use singleton_macro::repository;
use crate::{
    core::errors::AppResult,
    db::Database,
    domain::entities::users::user_details::UserDetails,
    repositories::base::{index, IndexRegistration},
};

#[repository(name = "user_details", collection = "user_details")]
pub struct UserDetailsRepository {
    db: Arc<Database>,
}

impl UserDetailsRepository {
    pub async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Option<UserDetails>> {
        Ok(self
            .collection::<UserDetails>()
            .find_one(doc! { "user_id": user_id })
            .await?)
    }

    /// `user_id` 기준으로 문서를 통째로 교체하거나 새로 만듭니다.
    pub async fn upsert(&self, details: &UserDetails) -> AppResult<Option<UserDetails>> {
        Ok(self
            .collection::<UserDetails>()
            .find_one_and_replace(doc! { "user_id": details.user_id }, details)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection::<UserDetails>()
            .delete_one(doc! { "user_id": user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        self.collection::<UserDetails>()
            .create_index(index(doc! { "user_id": 1 }, "user_id_unique", true))
            .await?;
        Ok(())
    }
}

inventory::submit! {
    IndexRegistration {
        repository: "user_details_repository",
        ensure: || async { UserDetailsRepository::instance().create_indexes().await }.boxed(),
    }
}
