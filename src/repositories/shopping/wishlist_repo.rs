//! `wishlists` 컬렉션

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::ReturnDocument};
use futures_util::FutureExt;
use singleton_macro::repository;
use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::shopping::wishlist::Wishlist,
    repositories::base::{index, IndexRegistration},
};

#[repository(name = "wishlist", collection = "wishlists")]
pub struct WishlistRepository {
    db: Arc<Database>,
}

impl WishlistRepository {
    pub async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Option<Wishlist>> {
        Ok(self
            .collection::<Wishlist>()
            .find_one(doc! { "user_id": user_id })
            .await?)
    }

    pub async fn save(&self, wishlist: &Wishlist) -> AppResult<Wishlist> {
        self.collection::<Wishlist>()
            .find_one_and_replace(doc! { "user_id": wishlist.user_id }, wishlist)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::DatabaseError("위시리스트 저장 결과가 없습니다".to_string()))
    }

    pub async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection::<Wishlist>()
            .delete_one(doc! { "user_id": user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        self.collection::<Wishlist>()
            .create_index(index(doc! { "user_id": 1 }, "user_id_unique", true))
            .await?;
        Ok(())
    }
}

inventory::submit! {
    IndexRegistration {
        repository: "wishlist_repository",
        ensure: || async { WishlistRepository::instance().create_indexes().await }.boxed(),
    }
}
