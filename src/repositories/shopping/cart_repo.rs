//! `carts` 컬렉션 (사용자당 1개 문서, 마지막 저장이 우선)

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::ReturnDocument};
use futures_util::FutureExt;
use singleton_macro::repository;
use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::shopping::cart::Cart,
    repositories::base::{index, IndexRegistration},
};

#[repository(name = "cart", collection = "carts")]
pub struct CartRepository {
    db: Arc<Database>,
}

impl CartRepository {
    pub async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Option<Cart>> {
        Ok(self.collection::<Cart>().find_one(doc! { "user_id": user_id }).await?)
    }

    pub async fn save(&self, cart: &Cart) -> AppResult<Cart> {
        self.collection::<Cart>()
            .find_one_and_replace(doc! { "user_id": cart.user_id }, cart)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::DatabaseError("장바구니 저장 결과가 없습니다".to_string()))
    }

    pub async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Cart>().delete_one(doc! { "user_id": user_id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        self.collection::<Cart>()
            .create_index(index(doc! { "user_id": 1 }, "user_id_unique", true))
            .await?;
        Ok(())
    }
}

inventory::submit! {
    IndexRegistration {
        repository: "cart_repository",
        ensure: || async { CartRepository::instance().create_indexes().await }.boxed(),
    }
}
