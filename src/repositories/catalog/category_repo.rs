//! `categories` 컬렉션

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, DateTime, Document}, options::ReturnDocument};
use futures_util::{FutureExt, TryStreamExt};
use singleton_macro::repository;
use crate::{
    core::errors::AppResult,
    db::Database,
    domain::entities::catalog::category::Category,
    repositories::base::{index, map_write_error, IndexRegistration},
};

const DUPLICATE_CATEGORY: &str = "같은 이름의 카테고리가 이미 존재합니다";

#[repository(name = "category", collection = "categories")]
pub struct CategoryRepository {
    db: Arc<Database>,
}

impl CategoryRepository {
    pub async fn find_all(&self) -> AppResult<Vec<Category>> {
        let categories = self
            .collection::<Category>()
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Category>> {
        Ok(self.collection::<Category>().find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        Ok(self.collection::<Category>().find_one(doc! { "slug": slug }).await?)
    }

    pub async fn exists(&self, id: &ObjectId) -> AppResult<bool> {
        let count = self
            .collection::<Category>()
            .count_documents(doc! { "_id": id })
            .await?;
        Ok(count > 0)
    }

    pub async fn create(&self, mut category: Category) -> AppResult<Category> {
        let result = self
            .collection::<Category>()
            .insert_one(&category)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_CATEGORY))?;

        category.id = result.inserted_id.as_object_id();
        Ok(category)
    }

    pub async fn update(&self, id: &ObjectId, mut update_doc: Document) -> AppResult<Option<Category>> {
        update_doc.insert("updated_at", DateTime::now());

        self.collection::<Category>()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update_doc })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_CATEGORY))
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Category>().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        self.collection::<Category>()
            .create_indexes([
                index(doc! { "name": 1 }, "name_unique", true),
                index(doc! { "slug": 1 }, "slug_unique", true),
            ])
            .await?;
        Ok(())
    }
}

inventory::submit! {
    IndexRegistration {
        repository: "category_repository",
        ensure: || async { CategoryRepository::instance().create_indexes().await }.boxed(),
    }
}
