//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션의 데이터 액세스를 담당합니다.
//!
//! ## 인덱스
//!
//! - `email` (unique)
//! - `username` (unique)
//! - `created_at` (desc)
//!
//! 이메일은 항상 소문자로 저장/조회합니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use futures_util::FutureExt;
use singleton_macro::repository;
use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::users::user::User,
    repositories::base::{find_page, index, map_write_error, IndexRegistration},
};

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.collection::<User>().find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .collection::<User>()
            .find_one(doc! { "email": email.trim().to_lowercase() })
            .await?)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .collection::<User>()
            .find_one(doc! { "username": username })
            .await?)
    }

    /// 새 사용자 생성
    ///
    /// # Errors
    ///
    /// * `ConflictError` - 이메일 또는 사용자명 중복
    pub async fn create(&self, mut user: User) -> AppResult<User> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        // 조회와 삽입 사이의 경합은 유니크 인덱스가 막는다
        let result = self
            .collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| map_write_error(e, "이미 사용 중인 이메일 또는 사용자명입니다"))?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    /// `$set` 부분 업데이트 후 최신 문서를 반환합니다. `updated_at`은 자동으로 갱신됩니다.
    pub async fn update(&self, id: &ObjectId, mut update_doc: Document) -> AppResult<Option<User>> {
        update_doc.insert("updated_at", DateTime::now());

        self.collection::<User>()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update_doc })
            .return_document(mongodb::options::ReturnDocument::After)
            .await
            .map_err(|e| map_write_error(e, "이미 사용 중인 사용자명입니다"))
    }

    pub async fn touch_last_login(&self, id: &ObjectId) -> AppResult<()> {
        self.collection::<User>()
            .update_one(doc! { "_id": id }, doc! { "$set": { "last_login_at": DateTime::now() } })
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<User>().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    /// 가입일 역순 목록
    pub async fn list(&self, skip: u64, limit: u64) -> AppResult<(Vec<User>, u64)> {
        find_page(
            &self.collection::<User>(),
            doc! {},
            doc! { "created_at": -1 },
            skip,
            limit,
        )
        .await
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        self.collection::<User>()
            .create_indexes([
                index(doc! { "email": 1 }, "email_unique", true),
                index(doc! { "username": 1 }, "username_unique", true),
                index(doc! { "created_at": -1 }, "created_at_desc", false),
            ])
            .await?;
        Ok(())
    }
}

inventory::submit! {
    IndexRegistration {
        repository: "user_repository",
        ensure: || async { UserRepository::instance().create_indexes().await }.boxed(),
    }
}
