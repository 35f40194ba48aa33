use std::sync::Arc;
use mongodb::bson::{oid::ObjectId, DateTime};
use singleton_macro::service;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::users::{request::UpsertUserDetailsRequest, response::UserDetailsResponse},
        entities::users::user_details::{normalize_addresses, Address, UserDetails},
    },
    repositories::users::UserDetailsRepository,
};

/// 이름, 전화번호, 배송지 관리
#[service(name = "user_details")]
pub struct UserDetailsService {
    details_repo: Arc<UserDetailsRepository>,
}

impl UserDetailsService {
    pub async fn get(&self, user_id: &ObjectId) -> AppResult<UserDetailsResponse> {
        self.details_repo
            .find_by_user(user_id)
            .await?
            .map(UserDetailsResponse::from)
            .ok_or_else(|| AppError::NotFound("등록된 사용자 정보가 없습니다".to_string()))
    }

    /// 전체 교체 방식: 요청에 없는 배송지는 삭제됩니다.
    pub async fn upsert(&self, user_id: &ObjectId, request: UpsertUserDetailsRequest) -> AppResult<UserDetailsResponse> {
        let mut details = self
            .details_repo
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| UserDetails::new(*user_id));

        details.full_name = request.full_name;
        details.phone = request.phone;
        details.addresses = normalize_addresses(request.addresses.into_iter().map(Address::from).collect())?;
        details.updated_at = DateTime::now();

        let saved = self
            .details_repo
            .upsert(&details)
            .await?
            .ok_or_else(|| AppError::DatabaseError("사용자 정보 저장 결과가 없습니다".to_string()))?;

        Ok(UserDetailsResponse::from(saved))
    }

    pub async fn delete(&self, user_id: &ObjectId) -> AppResult<()> {
        if !self.details_repo.delete_by_user(user_id).await? {
            return Err(AppError::NotFound("등록된 사용자 정보가 없습니다".to_string()));
        }
        Ok(())
    }
}
