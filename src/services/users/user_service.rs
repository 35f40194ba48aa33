//! # 사용자 서비스
//!
//! 회원가입, 로그인, 프로필 관리, 계정 삭제를 담당합니다.
//!
//! ## 비밀번호 처리
//!
//! - 해싱: bcrypt, 환경별 cost (`PasswordConfig::bcrypt_cost`)
//! - 로그인 실패 시 이메일 존재 여부를 드러내지 않도록 같은 메시지를 씁니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::service;
use crate::{
    config::PasswordConfig,
    core::errors::{AppError, AppResult},
    domain::{
        dto::{
            common::{PageQuery, Paginated},
            users::{
                request::{ChangePasswordRequest, LoginRequest, SignupRequest, UpdateProfileRequest},
                response::{LoginResponse, UserResponse},
            },
        },
        entities::users::user::User,
    },
    repositories::{
        shopping::{CartRepository, WishlistRepository},
        users::{UserDetailsRepository, UserRepository},
    },
    services::auth::TokenService,
};

const INVALID_CREDENTIALS: &str = "잘못된 이메일 또는 비밀번호입니다";

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    details_repo: Arc<UserDetailsRepository>,
    cart_repo: Arc<CartRepository>,
    wishlist_repo: Arc<WishlistRepository>,
    token_service: Arc<TokenService>,
}

impl UserService {
    /// 회원가입
    ///
    /// # Errors
    ///
    /// * `ConflictError` - 이메일 또는 사용자명 중복
    pub async fn signup(&self, request: SignupRequest) -> AppResult<UserResponse> {
        let start_time = std::time::Instant::now();

        let password_hash = hash_password(&request.password)?;

        let user = User::new_customer(
            request.email.trim().to_string(),
            request.username.trim().to_string(),
            request.display_name.trim().to_string(),
            password_hash,
        );

        let created = self.user_repo.create(user).await?;

        log::info!(
            "🆕 회원가입 완료: {} ({:?})",
            created.id_string().unwrap_or_default(),
            start_time.elapsed()
        );

        Ok(UserResponse::from(created))
    }

    /// 로그인: 자격 증명 확인 후 세션 토큰 발급
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let user = self.verify_credentials(&request.email, &request.password).await?;
        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let issued = self.token_service.issue(&user)?;

        if let Err(e) = self.user_repo.touch_last_login(&user_id).await {
            log::warn!("마지막 로그인 시간 갱신 실패 ({}): {}", user_id, e);
        }

        log::info!("🔑 로그인 성공: {}", user_id);
        Ok(LoginResponse::new(user, issued.token, issued.expires_in))
    }

    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                log::warn!("로그인 실패: 존재하지 않는 이메일");
                AppError::AuthenticationError(INVALID_CREDENTIALS.to_string())
            })?;

        if !verify_password(password, &user.password_hash)? {
            log::warn!("로그인 실패: 비밀번호 불일치 ({})", user.id_string().unwrap_or_default());
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_active {
            return Err(AppError::AuthenticationError("비활성화된 계정입니다".to_string()));
        }

        Ok(user)
    }

    pub async fn get_profile(&self, user_id: &ObjectId) -> AppResult<UserResponse> {
        Ok(UserResponse::from(self.find_user(user_id).await?))
    }

    pub async fn update_profile(&self, user_id: &ObjectId, request: UpdateProfileRequest) -> AppResult<UserResponse> {
        if request.is_empty() {
            return Err(AppError::ValidationError("변경할 항목이 없습니다".to_string()));
        }

        let mut update_doc = doc! {};

        if let Some(display_name) = request.display_name {
            update_doc.insert("display_name", display_name);
        }

        if let Some(username) = request.username {
            if let Some(existing) = self.user_repo.find_by_username(&username).await? {
                if existing.id.as_ref() != Some(user_id) {
                    return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
                }
            }
            update_doc.insert("username", username);
        }

        let updated = self
            .user_repo
            .update(user_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(updated))
    }

    pub async fn change_password(&self, user_id: &ObjectId, request: ChangePasswordRequest) -> AppResult<()> {
        let user = self.find_user(user_id).await?;

        if !verify_password(&request.current_password, &user.password_hash)? {
            return Err(AppError::ValidationError("현재 비밀번호가 올바르지 않습니다".to_string()));
        }

        if request.current_password == request.new_password {
            return Err(AppError::ValidationError(
                "새 비밀번호는 현재 비밀번호와 달라야 합니다".to_string(),
            ));
        }

        let password_hash = hash_password(&request.new_password)?;
        self.user_repo
            .update(user_id, doc! { "password_hash": password_hash })
            .await?;

        log::info!("🔒 비밀번호 변경: {}", user_id);
        Ok(())
    }

    /// 계정과 장바구니, 위시리스트, 배송 정보를 함께 삭제합니다.
    /// 작성한 리뷰와 주문 내역은 남습니다.
    pub async fn delete_account(&self, user_id: &ObjectId) -> AppResult<()> {
        if !self.user_repo.delete(user_id).await? {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        self.cart_repo.delete_by_user(user_id).await?;
        self.wishlist_repo.delete_by_user(user_id).await?;
        self.details_repo.delete_by_user(user_id).await?;

        log::info!("🗑️ 계정 삭제: {}", user_id);
        Ok(())
    }

    pub async fn list_users(&self, query: &PageQuery) -> AppResult<Paginated<UserResponse>> {
        let (users, total) = self.user_repo.list(query.skip(), query.limit()).await?;
        Ok(Paginated::new(users, query, total).map(UserResponse::from))
    }

    async fn find_user(&self, user_id: &ObjectId) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, PasswordConfig::bcrypt_cost())
        .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
}

fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = bcrypt::hash("SecurePass123", 4).unwrap();
        assert!(verify_password("SecurePass123", &hash).unwrap());
        assert!(!verify_password("SecurePass124", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        assert!(matches!(
            verify_password("anything", "not-a-bcrypt-hash"),
            Err(AppError::InternalError(_))
        ));
    }
}
