//! 인증된 사용자 정보
//!
//! [`AuthMiddleware`](crate::middlewares::AuthMiddleware)가 세션 토큰을 검증한 뒤
//! request extensions에 넣어 두는 값입니다. 핸들러는 extractor로 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[get("/me")]
//! async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> { ... }
//!
//! #[post("")]
//! async fn create(user: OptionalUser, ...) -> Result<HttpResponse, AppError> { ... }
//! ```

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::config::Role;
use crate::core::errors::{AppError, AppResult};
use crate::utils::bson_utils::parse_object_id;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,

    pub roles: Vec<Role>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn object_id(&self) -> AppResult<ObjectId> {
        parse_object_id(&self.user_id, "사용자")
    }

    /// 관리자가 아니면 403
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::AuthorizationError("관리자 권한이 필요합니다".to_string()))
        }
    }

    /// 본인 소유이거나 관리자가 아니면 403
    pub fn require_owner_or_admin(&self, owner_id: &ObjectId) -> AppResult<()> {
        if self.is_admin() || self.object_id()? == *owner_id {
            Ok(())
        } else {
            Err(AppError::AuthorizationError("본인의 리소스만 수정할 수 있습니다".to_string()))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "로그인이 필요합니다".to_string(),
            ).into())),
        }
    }
}

/// 로그인 여부와 무관하게 접근 가능한 핸들러용
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: Vec<Role>) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: ObjectId::new().to_hex(),
            roles,
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(user(vec![Role::Customer, Role::Admin]).require_admin().is_ok());
        assert!(matches!(
            user(vec![Role::Customer]).require_admin(),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_owner_or_admin() {
        let customer = user(vec![Role::Customer]);
        let own_id = customer.object_id().unwrap();

        assert!(customer.require_owner_or_admin(&own_id).is_ok());
        assert!(customer.require_owner_or_admin(&ObjectId::new()).is_err());
        assert!(user(vec![Role::Admin]).require_owner_or_admin(&ObjectId::new()).is_ok());
    }
}
