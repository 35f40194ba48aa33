use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::config::Role;
use crate::domain::entities::users::user::User;
use crate::domain::entities::users::user_details::{Address, UserDetails};
use crate::utils::bson_utils::to_chrono;

/// 사용자 응답 DTO
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub roles: Vec<Role>,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            username,
            display_name,
            roles,
            is_active,
            last_login_at,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            username,
            display_name,
            roles,
            is_active,
            last_login_at: last_login_at.map(to_chrono),
            created_at: to_chrono(created_at),
            updated_at: to_chrono(updated_at),
        }
    }
}

/// 로그인 응답 DTO
///
/// 토큰은 `CustomerToken` 쿠키로도 전달되며, 쿠키를 쓸 수 없는 클라이언트를
/// 위해 본문에도 포함합니다.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl LoginResponse {
    pub fn new(user: User, access_token: String, expires_in: i64) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDetailsResponse {
    pub id: String,
    pub user_id: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub addresses: Vec<Address>,
    pub default_address: Option<Address>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserDetails> for UserDetailsResponse {
    fn from(details: UserDetails) -> Self {
        let default_address = details.default_address().cloned();

        Self {
            id: details.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: details.user_id.to_hex(),
            full_name: details.full_name,
            phone: details.phone,
            addresses: details.addresses,
            default_address,
            updated_at: to_chrono(details.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_hides_password_hash() {
        let mut user = User::new_customer(
            "User@Example.com".to_string(),
            "john_doe".to_string(),
            "John".to_string(),
            "$2b$12$hash".to_string(),
        );
        user.id = Some(ObjectId::new());

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["roles"][0], "customer");
    }
}
