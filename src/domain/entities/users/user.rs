//! 사용자 엔티티 (`users` 컬렉션)

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::Role;

/// 스토어 계정
///
/// 이메일과 사용자명은 컬렉션 전체에서 유니크합니다 (`email_unique`, `username_unique` 인덱스).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 회원가입으로 생성되는 일반 고객 계정
    pub fn new_customer(email: String, username: String, display_name: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email: email.to_lowercase(),
            username,
            display_name,
            password_hash,
            roles: vec![Role::Customer],
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_defaults() {
        let user = User::new_customer(
            "Alice@Example.com".to_string(),
            "alice".to_string(),
            "Alice".to_string(),
            "hash".to_string(),
        );

        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.roles, vec![Role::Customer]);
        assert!(user.is_active);
        assert!(!user.is_admin());
        assert!(user.id_string().is_none());
    }

    #[test]
    fn test_id_field_serializes_as_underscore_id() {
        let mut user = User::new_customer("a@b.com".into(), "abc".into(), "A".into(), "h".into());
        user.id = Some(ObjectId::new());

        let document = mongodb::bson::to_document(&user).unwrap();
        assert!(document.contains_key("_id"));
        assert!(!document.contains_key("last_login_at"));
    }
}
