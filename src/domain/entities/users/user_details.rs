//! 사용자 부가 정보 엔티티 (`user_details` 컬렉션)
//!
//! 사용자당 하나의 문서만 존재합니다 (`user_id_unique` 인덱스).

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub addresses: Vec<Address>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl UserDetails {
    pub fn new(user_id: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id,
            full_name: None,
            phone: None,
            addresses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|address| address.is_default)
    }
}

/// 기본 배송지는 최대 하나. 아무것도 지정되지 않았으면 첫 번째 주소가 기본이 됩니다.
pub fn normalize_addresses(mut addresses: Vec<Address>) -> AppResult<Vec<Address>> {
    let default_count = addresses.iter().filter(|address| address.is_default).count();

    if default_count > 1 {
        return Err(AppError::ValidationError(
            "기본 배송지는 하나만 지정할 수 있습니다".to_string(),
        ));
    }

    if default_count == 0 {
        if let Some(first) = addresses.first_mut() {
            first.is_default = true;
        }
    }

    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(line1: &str, is_default: bool) -> Address {
        Address {
            label: None,
            line1: line1.to_string(),
            line2: None,
            city: "Pune".to_string(),
            state: "MH".to_string(),
            postal_code: "411001".to_string(),
            country: "IN".to_string(),
            is_default,
        }
    }

    #[test]
    fn test_first_address_becomes_default() {
        let addresses = normalize_addresses(vec![address("a", false), address("b", false)]).unwrap();
        assert!(addresses[0].is_default);
        assert!(!addresses[1].is_default);
    }

    #[test]
    fn test_explicit_default_is_kept() {
        let addresses = normalize_addresses(vec![address("a", false), address("b", true)]).unwrap();
        assert!(!addresses[0].is_default);
        assert!(addresses[1].is_default);
    }

    #[test]
    fn test_multiple_defaults_rejected() {
        let result = normalize_addresses(vec![address("a", true), address("b", true)]);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_empty_list_is_fine() {
        assert!(normalize_addresses(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_default_address_lookup() {
        let mut details = UserDetails::new(ObjectId::new());
        assert!(details.default_address().is_none());

        details.addresses = normalize_addresses(vec![address("a", false)]).unwrap();
        assert_eq!(details.default_address().unwrap().line1, "a");
    }
}
