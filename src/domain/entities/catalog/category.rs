//! 카테고리 엔티티 (`categories` 컬렉션)

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::catalog::product::ImageRef;
use crate::utils::string_utils::slugify;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// `name`에서 파생되는 URL 식별자 (유니크)
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Category {
    pub fn new(name: String, description: Option<String>, image: Option<ImageRef>) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            slug: slugify(&name),
            name,
            description,
            image,
            created_at: now,
            updated_at: now,
        }
    }
}
