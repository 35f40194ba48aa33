//! 위시리스트 엔티티 (`wishlists` 컬렉션)
//!
//! 상품 ID 집합입니다. 같은 상품을 두 번 넣어도 한 번만 저장되며
//! `item_count`는 항상 `product_ids.len()`과 같습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub product_ids: Vec<ObjectId>,
    pub item_count: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Wishlist {
    pub fn empty(user_id: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id,
            product_ids: Vec::new(),
            item_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains(&self, product_id: &ObjectId) -> bool {
        self.product_ids.contains(product_id)
    }

    /// 새로 추가되었으면 `true`
    pub fn add(&mut self, product_id: ObjectId) -> bool {
        if self.contains(&product_id) {
            return false;
        }
        self.product_ids.push(product_id);
        self.touch();
        true
    }

    /// 제거되었으면 `true`
    pub fn remove(&mut self, product_id: &ObjectId) -> bool {
        let before = self.product_ids.len();
        self.product_ids.retain(|id| id != product_id);
        let removed = before != self.product_ids.len();
        self.touch();
        removed
    }

    pub fn clear(&mut self) {
        self.product_ids.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.item_count = self.product_ids.len() as i64;
        self.updated_at = DateTime::now();
    }
}
