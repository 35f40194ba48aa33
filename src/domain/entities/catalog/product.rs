//! 상품 엔티티 (`products` 컬렉션)
//!
//! 가격은 통화의 최소 단위(INR이면 paise) 정수로 저장합니다.
//! 결제 게이트웨이의 `amount` 필드와 단위가 같습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::{AppError, AppResult};

/// 상품 가격 상한 (최소 단위, 10억 INR)
pub const MAX_PRICE: i64 = 100_000_000_000;

/// 상품 재고 상한
pub const MAX_STOCK: i64 = 1_000_000;

/// 이미지 호스트에 올라간 자산 참조
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub public_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub currency: String,
    pub category_id: ObjectId,
    pub images: Vec<ImageRef>,
    pub stock: i64,
    pub is_active: bool,
    /// 리뷰 평점 평균 (소수점 첫째 자리 반올림)
    pub average_rating: f64,
    pub review_count: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Product {
    pub fn id_string(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    pub fn thumbnail_url(&self) -> Option<String> {
        self.images.first().map(|image| image.url.clone())
    }

    /// 장바구니에 `quantity`개를 담을 수 있는지 확인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 판매 중지된 상품
    /// * `AppError::ValidationError` - 재고 부족
    pub fn ensure_purchasable(&self, quantity: i64) -> AppResult<()> {
        if !self.is_active {
            return Err(AppError::NotFound(format!("판매 중인 상품이 아닙니다: {}", self.name)));
        }

        if quantity > self.stock {
            return Err(AppError::ValidationError(format!(
                "재고가 부족합니다: {} (요청 {}, 재고 {})",
                self.name, quantity, self.stock
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn product(name: &str, price: i64, stock: i64) -> Product {
        let now = DateTime::now();
        Product {
            id: Some(ObjectId::new()),
            name: name.to_string(),
            description: String::new(),
            price,
            currency: "INR".to_string(),
            category_id: ObjectId::new(),
            images: vec![ImageRef {
                public_id: format!("storefront/{}", name),
                url: format!("https://res.cloudinary.com/demo/{}.png", name),
            }],
            stock,
            is_active: true,
            average_rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::product;
    use super::*;

    #[test]
    fn test_ensure_purchasable_checks_stock() {
        let item = product("mug", 49_900, 3);
        assert!(item.ensure_purchasable(3).is_ok());
        assert!(matches!(item.ensure_purchasable(4), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_inactive_product_is_not_purchasable() {
        let mut item = product("mug", 49_900, 3);
        item.is_active = false;
        assert!(matches!(item.ensure_purchasable(1), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_largest_line_total_fits_in_i64() {
        assert!(MAX_PRICE.checked_mul(MAX_STOCK).is_some());
    }

    #[test]
    fn test_thumbnail_is_first_image() {
        let item = product("mug", 49_900, 3);
        assert_eq!(item.thumbnail_url().unwrap(), "https://res.cloudinary.com/demo/mug.png");
    }
}
