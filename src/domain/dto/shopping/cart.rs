use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::shopping::cart::{Cart, CartItem};
use crate::utils::bson_utils::to_chrono;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCartItemRequest {
    #[validate(length(min = 1, message = "상품 ID가 필요합니다"))]
    pub product_id: String,

    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 100, message = "수량은 1-100 사이여야 합니다"))]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// 수량 0은 해당 라인을 삭제합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 0, max = 100, message = "수량은 0-100 사이여야 합니다"))]
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartItemResponse {
    pub product_id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub unit_price: i64,
    pub quantity: i64,
    pub line_total: i64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            product_id: item.product_id.to_hex(),
            name: item.name,
            image_url: item.image_url,
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub user_id: String,
    pub items: Vec<CartItemResponse>,
    pub item_count: i64,
    pub subtotal: i64,
    pub currency: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            user_id: cart.user_id.to_hex(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            item_count: cart.item_count,
            subtotal: cart.subtotal,
            currency: cart.currency,
            updated_at: to_chrono(cart.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_defaults_to_one() {
        let req: AddCartItemRequest =
            serde_json::from_str(r#"{"product_id": "507f1f77bcf86cd799439011"}"#).unwrap();
        assert_eq!(req.quantity, 1);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_zero_quantity_rejected_on_add_but_allowed_on_update() {
        let add = AddCartItemRequest {
            product_id: "507f1f77bcf86cd799439011".to_string(),
            quantity: 0,
        };
        assert!(add.validate().is_err());
        assert!(UpdateCartItemRequest { quantity: 0 }.validate().is_ok());
        assert!(UpdateCartItemRequest { quantity: -1 }.validate().is_err());
    }
}
