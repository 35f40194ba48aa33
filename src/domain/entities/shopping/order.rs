//! 주문 엔티티 (`orders` 컬렉션)
//!
//! 결제 게이트웨이 주문 하나당 문서 하나입니다. 체크아웃 시점의 장바구니를
//! 그대로 복사해 두므로 이후 상품 가격이 바뀌어도 주문 금액은 변하지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::shopping::cart::Cart;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Paid,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Paid => "paid",
            OrderStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ObjectId,
    pub name: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub line_total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub gateway_order_id: String,
    pub receipt: String,
    pub amount: i64,
    pub currency: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Order {
    pub fn from_cart(cart: &Cart, gateway_order_id: String, receipt: String) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id: cart.user_id,
            gateway_order_id,
            receipt,
            amount: cart.subtotal,
            currency: cart.currency.clone(),
            items: cart
                .items
                .iter()
                .map(|item| OrderItem {
                    product_id: item.product_id,
                    name: item.name.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    line_total: item.line_total,
                })
                .collect(),
            status: OrderStatus::Created,
            gateway_payment_id: None,
            failure_reason: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status != OrderStatus::Created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::catalog::product::fixtures::product;

    #[test]
    fn test_from_cart_snapshots_items_and_amount() {
        let mut cart = Cart::empty(ObjectId::new(), "INR");
        cart.add_item(&product("mug", 250, 10), 2).unwrap();
        cart.add_item(&product("tee", 1_000, 10), 1).unwrap();

        let order = Order::from_cart(&cart, "order_123".to_string(), "rcpt_1".to_string());

        assert_eq!(order.amount, 1_500);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].line_total, 500);
        assert_eq!(order.status, OrderStatus::Created);
        assert!(!order.is_settled());
        assert_eq!(order.user_id, cart.user_id);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(mongodb::bson::to_bson(&OrderStatus::Paid).unwrap(), mongodb::bson::Bson::String("paid".to_string()));
        assert_eq!(OrderStatus::Failed.as_str(), "failed");
    }
}
