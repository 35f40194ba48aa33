//! 결제 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::shopping::order::{Order, OrderItem, OrderStatus};
use crate::utils::bson_utils::to_chrono;

/// 프론트엔드 결제 위젯 초기화용 공개 키
#[derive(Debug, Clone, Serialize)]
pub struct PaymentKeyResponse {
    pub key_id: String,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub gateway_order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

/// 결제 위젯이 돌려준 값 그대로
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, max = 64, message = "razorpay_order_id가 필요합니다"))]
    pub razorpay_order_id: String,

    #[validate(length(min = 1, max = 64, message = "razorpay_payment_id가 필요합니다"))]
    pub razorpay_payment_id: String,

    #[validate(length(min = 1, max = 128, message = "razorpay_signature가 필요합니다"))]
    pub razorpay_signature: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub name: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub line_total: i64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id.to_hex(),
            name: item.name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub gateway_order_id: String,
    pub receipt: String,
    pub amount: i64,
    pub currency: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItemResponse>,
    pub gateway_payment_id: Option<String>,
    pub failure_reason: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.map(|id| id.to_hex()).unwrap_or_default(),
            gateway_order_id: order.gateway_order_id,
            receipt: order.receipt,
            amount: order.amount,
            currency: order.currency,
            status: order.status,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            gateway_payment_id: order.gateway_payment_id,
            failure_reason: order.failure_reason,
            paid_at: order.paid_at.map(to_chrono),
            created_at: to_chrono(order.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_request_requires_all_fields() {
        let req: VerifyPaymentRequest = serde_json::from_str(
            r#"{"razorpay_order_id": "order_1", "razorpay_payment_id": "", "razorpay_signature": "abc"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }
}
