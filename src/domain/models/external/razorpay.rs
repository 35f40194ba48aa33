//! Razorpay Orders API 와이어 타입

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// `POST /v1/orders` 요청 본문
#[derive(Debug, Clone, Serialize)]
pub struct RazorpayOrderRequest {
    /// 최소 통화 단위 금액
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub notes: HashMap<String, String>,
}

/// `POST /v1/orders` 응답 본문 (사용하는 필드만)
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub status: String,
}

/// 에러 응답 `{ "error": { "code": ..., "description": ... } }`
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorEnvelope {
    pub error: RazorpayErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_response_parsing() {
        let json = r#"{
            "id": "order_IluGWxBm9U8zJ8",
            "entity": "order",
            "amount": 50000,
            "amount_paid": 0,
            "amount_due": 50000,
            "currency": "INR",
            "receipt": "rcpt_11",
            "status": "created",
            "attempts": 0,
            "notes": [],
            "created_at": 1642662092
        }"#;

        let order: RazorpayOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, "order_IluGWxBm9U8zJ8");
        assert_eq!(order.amount, 50_000);
        assert_eq!(order.status, "created");
    }

    #[test]
    fn test_request_skips_empty_notes() {
        let request = RazorpayOrderRequest {
            amount: 100,
            currency: "INR".to_string(),
            receipt: "r".to_string(),
            notes: HashMap::new(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("notes").is_none());
    }
}
