//! # Razorpay Orders API 클라이언트
//!
//! 주문 생성(`POST /orders`)과 결제 완료 서명 검증을 담당합니다.
//!
//! ## 서명 검증
//!
//! ```text
//! expected = hex(HMAC-SHA256(key_secret, "{order_id}|{payment_id}"))
//! ```
//!
//! 비교는 `Mac::verify_slice`로 상수 시간에 수행합니다.

use std::collections::HashMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use crate::{
    config::RazorpayConfig,
    core::errors::{AppError, AppResult},
    domain::models::external::razorpay::{RazorpayErrorEnvelope, RazorpayOrder, RazorpayOrderRequest},
};

type HmacSha256 = Hmac<Sha256>;

pub struct RazorpayClient {
    config: RazorpayConfig,
    http: reqwest::Client,
}

impl RazorpayClient {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(RazorpayConfig::from_env()?))
    }

    pub fn key_id(&self) -> &str {
        &self.config.key_id
    }

    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    pub async fn create_order(&self, amount: i64, receipt: &str, notes: HashMap<String, String>) -> AppResult<RazorpayOrder> {
        let request = RazorpayOrderRequest {
            amount,
            currency: self.config.currency.clone(),
            receipt: receipt.to_string(),
            notes,
        };

        let response = self
            .http
            .post(format!("{}/orders", self.config.api_base.trim_end_matches('/')))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("결제 주문 생성 요청 실패: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RazorpayErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error.description)
                .unwrap_or(body);

            log::warn!("💳 Razorpay 주문 생성 실패 ({}): {}", status, message);
            return Err(AppError::UpstreamError(format!("결제 주문 생성 실패: {}", message)));
        }

        response
            .json::<RazorpayOrder>()
            .await
            .map_err(|e| AppError::UpstreamError(format!("결제 주문 응답 파싱 실패: {}", e)))
    }

    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_signature(&self.config.key_secret, order_id, payment_id, signature)
    }
}

fn signing_mac(key_secret: &str, order_id: &str, payment_id: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes()).ok()?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Some(mac)
}

/// 결제 완료 콜백 서명 (hex 소문자)
pub fn expected_signature(key_secret: &str, order_id: &str, payment_id: &str) -> Option<String> {
    signing_mac(key_secret, order_id, payment_id).map(|mac| hex::encode(mac.finalize().into_bytes()))
}

pub fn verify_signature(key_secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let Ok(provided) = hex::decode(signature.trim()) else {
        return false;
    };

    match signing_mac(key_secret, order_id, payment_id) {
        Some(mac) => mac.verify_slice(&provided).is_ok(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_key_secret";
    const ORDER_ID: &str = "order_IluGWxBm9U8zJ8";
    const PAYMENT_ID: &str = "pay_IluGWxBm9U8zJ9";
    const SIGNATURE: &str = "1b7c366b19bc8f59686e3c092e1fc541be2a084e631d3645e93eb32bcaf9f8ea";

    #[test]
    fn test_expected_signature_matches_reference() {
        assert_eq!(expected_signature(SECRET, ORDER_ID, PAYMENT_ID).as_deref(), Some(SIGNATURE));
    }

    #[test]
    fn test_verify_accepts_reference_vector() {
        assert!(verify_signature(SECRET, ORDER_ID, PAYMENT_ID, SIGNATURE));
        assert!(verify_signature(SECRET, ORDER_ID, PAYMENT_ID, &SIGNATURE.to_uppercase()));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        assert!(!verify_signature(SECRET, ORDER_ID, "pay_other", SIGNATURE));
        assert!(!verify_signature(SECRET, "order_other", PAYMENT_ID, SIGNATURE));
        assert!(!verify_signature("wrong_secret", ORDER_ID, PAYMENT_ID, SIGNATURE));
        assert!(!verify_signature(SECRET, ORDER_ID, PAYMENT_ID, &SIGNATURE[..62]));
        assert!(!verify_signature(SECRET, ORDER_ID, PAYMENT_ID, "not-hex"));
    }
}
