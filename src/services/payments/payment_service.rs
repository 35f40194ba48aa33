//! # 결제 서비스
//!
//! ## 흐름
//!
//! 1. `checkout` - 현재 상품 가격으로 다시 계산한 장바구니 합계로 Razorpay 주문을 만들고 `orders`에 `created` 상태로 저장
//! 2. 프론트엔드가 Razorpay Checkout으로 결제
//! 3. `verify` - 콜백 서명 검증 후 `paid`(재고 차감, 장바구니 비움) 또는 `failed`
//!
//! 이미 `paid`/`failed`로 정산된 주문을 다시 검증하면 상태를 바꾸지 않습니다.

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    config::RazorpayConfig,
    core::errors::{AppError, AppResult},
    domain::{
        dto::payments::{CheckoutResponse, OrderResponse, PaymentKeyResponse, VerifyPaymentRequest},
        entities::{
            catalog::product::Product,
            shopping::{
                cart::Cart,
                order::{Order, OrderStatus},
            },
        },
    },
    repositories::shopping::OrderRepository,
    services::{catalog::ProductService, payments::RazorpayClient, shopping::CartService},
};

#[service(name = "payment")]
pub struct PaymentService {
    order_repo: Arc<OrderRepository>,
    product_service: Arc<ProductService>,
    cart_service: Arc<CartService>,
}

impl PaymentService {
    pub fn key(&self) -> AppResult<PaymentKeyResponse> {
        let config = RazorpayConfig::from_env()?;
        Ok(PaymentKeyResponse {
            key_id: config.key_id,
            currency: config.currency,
        })
    }

    /// 장바구니로 결제 주문 생성
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 빈 장바구니, 재고 부족
    /// * `NotFound` - 삭제되었거나 판매 중지된 상품
    /// * `UpstreamError` - Razorpay 호출 실패
    pub async fn checkout(&self, user_id: &ObjectId) -> AppResult<CheckoutResponse> {
        let mut cart = self.cart_service.load(user_id).await?;

        if cart.is_empty() {
            return Err(AppError::ValidationError("장바구니가 비어 있습니다".to_string()));
        }

        let mut products = Vec::with_capacity(cart.items.len());
        for item in &cart.items {
            products.push(self.product_service.find(&item.product_id).await?);
        }

        if Self::price_cart(&mut cart, &products)? {
            log::info!("💱 결제 전 장바구니 가격 갱신: user={}", user_id);
            cart = self.cart_service.save(&cart).await?;
        }

        let client = RazorpayClient::from_env()?;
        let receipt = format!("rcpt_{}", uuid::Uuid::new_v4().simple());

        let mut notes = HashMap::new();
        notes.insert("user_id".to_string(), user_id.to_hex());

        let gateway_order = client.create_order(cart.subtotal, &receipt, notes).await?;
        let order = self
            .order_repo
            .create(Order::from_cart(&cart, gateway_order.id.clone(), receipt))
            .await?;

        log::info!(
            "💳 결제 주문 생성: {} (user={}, amount={} {})",
            gateway_order.id, user_id, order.amount, order.currency
        );

        Ok(CheckoutResponse {
            order_id: order.id.map(|id| id.to_hex()).unwrap_or_default(),
            gateway_order_id: gateway_order.id,
            amount: order.amount,
            currency: order.currency,
            key_id: client.key_id().to_string(),
        })
    }

    /// 결제 콜백 서명 검증
    ///
    /// # Errors
    ///
    /// * `NotFound` - 주문 없음
    /// * `AuthorizationError` - 다른 사용자의 주문
    /// * `ValidationError` - 서명 불일치 (주문은 `failed`로 기록됨), 이미 실패한 주문
    pub async fn verify(&self, user_id: &ObjectId, request: VerifyPaymentRequest) -> AppResult<OrderResponse> {
        let order = self
            .order_repo
            .find_by_gateway_order_id(&request.razorpay_order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))?;

        if order.user_id != *user_id {
            return Err(AppError::AuthorizationError("본인의 주문만 결제할 수 있습니다".to_string()));
        }

        if order.is_settled() {
            return Self::settled_result(order);
        }

        let client = RazorpayClient::from_env()?;
        let valid = client.verify_signature(
            &request.razorpay_order_id,
            &request.razorpay_payment_id,
            &request.razorpay_signature,
        );

        if !valid {
            self.order_repo
                .mark_failed(&request.razorpay_order_id, &request.razorpay_payment_id, "signature mismatch")
                .await?;
            log::warn!("⚠️ 결제 서명 불일치: order={}", request.razorpay_order_id);
            return Err(AppError::ValidationError("결제 서명이 올바르지 않습니다".to_string()));
        }

        let paid = match self
            .order_repo
            .mark_paid(&request.razorpay_order_id, &request.razorpay_payment_id)
            .await?
        {
            Some(paid) => paid,
            None => {
                // 동시에 들어온 다른 검증 요청이 먼저 정산함
                let current = self
                    .order_repo
                    .find_by_gateway_order_id(&request.razorpay_order_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))?;
                return Self::settled_result(current);
            }
        };

        for item in &paid.items {
            if !self.product_service.decrement_stock(&item.product_id, item.quantity).await? {
                log::warn!(
                    "재고 차감 실패 (재고 부족): product={} qty={} order={}",
                    item.product_id, item.quantity, paid.gateway_order_id
                );
            }
        }

        self.cart_service.clear(user_id).await?;

        log::info!("✅ 결제 완료: order={} payment={}", paid.gateway_order_id, request.razorpay_payment_id);
        Ok(OrderResponse::from(paid))
    }

    pub async fn orders(&self, user_id: &ObjectId) -> AppResult<Vec<OrderResponse>> {
        Ok(self
            .order_repo
            .find_by_user(user_id)
            .await?
            .into_iter()
            .map(OrderResponse::from)
            .collect())
    }

    /// 재고를 확인하고 현재 상품 가격으로 장바구니를 다시 계산합니다.
    /// 단가가 바뀌었으면 `true`입니다.
    fn price_cart(cart: &mut Cart, products: &[Product]) -> AppResult<bool> {
        for item in &cart.items {
            let product = products
                .iter()
                .find(|product| product.id == Some(item.product_id))
                .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))?;
            product.ensure_purchasable(item.quantity)?;
        }

        cart.reprice(products)
    }

    fn settled_result(order: Order) -> AppResult<OrderResponse> {
        match order.status {
            OrderStatus::Failed => Err(AppError::ValidationError(
                "이미 실패 처리된 주문입니다. 다시 결제해 주세요".to_string(),
            )),
            _ => Ok(OrderResponse::from(order)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::catalog::product::fixtures::product;

    fn order_with_status(status: OrderStatus) -> Order {
        let mut cart = Cart::empty(ObjectId::new(), "INR");
        cart.add_item(&product("mug", 250, 5), 1).unwrap();
        let mut order = Order::from_cart(&cart, "order_1".to_string(), "rcpt_1".to_string());
        order.status = status;
        order
    }

    #[test]
    fn test_paid_order_is_returned_again() {
        let response = PaymentService::settled_result(order_with_status(OrderStatus::Paid)).unwrap();
        assert_eq!(response.status, OrderStatus::Paid);
        assert_eq!(response.amount, 250);
    }

    #[test]
    fn test_failed_order_cannot_be_reverified() {
        assert!(matches!(
            PaymentService::settled_result(order_with_status(OrderStatus::Failed)),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_order_amount_uses_price_at_checkout() {
        let mut mug = product("mug", 250, 5);
        let mut cart = Cart::empty(ObjectId::new(), "INR");
        cart.add_item(&mug, 2).unwrap();

        mug.price = 400;
        assert!(PaymentService::price_cart(&mut cart, &[mug]).unwrap());

        let order = Order::from_cart(&cart, "order_2".to_string(), "rcpt_2".to_string());
        assert_eq!(order.amount, 800);
        assert_eq!(order.items[0].unit_price, 400);
    }

    #[test]
    fn test_checkout_pricing_rechecks_stock() {
        let mut mug = product("mug", 250, 5);
        let mut cart = Cart::empty(ObjectId::new(), "INR");
        cart.add_item(&mug, 3).unwrap();

        mug.stock = 2;
        assert!(matches!(
            PaymentService::price_cart(&mut cart, &[mug]),
            Err(AppError::ValidationError(_))
        ));
    }
}
