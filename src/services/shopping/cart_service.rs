//! # 장바구니 서비스
//!
//! 장바구니는 사용자당 문서 하나로, 변경할 때마다 전체를 다시 저장합니다.
//! 동시에 들어온 변경은 마지막 저장이 이깁니다.
//!
//! 합계 불변식(`line_total`, `subtotal`, `item_count`)은
//! [`Cart`] 엔티티 메서드가 매 변경마다 다시 계산해 보장합니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    config::RazorpayConfig,
    core::errors::{AppError, AppResult},
    domain::{
        dto::shopping::cart::{AddCartItemRequest, CartResponse, UpdateCartItemRequest},
        entities::shopping::cart::Cart,
    },
    repositories::shopping::CartRepository,
    services::catalog::ProductService,
    utils::bson_utils::parse_object_id,
};

#[service(name = "cart")]
pub struct CartService {
    cart_repo: Arc<CartRepository>,
    product_service: Arc<ProductService>,
}

impl CartService {
    /// 저장된 장바구니, 없으면 빈 장바구니
    pub async fn load(&self, user_id: &ObjectId) -> AppResult<Cart> {
        Ok(self
            .cart_repo
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| Cart::empty(*user_id, &RazorpayConfig::currency())))
    }

    pub async fn get(&self, user_id: &ObjectId) -> AppResult<CartResponse> {
        let mut cart = self.load(user_id).await?;
        cart.recalculate()?;
        Ok(CartResponse::from(cart))
    }

    pub async fn add_item(&self, user_id: &ObjectId, request: AddCartItemRequest) -> AppResult<CartResponse> {
        let product_id = parse_object_id(&request.product_id, "상품")?;
        self.add_product(user_id, &product_id, request.quantity).await
    }

    /// 상품을 담거나 기존 라인 수량을 늘립니다.
    ///
    /// # Errors
    ///
    /// * `NotFound` - 상품이 없거나 판매 중이 아님
    /// * `ValidationError` - 합산 수량이 재고를 넘음
    pub async fn add_product(&self, user_id: &ObjectId, product_id: &ObjectId, quantity: i64) -> AppResult<CartResponse> {
        let product = self.product_service.find_active(product_id).await?;

        let mut cart = self.load(user_id).await?;
        cart.add_item(&product, quantity)?;

        let saved = self.cart_repo.save(&cart).await?;
        log::debug!("🛒 장바구니 추가: user={} product={} qty={}", user_id, product_id, quantity);

        Ok(CartResponse::from(saved))
    }

    /// 수량 변경. 0이면 라인을 삭제합니다.
    pub async fn update_item(&self, user_id: &ObjectId, product_id: &str, request: UpdateCartItemRequest) -> AppResult<CartResponse> {
        let product_id = parse_object_id(product_id, "상품")?;

        if request.quantity == 0 {
            return self.remove_line(user_id, &product_id).await;
        }

        let mut cart = self.load(user_id).await?;
        if cart.quantity_of(&product_id) == 0 {
            return Err(AppError::NotFound("장바구니에 없는 상품입니다".to_string()));
        }

        let product = self.product_service.find_active(&product_id).await?;
        cart.set_quantity(&product, request.quantity)?;

        Ok(CartResponse::from(self.cart_repo.save(&cart).await?))
    }

    pub async fn remove_item(&self, user_id: &ObjectId, product_id: &str) -> AppResult<CartResponse> {
        let product_id = parse_object_id(product_id, "상품")?;
        self.remove_line(user_id, &product_id).await
    }

    pub async fn clear(&self, user_id: &ObjectId) -> AppResult<CartResponse> {
        let mut cart = self.load(user_id).await?;
        cart.clear();
        Ok(CartResponse::from(self.cart_repo.save(&cart).await?))
    }

    /// 결제 직전 재계산한 장바구니를 저장합니다.
    pub async fn save(&self, cart: &Cart) -> AppResult<Cart> {
        self.cart_repo.save(cart).await
    }

    async fn remove_line(&self, user_id: &ObjectId, product_id: &ObjectId) -> AppResult<CartResponse> {
        let mut cart = self.load(user_id).await?;

        if !cart.remove_item(product_id)? {
            return Err(AppError::NotFound("장바구니에 없는 상품입니다".to_string()));
        }

        Ok(CartResponse::from(self.cart_repo.save(&cart).await?))
    }
}
