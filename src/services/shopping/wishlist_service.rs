use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::{
            catalog::product::ProductSummary,
            shopping::wishlist::{AddWishlistItemRequest, MoveToCartResponse, WishlistResponse},
        },
        entities::shopping::wishlist::Wishlist,
    },
    repositories::{catalog::ProductRepository, shopping::WishlistRepository},
    services::{catalog::ProductService, shopping::CartService},
    utils::bson_utils::parse_object_id,
};

/// 위시리스트 (상품 ID 집합)
#[service(name = "wishlist")]
pub struct WishlistService {
    wishlist_repo: Arc<WishlistRepository>,
    product_repo: Arc<ProductRepository>,
    product_service: Arc<ProductService>,
    cart_service: Arc<CartService>,
}

impl WishlistService {
    async fn load(&self, user_id: &ObjectId) -> AppResult<Wishlist> {
        Ok(self
            .wishlist_repo
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| Wishlist::empty(*user_id)))
    }

    pub async fn get(&self, user_id: &ObjectId) -> AppResult<WishlistResponse> {
        let wishlist = self.load(user_id).await?;
        self.to_response(wishlist).await
    }

    /// 이미 담긴 상품이면 아무것도 바꾸지 않습니다.
    pub async fn add(&self, user_id: &ObjectId, request: AddWishlistItemRequest) -> AppResult<WishlistResponse> {
        let product_id = parse_object_id(&request.product_id, "상품")?;
        self.product_service.find_active(&product_id).await?;

        let mut wishlist = self.load(user_id).await?;
        if !wishlist.add(product_id) {
            return self.to_response(wishlist).await;
        }

        let saved = self.wishlist_repo.save(&wishlist).await?;
        self.to_response(saved).await
    }

    pub async fn remove(&self, user_id: &ObjectId, product_id: &str) -> AppResult<WishlistResponse> {
        let product_id = parse_object_id(product_id, "상품")?;

        let mut wishlist = self.load(user_id).await?;
        if !wishlist.remove(&product_id) {
            return Err(AppError::NotFound("위시리스트에 없는 상품입니다".to_string()));
        }

        let saved = self.wishlist_repo.save(&wishlist).await?;
        self.to_response(saved).await
    }

    /// 장바구니에 1개 담은 뒤 위시리스트에서 뺍니다.
    /// 장바구니 추가가 실패하면 위시리스트는 그대로입니다.
    pub async fn move_to_cart(&self, user_id: &ObjectId, product_id: &str) -> AppResult<MoveToCartResponse> {
        let product_id = parse_object_id(product_id, "상품")?;

        let mut wishlist = self.load(user_id).await?;
        if !wishlist.contains(&product_id) {
            return Err(AppError::NotFound("위시리스트에 없는 상품입니다".to_string()));
        }

        let cart = self.cart_service.add_product(user_id, &product_id, 1).await?;

        wishlist.remove(&product_id);
        let saved = self.wishlist_repo.save(&wishlist).await?;

        Ok(MoveToCartResponse {
            wishlist: self.to_response(saved).await?,
            cart,
        })
    }

    pub async fn clear(&self, user_id: &ObjectId) -> AppResult<WishlistResponse> {
        let mut wishlist = self.load(user_id).await?;
        wishlist.clear();
        let saved = self.wishlist_repo.save(&wishlist).await?;
        self.to_response(saved).await
    }

    /// 담긴 순서대로 상품 요약을 붙입니다. 비활성/삭제 상품은 요약에서 빠집니다.
    async fn to_response(&self, wishlist: Wishlist) -> AppResult<WishlistResponse> {
        let products = self.product_repo.find_by_ids(&wishlist.product_ids).await?;
        let by_id: HashMap<ObjectId, _> = products
            .iter()
            .filter(|product| product.is_active)
            .filter_map(|product| product.id.map(|id| (id, product)))
            .collect();

        let summaries = wishlist
            .product_ids
            .iter()
            .filter_map(|id| by_id.get(id).map(|product| ProductSummary::from(*product)))
            .collect();

        Ok(WishlistResponse {
            user_id: wishlist.user_id.to_hex(),
            product_ids: wishlist.product_ids.iter().map(|id| id.to_hex()).collect(),
            products: summaries,
            item_count: wishlist.item_count,
        })
    }
}
