//! # 상품 서비스
//!
//! 상품 목록 검색, 조회, 관리자 CRUD와 리뷰 집계 반영을 담당합니다.
//!
//! ## 노출 규칙
//!
//! 비활성 상품(`is_active = false`)은 관리자에게만 보입니다.
//! 일반 사용자가 ID로 조회하면 404를 받습니다.
//!
//! ## 캐싱 전략
//!
//! - 개별 상품: `product:{id}` (10분)
//! - 목록 조회는 쿼리 조합이 많아 캐싱하지 않습니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, to_bson, DateTime};
use singleton_macro::service;
use crate::{
    caching::redis::RedisClient,
    config::RazorpayConfig,
    core::errors::{AppError, AppResult, ErrorContext},
    domain::{
        dto::{
            catalog::product::{CreateProductRequest, ProductQuery, ProductResponse, UpdateProductRequest},
            common::Paginated,
        },
        entities::{
            catalog::product::{ImageRef, Product},
            engagement::review::RatingSummary,
        },
    },
    repositories::{
        catalog::{product_repo, ProductRepository},
        engagement::ReviewRepository,
    },
    services::catalog::CategoryService,
    utils::bson_utils::parse_object_id,
};

const CACHE_TTL_SECONDS: u64 = 600;

#[service(name = "product")]
pub struct ProductService {
    product_repo: Arc<ProductRepository>,
    review_repo: Arc<ReviewRepository>,
    category_service: Arc<CategoryService>,
    redis: Arc<RedisClient>,
}

impl ProductService {
    fn cache_key(id: &ObjectId) -> String {
        format!("product:{}", id.to_hex())
    }

    /// 상품 목록 검색
    ///
    /// 존재하지 않는 카테고리 slug로 필터링하면 빈 페이지를 돌려줍니다.
    pub async fn list(&self, query: &ProductQuery, include_inactive: bool) -> AppResult<Paginated<ProductResponse>> {
        let page = query.page_query();

        let category_id = match &query.category {
            Some(category) => match self.category_service.resolve(category).await? {
                Some(id) => Some(id),
                None => return Ok(Paginated::new(Vec::new(), &page, 0)),
            },
            None => None,
        };

        let filter = product_repo::build_filter(query, category_id, include_inactive);
        let sort = product_repo::sort_document(query.sort);

        let (products, total) = self
            .product_repo
            .search(filter, sort, page.skip(), page.limit())
            .await?;

        Ok(Paginated::new(products, &page, total).map(ProductResponse::from))
    }

    pub async fn get(&self, id: &str, include_inactive: bool) -> AppResult<ProductResponse> {
        let object_id = parse_object_id(id, "상품")?;
        let cache_key = Self::cache_key(&object_id);

        let product = match self.redis.get::<ProductResponse>(&cache_key).await {
            Ok(Some(cached)) => cached,
            _ => {
                let product = ProductResponse::from(self.find(&object_id).await?);
                RedisClient::report("쓰기", &cache_key, self.redis.set_with_expiry(&cache_key, &product, CACHE_TTL_SECONDS).await);
                product
            }
        };

        if !product.is_active && !include_inactive {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }

        Ok(product)
    }

    /// 장바구니, 위시리스트, 리뷰에서 쓰는 엔티티 조회 (캐시 미사용)
    pub async fn find(&self, id: &ObjectId) -> AppResult<Product> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))
    }

    /// 판매 중인 상품만 반환합니다.
    pub async fn find_active(&self, id: &ObjectId) -> AppResult<Product> {
        let product = self.find(id).await?;
        if !product.is_active {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }
        Ok(product)
    }

    pub async fn create(&self, request: CreateProductRequest) -> AppResult<ProductResponse> {
        let category_id = parse_object_id(&request.category_id, "카테고리")?;
        self.category_service.ensure_exists(&category_id).await?;

        let now = DateTime::now();
        let product = Product {
            id: None,
            name: request.name.trim().to_string(),
            description: request.description.trim().to_string(),
            price: request.price,
            currency: RazorpayConfig::currency(),
            category_id,
            images: request.images.into_iter().map(ImageRef::from).collect(),
            stock: request.stock,
            is_active: request.is_active.unwrap_or(true),
            average_rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        };

        let created = self.product_repo.create(product).await?;
        log::info!("🛍️ 상품 등록: {} ({})", created.name, created.id_string());

        Ok(ProductResponse::from(created))
    }

    pub async fn update(&self, id: &str, request: UpdateProductRequest) -> AppResult<ProductResponse> {
        let object_id = parse_object_id(id, "상품")?;

        if request.is_empty() {
            return Err(AppError::ValidationError("변경할 항목이 없습니다".to_string()));
        }

        let mut update_doc = doc! {};

        if let Some(name) = request.name {
            update_doc.insert("name", name.trim());
        }
        if let Some(description) = request.description {
            update_doc.insert("description", description.trim());
        }
        if let Some(price) = request.price {
            update_doc.insert("price", price);
        }
        if let Some(category_id) = request.category_id {
            let category_id = parse_object_id(&category_id, "카테고리")?;
            self.category_service.ensure_exists(&category_id).await?;
            update_doc.insert("category_id", category_id);
        }
        if let Some(images) = request.images {
            let images: Vec<ImageRef> = images.into_iter().map(ImageRef::from).collect();
            let images = to_bson(&images).context("이미지 직렬화 실패")?;
            update_doc.insert("images", images);
        }
        if let Some(stock) = request.stock {
            update_doc.insert("stock", stock);
        }
        if let Some(is_active) = request.is_active {
            update_doc.insert("is_active", is_active);
        }

        let updated = self
            .product_repo
            .update(&object_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))?;

        self.invalidate(&object_id).await;
        Ok(ProductResponse::from(updated))
    }

    /// 상품과 해당 상품의 리뷰를 삭제합니다.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id, "상품")?;

        if !self.product_repo.delete(&object_id).await? {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }

        let removed_reviews = self.review_repo.delete_by_product(&object_id).await?;
        self.invalidate(&object_id).await;

        log::info!("🗑️ 상품 삭제: {} (리뷰 {}개 함께 삭제)", object_id, removed_reviews);
        Ok(())
    }

    pub async fn apply_rating(&self, id: &ObjectId, summary: RatingSummary) -> AppResult<()> {
        self.product_repo.update_rating(id, summary).await?;
        self.invalidate(id).await;
        Ok(())
    }

    /// 재고 차감 (부족하면 `false`)
    pub async fn decrement_stock(&self, id: &ObjectId, quantity: i64) -> AppResult<bool> {
        let decremented = self.product_repo.decrement_stock(id, quantity).await?;
        self.invalidate(id).await;
        Ok(decremented)
    }

    async fn invalidate(&self, id: &ObjectId) {
        let key = Self::cache_key(id);
        RedisClient::report("삭제", &key, self.redis.del(&key).await);
    }
}
