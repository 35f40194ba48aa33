//! # 카테고리 서비스
//!
//! 카테고리 CRUD와 읽기 캐시를 담당합니다.
//!
//! ## 캐싱 전략
//!
//! - 전체 목록: `category:all`
//! - 개별: `category:{id}`
//! - TTL: 10분, 변경 시 즉시 무효화
//!
//! Redis가 비활성화되어 있거나 실패해도 요청은 MongoDB 조회로 계속 처리됩니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use singleton_macro::service;
use crate::{
    caching::redis::RedisClient,
    core::errors::{AppError, AppResult, ErrorContext},
    domain::{
        dto::catalog::category::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
        entities::catalog::{category::Category, product::ImageRef},
    },
    repositories::catalog::{CategoryRepository, ProductRepository},
    utils::{bson_utils::parse_object_id, string_utils::slugify},
};

const CACHE_TTL_SECONDS: u64 = 600;
const ALL_KEY: &str = "category:all";

#[service(name = "category")]
pub struct CategoryService {
    category_repo: Arc<CategoryRepository>,
    product_repo: Arc<ProductRepository>,
    redis: Arc<RedisClient>,
}

impl CategoryService {
    fn cache_key(id: &str) -> String {
        format!("category:{}", id)
    }

    pub async fn list(&self) -> AppResult<Vec<CategoryResponse>> {
        if let Ok(Some(cached)) = self.redis.get::<Vec<CategoryResponse>>(ALL_KEY).await {
            return Ok(cached);
        }

        let categories: Vec<CategoryResponse> = self
            .category_repo
            .find_all()
            .await?
            .into_iter()
            .map(CategoryResponse::from)
            .collect();

        RedisClient::report("쓰기", ALL_KEY, self.redis.set_with_expiry(ALL_KEY, &categories, CACHE_TTL_SECONDS).await);

        Ok(categories)
    }

    pub async fn get(&self, id: &str) -> AppResult<CategoryResponse> {
        let object_id = parse_object_id(id, "카테고리")?;
        let cache_key = Self::cache_key(&object_id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<CategoryResponse>(&cache_key).await {
            return Ok(cached);
        }

        let category = CategoryResponse::from(self.find(&object_id).await?);
        RedisClient::report("쓰기", &cache_key, self.redis.set_with_expiry(&cache_key, &category, CACHE_TTL_SECONDS).await);

        Ok(category)
    }

    /// 카테고리 slug 또는 ID를 ObjectId로 해석합니다. 둘 다 아니면 `None`.
    ///
    /// 24자리 16진수 slug도 있을 수 있으므로 slug를 먼저 찾습니다.
    pub async fn resolve(&self, id_or_slug: &str) -> AppResult<Option<ObjectId>> {
        let by_slug = self
            .category_repo
            .find_by_slug(&slugify(id_or_slug))
            .await?
            .and_then(|category| category.id);

        Ok(Self::pick_category(by_slug, id_or_slug))
    }

    fn pick_category(by_slug: Option<ObjectId>, id_or_slug: &str) -> Option<ObjectId> {
        by_slug.or_else(|| ObjectId::parse_str(id_or_slug).ok())
    }

    pub async fn create(&self, request: CreateCategoryRequest) -> AppResult<CategoryResponse> {
        let name = request.name.trim().to_string();
        let category = Category::new(name, request.description, request.image.map(ImageRef::from));

        if category.slug.is_empty() {
            return Err(AppError::ValidationError(
                "카테고리 이름에는 영문자나 숫자가 포함되어야 합니다".to_string(),
            ));
        }

        if self.category_repo.find_by_slug(&category.slug).await?.is_some() {
            return Err(AppError::ConflictError("같은 이름의 카테고리가 이미 존재합니다".to_string()));
        }

        let created = self.category_repo.create(category).await?;
        self.invalidate(None).await;

        log::info!("📂 카테고리 생성: {} ({})", created.name, created.slug);
        Ok(CategoryResponse::from(created))
    }

    pub async fn update(&self, id: &str, request: UpdateCategoryRequest) -> AppResult<CategoryResponse> {
        let object_id = parse_object_id(id, "카테고리")?;
        let mut update_doc = doc! {};

        if let Some(name) = request.name {
            let slug = slugify(&name);
            if slug.is_empty() {
                return Err(AppError::ValidationError(
                    "카테고리 이름에는 영문자나 숫자가 포함되어야 합니다".to_string(),
                ));
            }
            if let Some(existing) = self.category_repo.find_by_slug(&slug).await? {
                if existing.id != Some(object_id) {
                    return Err(AppError::ConflictError("같은 이름의 카테고리가 이미 존재합니다".to_string()));
                }
            }
            update_doc.insert("name", name.trim());
            update_doc.insert("slug", slug);
        }

        if let Some(description) = request.description {
            update_doc.insert("description", description);
        }

        if let Some(image) = request.image {
            let image = to_bson(&ImageRef::from(image)).context("이미지 직렬화 실패")?;
            update_doc.insert("image", image);
        }

        if update_doc.is_empty() {
            return Err(AppError::ValidationError("변경할 항목이 없습니다".to_string()));
        }

        let updated = self
            .category_repo
            .update(&object_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))?;

        self.invalidate(Some(&object_id)).await;
        Ok(CategoryResponse::from(updated))
    }

    /// 상품이 남아 있는 카테고리는 삭제할 수 없습니다.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id, "카테고리")?;

        let product_count = self.product_repo.count_by_category(&object_id).await?;
        if product_count > 0 {
            return Err(AppError::ConflictError(format!(
                "카테고리에 상품 {}개가 남아 있어 삭제할 수 없습니다",
                product_count
            )));
        }

        if !self.category_repo.delete(&object_id).await? {
            return Err(AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()));
        }

        self.invalidate(Some(&object_id)).await;
        log::info!("🗑️ 카테고리 삭제: {}", object_id);
        Ok(())
    }

    pub async fn ensure_exists(&self, id: &ObjectId) -> AppResult<()> {
        if self.category_repo.exists(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))
        }
    }

    async fn find(&self, id: &ObjectId) -> AppResult<Category> {
        self.category_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))
    }

    async fn invalidate(&self, id: Option<&ObjectId>) {
        RedisClient::report("삭제", ALL_KEY, self.redis.del(ALL_KEY).await);
        if let Some(id) = id {
            let key = Self::cache_key(&id.to_hex());
            RedisClient::report("삭제", &key, self.redis.del(&key).await);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX_SLUG: &str = "507f1f77bcf86cd799439011";

    #[test]
    fn test_hex_looking_slug_resolves_to_its_category() {
        let category_id = ObjectId::new();
        assert_eq!(CategoryService::pick_category(Some(category_id), HEX_SLUG), Some(category_id));
    }

    #[test]
    fn test_object_id_used_when_no_slug_matches() {
        let parsed = ObjectId::parse_str(HEX_SLUG).unwrap();
        assert_eq!(CategoryService::pick_category(None, HEX_SLUG), Some(parsed));
        assert_eq!(CategoryService::pick_category(None, "no-such-category"), None);
    }
}
