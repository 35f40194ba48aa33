//! 상품 요청/응답 및 목록 조회 쿼리

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::dto::catalog::category::ImageInput;
use crate::domain::dto::common::PageQuery;
use crate::domain::entities::catalog::product::{ImageRef, Product};
use crate::utils::bson_utils::to_chrono;
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 120, message = "상품 이름은 1-120자 사이여야 합니다"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "설명은 5000자 이하여야 합니다"))]
    pub description: String,

    /// 최소 통화 단위 (예: paise)
    #[validate(range(min = 1, max = 100_000_000_000i64, message = "가격은 1-100000000000 사이여야 합니다"))]
    pub price: i64,

    #[validate(length(min = 1, message = "카테고리 ID가 필요합니다"))]
    pub category_id: String,

    #[serde(default)]
    #[validate(length(max = 10, message = "이미지는 최대 10개까지 등록할 수 있습니다"))]
    #[validate(nested)]
    pub images: Vec<ImageInput>,

    #[serde(default)]
    #[validate(range(min = 0, max = 1_000_000, message = "재고는 0-1000000 사이여야 합니다"))]
    pub stock: i64,

    #[serde(default)]
    pub is_active: Option<bool>,
}

/// 부분 수정 요청: 보낸 필드만 반영합니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 120, message = "상품 이름은 1-120자 사이여야 합니다"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 5000, message = "설명은 5000자 이하여야 합니다"))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 100_000_000_000i64, message = "가격은 1-100000000000 사이여야 합니다"))]
    pub price: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category_id: Option<String>,

    #[validate(length(max = 10, message = "이미지는 최대 10개까지 등록할 수 있습니다"))]
    #[validate(nested)]
    pub images: Option<Vec<ImageInput>>,

    #[validate(range(min = 0, max = 1_000_000, message = "재고는 0-1000000 사이여야 합니다"))]
    pub stock: Option<i64>,

    pub is_active: Option<bool>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
            && self.images.is_none()
            && self.stock.is_none()
            && self.is_active.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Rating,
}

/// `GET /product` 쿼리 파라미터
///
/// `category`는 카테고리 ID 또는 slug를 받습니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_price_range"))]
pub struct ProductQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "검색어는 100자 이하여야 합니다"))]
    pub q: Option<String>,

    #[validate(range(min = 0, message = "min_price는 0 이상이어야 합니다"))]
    pub min_price: Option<i64>,

    #[validate(range(min = 0, message = "max_price는 0 이상이어야 합니다"))]
    pub max_price: Option<i64>,

    #[serde(default)]
    pub sort: ProductSort,

    #[validate(range(min = 1, max = 1_000_000, message = "page는 1-1000000 사이여야 합니다"))]
    pub page: Option<u64>,

    #[validate(range(min = 1, max = 100, message = "limit는 1-100 사이여야 합니다"))]
    pub limit: Option<u64>,
}

impl ProductQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

fn validate_price_range(query: &ProductQuery) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(ValidationError::new("invalid_price_range")
                .with_message("min_price는 max_price보다 클 수 없습니다".into()));
        }
    }
    Ok(())
}

/// 캐시에 그대로 저장되므로 역직렬화도 지원합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub currency: String,
    pub category_id: String,
    pub images: Vec<ImageRef>,
    pub stock: i64,
    pub in_stock: bool,
    pub is_active: bool,
    pub average_rating: f64,
    pub review_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id_string(),
            in_stock: product.stock > 0,
            name: product.name,
            description: product.description,
            price: product.price,
            currency: product.currency,
            category_id: product.category_id.to_hex(),
            images: product.images,
            stock: product.stock,
            is_active: product.is_active,
            average_rating: product.average_rating,
            review_count: product.review_count,
            created_at: to_chrono(product.created_at),
            updated_at: to_chrono(product.updated_at),
        }
    }
}

/// 위시리스트 등 목록에 넣는 축약 정보
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub currency: String,
    pub thumbnail_url: Option<String>,
    pub in_stock: bool,
    pub average_rating: f64,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id_string(),
            name: product.name.clone(),
            price: product.price,
            currency: product.currency.clone(),
            thumbnail_url: product.thumbnail_url(),
            in_stock: product.is_active && product.stock > 0,
            average_rating: product.average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::catalog::product::{MAX_PRICE, MAX_STOCK};

    #[test]
    fn test_sort_parses_from_snake_case() {
        let sort: ProductSort = serde_json::from_str("\"price_desc\"").unwrap();
        assert_eq!(sort, ProductSort::PriceDesc);
        assert_eq!(ProductSort::default(), ProductSort::Newest);
    }

    #[test]
    fn test_query_rejects_inverted_price_range() {
        let query = ProductQuery {
            min_price: Some(500),
            max_price: Some(100),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_query_rejects_large_limit() {
        let query = ProductQuery {
            limit: Some(101),
            ..Default::default()
        };
        assert!(query.validate().is_err());
        assert_eq!(ProductQuery::default().page_query().limit(), 20);
    }

    #[test]
    fn test_create_product_requires_positive_price() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"name": "Mug", "price": 0, "category_id": "507f1f77bcf86cd799439011"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_product_accepts_largest_price_and_stock() {
        let req: CreateProductRequest = serde_json::from_str(&format!(
            r#"{{"name": "Mug", "price": {}, "stock": {}, "category_id": "507f1f77bcf86cd799439011"}}"#,
            MAX_PRICE, MAX_STOCK
        ))
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_product_rejects_price_that_would_overflow_totals() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"name": "Mug", "price": 4611686018427387904, "category_id": "507f1f77bcf86cd799439011"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());

        let req: UpdateProductRequest = serde_json::from_str(r#"{"price": 100000000001, "stock": 1000001}"#).unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("stock"));
    }

    #[test]
    fn test_empty_update_detected() {
        let req: UpdateProductRequest = serde_json::from_str("{}").unwrap();
        assert!(req.is_empty());
        let req: UpdateProductRequest = serde_json::from_str(r#"{"stock": 3}"#).unwrap();
        assert!(!req.is_empty());
    }
}
