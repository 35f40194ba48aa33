//! # 상품 리포지토리
//!
//! `products` 컬렉션의 CRUD, 목록 검색, 재고 차감, 평점 집계 반영을 담당합니다.
//! 검색 필터와 정렬 문서는 순수 함수([`build_filter`], [`sort_document`])로
//! 분리되어 있어 DB 없이 테스트할 수 있습니다.
//!
//! ## 인덱스
//!
//! - `category_id`
//! - `created_at` (desc)
//! - `is_active` + `price`

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, DateTime, Document}, options::ReturnDocument};
use futures_util::{FutureExt, TryStreamExt};
use singleton_macro::repository;
use crate::{
    core::errors::AppResult,
    db::Database,
    domain::{
        dto::catalog::product::{ProductQuery, ProductSort},
        entities::{catalog::product::Product, engagement::review::RatingSummary},
    },
    repositories::base::{find_page, index, IndexRegistration},
    utils::string_utils::escape_regex,
};

#[repository(name = "product", collection = "products")]
pub struct ProductRepository {
    db: Arc<Database>,
}

/// 목록 조회 필터
///
/// * `category_id` - 서비스 계층에서 ID 또는 slug를 해석한 결과
/// * `include_inactive` - 관리자 조회일 때만 `true`
pub fn build_filter(query: &ProductQuery, category_id: Option<ObjectId>, include_inactive: bool) -> Document {
    let mut filter = Document::new();

    if !include_inactive {
        filter.insert("is_active", true);
    }

    if let Some(category_id) = category_id {
        filter.insert("category_id", category_id);
    }

    if let Some(q) = &query.q {
        filter.insert("name", doc! { "$regex": escape_regex(q), "$options": "i" });
    }

    let mut price = Document::new();
    if let Some(min) = query.min_price {
        price.insert("$gte", min);
    }
    if let Some(max) = query.max_price {
        price.insert("$lte", max);
    }
    if !price.is_empty() {
        filter.insert("price", price);
    }

    filter
}

/// 정렬 기준. 동률일 때 순서가 흔들리지 않도록 `_id`를 마지막 키로 둡니다.
pub fn sort_document(sort: ProductSort) -> Document {
    match sort {
        ProductSort::Newest => doc! { "created_at": -1, "_id": -1 },
        ProductSort::PriceAsc => doc! { "price": 1, "_id": 1 },
        ProductSort::PriceDesc => doc! { "price": -1, "_id": 1 },
        ProductSort::Rating => doc! { "average_rating": -1, "review_count": -1, "_id": 1 },
    }
}

impl ProductRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Product>> {
        Ok(self.collection::<Product>().find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let products = self
            .collection::<Product>()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(products)
    }

    pub async fn search(&self, filter: Document, sort: Document, skip: u64, limit: u64) -> AppResult<(Vec<Product>, u64)> {
        find_page(&self.collection::<Product>(), filter, sort, skip, limit).await
    }

    pub async fn create(&self, mut product: Product) -> AppResult<Product> {
        let result = self.collection::<Product>().insert_one(&product).await?;
        product.id = result.inserted_id.as_object_id();
        Ok(product)
    }

    pub async fn update(&self, id: &ObjectId, mut update_doc: Document) -> AppResult<Option<Product>> {
        update_doc.insert("updated_at", DateTime::now());

        Ok(self
            .collection::<Product>()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update_doc })
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Product>().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn count_by_category(&self, category_id: &ObjectId) -> AppResult<u64> {
        Ok(self
            .collection::<Product>()
            .count_documents(doc! { "category_id": category_id })
            .await?)
    }

    /// 재고가 충분할 때만 차감합니다. 차감되지 않았으면 `false`.
    pub async fn decrement_stock(&self, id: &ObjectId, quantity: i64) -> AppResult<bool> {
        let result = self
            .collection::<Product>()
            .update_one(
                doc! { "_id": id, "stock": { "$gte": quantity } },
                doc! {
                    "$inc": { "stock": -quantity },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    pub async fn update_rating(&self, id: &ObjectId, summary: RatingSummary) -> AppResult<Option<Product>> {
        self.update(
            id,
            doc! {
                "average_rating": summary.average,
                "review_count": summary.count,
            },
        )
        .await
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        self.collection::<Product>()
            .create_indexes([
                index(doc! { "category_id": 1 }, "category_id", false),
                index(doc! { "created_at": -1 }, "created_at_desc", false),
                index(doc! { "is_active": 1, "price": 1 }, "active_price", false),
            ])
            .await?;
        Ok(())
    }
}

inventory::submit! {
    IndexRegistration {
        repository: "product_repository",
        ensure: || async { ProductRepository::instance().create_indexes().await }.boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_filter_hides_inactive() {
        let filter = build_filter(&ProductQuery::default(), None, false);
        assert!(filter.get_bool("is_active").unwrap());

        let admin_filter = build_filter(&ProductQuery::default(), None, true);
        assert!(admin_filter.get("is_active").is_none());
    }

    #[test]
    fn test_filter_combines_category_search_and_price() {
        let category_id = ObjectId::new();
        let query = ProductQuery {
            q: Some("brass lamp".to_string()),
            min_price: Some(1000),
            max_price: Some(5000),
            ..Default::default()
        };

        let filter = build_filter(&query, Some(category_id), false);

        assert_eq!(filter.get_object_id("category_id").unwrap(), category_id);
        let name = filter.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), "brass lamp");
        assert_eq!(name.get_str("$options").unwrap(), "i");
        let price = filter.get_document("price").unwrap();
        assert_eq!(price.get_i64("$gte").unwrap(), 1000);
        assert_eq!(price.get_i64("$lte").unwrap(), 5000);
    }

    #[test]
    fn test_search_text_is_escaped() {
        let query = ProductQuery {
            q: Some("a+b (x)".to_string()),
            ..Default::default()
        };
        let filter = build_filter(&query, None, true);
        let name = filter.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), r"a\+b \(x\)");
    }

    #[test]
    fn test_sort_documents() {
        assert_eq!(sort_document(ProductSort::PriceAsc), doc! { "price": 1, "_id": 1 });
        assert_eq!(sort_document(ProductSort::Newest).get_i32("created_at").unwrap(), -1);
        assert_eq!(sort_document(ProductSort::Rating).keys().next().map(String::as_str), Some("average_rating"));
    }
}
