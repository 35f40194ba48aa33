//! 장바구니 엔티티 (`carts` 컬렉션)
//!
//! 사용자당 하나의 문서입니다. 항목을 바꾸는 모든 메서드는 합계를 다시 계산하므로
//! 다음 관계가 항상 유지됩니다. 합계가 i64를 넘으면 `ValidationError`이고
//! 장바구니는 바뀌지 않습니다.
//!
//! ```text
//! line_total = unit_price × quantity
//! subtotal   = Σ line_total
//! item_count = Σ quantity
//! ```

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::catalog::product::Product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ObjectId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub unit_price: i64,
    pub quantity: i64,
    pub line_total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub items: Vec<CartItem>,
    pub item_count: i64,
    pub subtotal: i64,
    pub currency: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Cart {
    pub fn empty(user_id: ObjectId, currency: &str) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id,
            items: Vec::new(),
            item_count: 0,
            subtotal: 0,
            currency: currency.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quantity_of(&self, product_id: &ObjectId) -> i64 {
        self.items
            .iter()
            .find(|item| &item.product_id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// 상품을 담습니다. 이미 있으면 수량을 더하고 가격/이름을 최신 값으로 갱신합니다.
    ///
    /// 실패하면 장바구니는 바뀌지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 수량이 1 미만, 합산 수량이 재고 초과, 합계 범위 초과
    /// * `AppError::NotFound` - 판매 중지된 상품
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> AppResult<()> {
        if quantity < 1 {
            return Err(AppError::ValidationError("수량은 1 이상이어야 합니다".to_string()));
        }

        let product_id = Self::product_id(product)?;
        let new_quantity = self
            .quantity_of(&product_id)
            .checked_add(quantity)
            .ok_or_else(total_out_of_range)?;
        product.ensure_purchasable(new_quantity)?;

        let items = self.items_with_line(product, product_id, new_quantity);
        self.replace_items(items)
    }

    /// 이미 담긴 상품의 수량을 지정한 값으로 바꿉니다. 0이면 항목을 제거합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 장바구니에 없는 상품
    /// * `AppError::ValidationError` - 음수 수량, 재고 초과, 합계 범위 초과
    pub fn set_quantity(&mut self, product: &Product, quantity: i64) -> AppResult<()> {
        if quantity < 0 {
            return Err(AppError::ValidationError("수량은 0 이상이어야 합니다".to_string()));
        }

        let product_id = Self::product_id(product)?;
        if self.quantity_of(&product_id) == 0 {
            return Err(AppError::NotFound("장바구니에 없는 상품입니다".to_string()));
        }

        if quantity == 0 {
            self.remove_item(&product_id)?;
            return Ok(());
        }

        product.ensure_purchasable(quantity)?;
        let items = self.items_with_line(product, product_id, quantity);
        self.replace_items(items)
    }

    /// 항목을 제거하고 제거 여부를 돌려줍니다.
    pub fn remove_item(&mut self, product_id: &ObjectId) -> AppResult<bool> {
        let items: Vec<CartItem> = self
            .items
            .iter()
            .filter(|item| &item.product_id != product_id)
            .cloned()
            .collect();
        let removed = items.len() != self.items.len();
        self.replace_items(items)?;
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.subtotal = 0;
        self.item_count = 0;
        self.updated_at = DateTime::now();
    }

    /// 각 항목의 단가/이름/이미지를 현재 상품 정보로 바꾸고 합계를 다시 계산합니다.
    ///
    /// `products`에 없는 항목은 그대로 둡니다. 단가가 하나라도 바뀌면 `true`입니다.
    pub fn reprice(&mut self, products: &[Product]) -> AppResult<bool> {
        let mut changed = false;
        let mut items = self.items.clone();

        for item in &mut items {
            let Some(product) = products.iter().find(|product| product.id == Some(item.product_id)) else {
                continue;
            };
            if item.unit_price != product.price {
                changed = true;
            }
            item.unit_price = product.price;
            item.name = product.name.clone();
            item.image_url = product.thumbnail_url();
        }

        self.replace_items(items)?;
        Ok(changed)
    }

    /// 항목별 합계와 장바구니 합계를 다시 계산합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 합계가 i64 범위를 넘는 경우 (장바구니는 그대로)
    pub fn recalculate(&mut self) -> AppResult<()> {
        let items = self.items.clone();
        self.replace_items(items)
    }

    /// 합계를 모두 계산한 뒤에만 항목과 합계를 교체합니다.
    fn replace_items(&mut self, mut items: Vec<CartItem>) -> AppResult<()> {
        let mut subtotal: i64 = 0;
        let mut item_count: i64 = 0;

        for item in &mut items {
            item.line_total = line_total(item.unit_price, item.quantity)?;
            subtotal = subtotal.checked_add(item.line_total).ok_or_else(total_out_of_range)?;
            item_count = item_count.checked_add(item.quantity).ok_or_else(total_out_of_range)?;
        }

        self.items = items;
        self.subtotal = subtotal;
        self.item_count = item_count;
        self.updated_at = DateTime::now();
        Ok(())
    }

    fn items_with_line(&self, product: &Product, product_id: ObjectId, quantity: i64) -> Vec<CartItem> {
        let line = CartItem {
            product_id,
            name: product.name.clone(),
            image_url: product.thumbnail_url(),
            unit_price: product.price,
            quantity,
            line_total: 0,
        };

        let mut items = self.items.clone();
        match items.iter_mut().find(|item| item.product_id == product_id) {
            Some(existing) => *existing = line,
            None => items.push(line),
        }
        items
    }

    fn product_id(product: &Product) -> AppResult<ObjectId> {
        product
            .id
            .ok_or_else(|| AppError::InternalError("상품 ID가 없습니다".to_string()))
    }
}

fn line_total(unit_price: i64, quantity: i64) -> AppResult<i64> {
    unit_price.checked_mul(quantity).ok_or_else(total_out_of_range)
}

fn total_out_of_range() -> AppError {
    AppError::ValidationError("장바구니 금액이 허용 범위를 넘었습니다".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::catalog::product::{fixtures::product, MAX_PRICE, MAX_STOCK};

    fn cart() -> Cart {
        Cart::empty(ObjectId::new(), "INR")
    }

    #[test]
    fn test_add_item_recomputes_totals() {
        let mug = product("mug", 250, 10);
        let tee = product("tee", 1_000, 10);
        let mut cart = cart();

        cart.add_item(&mug, 2).unwrap();
        cart.add_item(&tee, 1).unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.item_count, 3);
        assert_eq!(cart.subtotal, 2 * 250 + 1_000);
    }

    #[test]
    fn test_adding_same_product_increments_line() {
        let mug = product("mug", 250, 10);
        let mut cart = cart();

        cart.add_item(&mug, 2).unwrap();
        cart.add_item(&mug, 3).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.items[0].line_total, 1_250);
        assert_eq!(cart.subtotal, 1_250);
    }

    #[test]
    fn test_add_refreshes_price_snapshot() {
        let mut mug = product("mug", 250, 10);
        let mut cart = cart();
        cart.add_item(&mug, 1).unwrap();

        mug.price = 300;
        cart.add_item(&mug, 1).unwrap();

        assert_eq!(cart.items[0].unit_price, 300);
        assert_eq!(cart.subtotal, 600);
    }

    #[test]
    fn test_add_rejects_quantity_over_stock() {
        let mug = product("mug", 250, 3);
        let mut cart = cart();
        cart.add_item(&mug, 2).unwrap();

        let result = cart.add_item(&mug, 2);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(cart.quantity_of(&mug.id.unwrap()), 2);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mug = product("mug", 250, 3);
        let mut cart = cart();
        assert!(cart.add_item(&mug, 0).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_updates_totals() {
        let mug = product("mug", 250, 10);
        let mut cart = cart();
        cart.add_item(&mug, 1).unwrap();

        cart.set_quantity(&mug, 4).unwrap();

        assert_eq!(cart.item_count, 4);
        assert_eq!(cart.subtotal, 1_000);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mug = product("mug", 250, 10);
        let tee = product("tee", 1_000, 10);
        let mut cart = cart();
        cart.add_item(&mug, 1).unwrap();
        cart.add_item(&tee, 1).unwrap();

        cart.set_quantity(&mug, 0).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.subtotal, 1_000);
        assert_eq!(cart.item_count, 1);
    }

    #[test]
    fn test_set_quantity_on_missing_line_is_not_found() {
        let mug = product("mug", 250, 10);
        let mut cart = cart();
        assert!(matches!(cart.set_quantity(&mug, 1), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_remove_and_clear() {
        let mug = product("mug", 250, 10);
        let tee = product("tee", 1_000, 10);
        let mut cart = cart();
        cart.add_item(&mug, 1).unwrap();
        cart.add_item(&tee, 2).unwrap();

        assert!(cart.remove_item(&mug.id.unwrap()).unwrap());
        assert!(!cart.remove_item(&mug.id.unwrap()).unwrap());
        assert_eq!(cart.subtotal, 2_000);

        cart.clear();
        assert_eq!(cart.subtotal, 0);
        assert_eq!(cart.item_count, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_largest_allowed_line_is_accepted() {
        let item = product("ring", MAX_PRICE, MAX_STOCK);
        let mut cart = cart();

        cart.add_item(&item, MAX_STOCK).unwrap();

        assert_eq!(cart.subtotal, MAX_PRICE * MAX_STOCK);
        assert_eq!(cart.item_count, MAX_STOCK);
    }

    #[test]
    fn test_overflowing_line_total_is_rejected_and_cart_unchanged() {
        let mug = product("mug", 250, 10);
        let huge = product("huge", i64::MAX / 2 + 1, 10);
        let mut cart = cart();
        cart.add_item(&mug, 1).unwrap();

        let result = cart.add_item(&huge, 2);

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.subtotal, 250);
        assert_eq!(cart.item_count, 1);
    }

    #[test]
    fn test_overflowing_subtotal_is_rejected() {
        let first = product("first", i64::MAX / 2 + 1, 10);
        let second = product("second", i64::MAX / 2 + 1, 10);
        let mut cart = cart();
        cart.add_item(&first, 1).unwrap();

        assert!(matches!(cart.add_item(&second, 1), Err(AppError::ValidationError(_))));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.subtotal, i64::MAX / 2 + 1);
    }

    #[test]
    fn test_corrupt_stored_totals_fail_recalculate() {
        let mut cart = cart();
        cart.items.push(CartItem {
            product_id: ObjectId::new(),
            name: "stored".to_string(),
            image_url: None,
            unit_price: i64::MAX,
            quantity: 2,
            line_total: 0,
        });

        assert!(matches!(cart.recalculate(), Err(AppError::ValidationError(_))));
        assert_eq!(cart.subtotal, 0);
    }

    #[test]
    fn test_reprice_uses_current_product_price() {
        let mut mug = product("mug", 250, 10);
        let tee = product("tee", 1_000, 10);
        let mut cart = cart();
        cart.add_item(&mug, 2).unwrap();
        cart.add_item(&tee, 1).unwrap();

        mug.price = 300;
        mug.name = "mug v2".to_string();

        assert!(cart.reprice(&[mug.clone(), tee.clone()]).unwrap());
        assert_eq!(cart.items[0].unit_price, 300);
        assert_eq!(cart.items[0].name, "mug v2");
        assert_eq!(cart.items[0].line_total, 600);
        assert_eq!(cart.subtotal, 1_600);

        assert!(!cart.reprice(&[mug, tee]).unwrap());
    }
}
