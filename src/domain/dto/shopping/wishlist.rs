use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::dto::catalog::product::ProductSummary;
use crate::domain::dto::shopping::cart::CartResponse;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddWishlistItemRequest {
    #[validate(length(min = 1, message = "상품 ID가 필요합니다"))]
    pub product_id: String,
}

/// 위시리스트 응답
///
/// 삭제되었거나 비활성화된 상품은 `products`에서 빠지지만 `product_ids`에는 남습니다.
#[derive(Debug, Clone, Serialize)]
pub struct WishlistResponse {
    pub user_id: String,
    pub product_ids: Vec<String>,
    pub products: Vec<ProductSummary>,
    pub item_count: i64,
}

/// 위시리스트에서 장바구니로 옮긴 뒤 두 상태를 함께 돌려줍니다.
#[derive(Debug, Clone, Serialize)]
pub struct MoveToCartResponse {
    pub wishlist: WishlistResponse,
    pub cart: CartResponse,
}
