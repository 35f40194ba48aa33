//! # Domain Entities
//!
//! MongoDB 컬렉션에 그대로 저장되는 문서 타입들입니다.
//! 모든 엔티티는 `_id`(ObjectId)와 생성/수정 시각을 가지며,
//! 다른 엔티티는 ObjectId로만 참조합니다.
//!
//! | 모듈 | 컬렉션 |
//! |------|--------|
//! | [`users`] | `users`, `user_details` |
//! | [`catalog`] | `categories`, `products` |
//! | [`shopping`] | `carts`, `wishlists`, `orders` |
//! | [`engagement`] | `reviews`, `feedback`, `messages` |

pub mod users;
pub mod catalog;
pub mod shopping;
pub mod engagement;
