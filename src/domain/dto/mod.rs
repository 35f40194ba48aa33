//! # Data Transfer Objects (DTO) Module
//!
//! API 경계의 요청/응답 본문을 정의합니다. 요청 DTO는 `validator`로 형식을
//! 검증하고, 응답 DTO는 엔티티에서 `From`으로 변환되어 ObjectId와 BSON 시간을
//! 문자열/RFC 3339로 바꿔 내보냅니다.
//!
//! | 모듈 | 리소스 |
//! |------|--------|
//! | [`users`] | `/user`, `/userDetails` |
//! | [`catalog`] | `/category`, `/product` |
//! | [`shopping`] | `/cart`, `/wishlist` |
//! | [`engagement`] | `/reviews`, `/feedback`, `/message` |
//! | [`media`] | `/images` |
//! | [`payments`] | `/payment` |
//! | [`common`] | 페이지네이션 |

pub mod common;
pub mod users;
pub mod catalog;
pub mod shopping;
pub mod engagement;
pub mod media;
pub mod payments;
