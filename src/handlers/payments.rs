//! # Payment HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/payment/key` | Razorpay 공개 키 |
//! | `POST` | `/payment/checkout` | 장바구니로 결제 주문 생성 |
//! | `POST` | `/payment/verify` | 결제 서명 검증 |
//! | `GET` | `/payment/orders` | 내 주문 목록 (최신순) |

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::payments::VerifyPaymentRequest;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::payments::PaymentService;

#[get("/key")]
pub async fn get_key(
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = PaymentService::instance();
    Ok(HttpResponse::Ok().json(service.key()?))
}

#[post("/checkout")]
pub async fn checkout(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = PaymentService::instance();
    let order = service.checkout(&user.object_id()?).await?;

    Ok(HttpResponse::Created().json(order))
}

#[post("/verify")]
pub async fn verify(
    user: AuthenticatedUser,
    payload: web::Json<VerifyPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = PaymentService::instance();
    let order = service.verify(&user.object_id()?, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(order))
}

#[get("/orders")]
pub async fn list_orders(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = PaymentService::instance();
    Ok(HttpResponse::Ok().json(service.orders(&user.object_id()?).await?))
}
