//! 상품 리뷰 핸들러
//!
//! 작성/수정/삭제 후에는 상품 평균 평점과 리뷰 수가 다시 계산됩니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::common::PageQuery;
use crate::domain::dto::engagement::review::{CreateReviewRequest, UpdateReviewRequest};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::engagement::ReviewService;

#[get("/product/{product_id}")]
pub async fn list_for_product(
    product_id: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let service = ReviewService::instance();
    Ok(HttpResponse::Ok().json(service.list_for_product(&product_id, &query).await?))
}

/// 같은 상품에 두 번째 리뷰를 쓰면 409
#[post("")]
pub async fn create_review(
    user: AuthenticatedUser,
    payload: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = ReviewService::instance();
    let review = service.create(&user, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(review))
}

#[put("/{id}")]
pub async fn update_review(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = ReviewService::instance();
    Ok(HttpResponse::Ok().json(service.update(&user, &id, payload.into_inner()).await?))
}

#[delete("/{id}")]
pub async fn delete_review(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = ReviewService::instance();
    service.delete(&user, &id).await?;

    Ok(HttpResponse::NoContent().finish())
}
