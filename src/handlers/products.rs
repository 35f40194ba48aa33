//! # Product HTTP Handlers
//!
//! 목록/상세 조회는 공개이며, 관리자 세션이면 비활성 상품도 함께 보입니다.
//!
//! ```bash
//! curl "http://localhost:8000/api/v1/product?category=lamps&q=desk&min_price=1000&sort=price_asc&page=2&limit=12"
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::catalog::product::{CreateProductRequest, ProductQuery, UpdateProductRequest};
use crate::domain::models::auth::authenticated_user::{AuthenticatedUser, OptionalUser};
use crate::services::catalog::ProductService;

fn is_admin(user: &OptionalUser) -> bool {
    user.0.as_ref().is_some_and(|user| user.is_admin())
}

#[get("")]
pub async fn list_products(
    user: OptionalUser,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let service = ProductService::instance();
    let page = service.list(&query, is_admin(&user)).await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("/{id}")]
pub async fn get_product(
    user: OptionalUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = ProductService::instance();
    Ok(HttpResponse::Ok().json(service.get(&id, is_admin(&user)).await?))
}

#[post("")]
pub async fn create_product(
    user: AuthenticatedUser,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let service = ProductService::instance();
    let product = service.create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(product))
}

#[put("/{id}")]
pub async fn update_product(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let service = ProductService::instance();
    Ok(HttpResponse::Ok().json(service.update(&id, payload.into_inner()).await?))
}

#[delete("/{id}")]
pub async fn delete_product(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;

    let service = ProductService::instance();
    service.delete(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}
