//! 장바구니 핸들러 (스코프 전체 로그인 필수)

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::shopping::cart::{AddCartItemRequest, UpdateCartItemRequest};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::shopping::CartService;

#[get("")]
pub async fn get_cart(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = CartService::instance();
    Ok(HttpResponse::Ok().json(service.get(&user.object_id()?).await?))
}

#[post("/items")]
pub async fn add_item(
    user: AuthenticatedUser,
    payload: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = CartService::instance();
    let cart = service.add_item(&user.object_id()?, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(cart))
}

/// `quantity: 0`이면 라인 삭제
#[put("/items/{product_id}")]
pub async fn update_item(
    user: AuthenticatedUser,
    product_id: web::Path<String>,
    payload: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = CartService::instance();
    let cart = service
        .update_item(&user.object_id()?, &product_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(cart))
}

#[delete("/items/{product_id}")]
pub async fn remove_item(
    user: AuthenticatedUser,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = CartService::instance();
    Ok(HttpResponse::Ok().json(service.remove_item(&user.object_id()?, &product_id).await?))
}

#[delete("")]
pub async fn clear_cart(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = CartService::instance();
    Ok(HttpResponse::Ok().json(service.clear(&user.object_id()?).await?))
}
