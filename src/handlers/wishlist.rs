use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::shopping::wishlist::AddWishlistItemRequest;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::shopping::WishlistService;

#[get("")]
pub async fn get_wishlist(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = WishlistService::instance();
    Ok(HttpResponse::Ok().json(service.get(&user.object_id()?).await?))
}

#[post("/items")]
pub async fn add_item(
    user: AuthenticatedUser,
    payload: web::Json<AddWishlistItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = WishlistService::instance();
    Ok(HttpResponse::Ok().json(service.add(&user.object_id()?, payload.into_inner()).await?))
}

#[delete("/items/{product_id}")]
pub async fn remove_item(
    user: AuthenticatedUser,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = WishlistService::instance();
    Ok(HttpResponse::Ok().json(service.remove(&user.object_id()?, &product_id).await?))
}

#[post("/items/{product_id}/move-to-cart")]
pub async fn move_to_cart(
    user: AuthenticatedUser,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = WishlistService::instance();
    Ok(HttpResponse::Ok().json(service.move_to_cart(&user.object_id()?, &product_id).await?))
}

#[delete("")]
pub async fn clear_wishlist(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = WishlistService::instance();
    Ok(HttpResponse::Ok().json(service.clear(&user.object_id()?).await?))
}
