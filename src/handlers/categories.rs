use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::catalog::category::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::catalog::CategoryService;

#[get("")]
pub async fn list_categories() -> Result<HttpResponse, AppError> {
    let service = CategoryService::instance();
    Ok(HttpResponse::Ok().json(service.list().await?))
}

#[get("/{id}")]
pub async fn get_category(
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = CategoryService::instance();
    Ok(HttpResponse::Ok().json(service.get(&id).await?))
}

#[post("")]
pub async fn create_category(
    user: AuthenticatedUser,
    payload: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let service = CategoryService::instance();
    let category = service.create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(category))
}

#[put("/{id}")]
pub async fn update_category(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let service = CategoryService::instance();
    Ok(HttpResponse::Ok().json(service.update(&id, payload.into_inner()).await?))
}

/// 상품이 남아 있으면 409
#[delete("/{id}")]
pub async fn delete_category(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;

    let service = CategoryService::instance();
    service.delete(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}
