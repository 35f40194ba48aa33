use actix_web::{delete, get, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::users::request::UpsertUserDetailsRequest;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::users::UserDetailsService;

#[get("")]
pub async fn get_details(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = UserDetailsService::instance();
    let details = service.get(&user.object_id()?).await?;

    Ok(HttpResponse::Ok().json(details))
}

/// 배송지는 최대 10개, 기본 배송지는 하나만 유지됩니다.
#[put("")]
pub async fn upsert_details(
    user: AuthenticatedUser,
    payload: web::Json<UpsertUserDetailsRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserDetailsService::instance();
    let details = service.upsert(&user.object_id()?, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(details))
}

#[delete("")]
pub async fn delete_details(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = UserDetailsService::instance();
    service.delete(&user.object_id()?).await?;

    Ok(HttpResponse::NoContent().finish())
}
