//! 문의하기(Contact Us) 핸들러

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::common::PageQuery;
use crate::domain::dto::engagement::message::CreateMessageRequest;
use crate::domain::models::auth::authenticated_user::{AuthenticatedUser, OptionalUser};
use crate::services::engagement::MessageService;

/// 로그인 상태라면 사용자 ID가 함께 저장됩니다.
#[post("")]
pub async fn create_message(
    user: OptionalUser,
    payload: web::Json<CreateMessageRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user_id = match user.0 {
        Some(user) => Some(user.object_id()?),
        None => None,
    };

    let service = MessageService::instance();
    let message = service.submit(user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(message))
}

#[get("")]
pub async fn list_messages(
    user: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;
    query.validate()?;

    let service = MessageService::instance();
    Ok(HttpResponse::Ok().json(service.list(&query).await?))
}

#[put("/{id}/read")]
pub async fn mark_read(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;

    let service = MessageService::instance();
    Ok(HttpResponse::Ok().json(service.mark_read(&id).await?))
}

#[delete("/{id}")]
pub async fn delete_message(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;

    let service = MessageService::instance();
    service.delete(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}
