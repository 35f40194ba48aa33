use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::common::PageQuery;
use crate::domain::dto::engagement::feedback::CreateFeedbackRequest;
use crate::domain::models::auth::authenticated_user::{AuthenticatedUser, OptionalUser};
use crate::services::engagement::FeedbackService;

#[post("")]
pub async fn submit_feedback(
    user: OptionalUser,
    payload: web::Json<CreateFeedbackRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user_id = match user.0 {
        Some(user) => Some(user.object_id()?),
        None => None,
    };

    let service = FeedbackService::instance();
    let feedback = service.submit(user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(feedback))
}

#[get("")]
pub async fn list_feedback(
    user: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;
    query.validate()?;

    let service = FeedbackService::instance();
    Ok(HttpResponse::Ok().json(service.list(&query).await?))
}
