//! 이미지 업로드 핸들러
//!
//! ```bash
//! curl -X POST http://localhost:8000/api/v1/images/upload \
//!   -b "CustomerToken=..." -H "Content-Type: application/json" \
//!   -d '{"image":"data:image/png;base64,iVBORw0KGgo...","folder":"products"}'
//! ```

use actix_web::{delete, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::media::UploadImageRequest;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::media::ImageService;

#[post("/upload")]
pub async fn upload_image(
    _user: AuthenticatedUser,
    payload: web::Json<UploadImageRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = ImageService::instance();
    let image = service.upload(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(image))
}

/// public_id에 폴더 경로(`/`)가 포함될 수 있습니다.
#[delete("/{public_id:.*}")]
pub async fn delete_image(
    user: AuthenticatedUser,
    public_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;

    let service = ImageService::instance();
    service.destroy(&public_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
