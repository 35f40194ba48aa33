//! # User HTTP Handlers
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `POST` | `/user/signup` | - | 회원가입 (201) |
//! | `POST` | `/user/login` | - | 로그인, `CustomerToken` 쿠키 발급 |
//! | `POST` | `/user/logout` | - | 쿠키 삭제 |
//! | `GET` | `/user/me` | 로그인 | 내 정보 |
//! | `PUT` | `/user/me` | 로그인 | 표시 이름/사용자명 변경 |
//! | `PUT` | `/user/me/password` | 로그인 | 비밀번호 변경 |
//! | `DELETE` | `/user/me` | 로그인 | 회원 탈퇴 (204) |
//! | `GET` | `/user` | 관리자 | 사용자 목록 |

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::common::PageQuery;
use crate::domain::dto::users::request::{ChangePasswordRequest, LoginRequest, SignupRequest, UpdateProfileRequest};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::handlers::session::{removal_cookie, session_cookie};
use crate::services::users::UserService;

#[post("/signup")]
pub async fn signup(
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    let user = service.signup(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(user))
}

#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    let response = service.login(payload.into_inner()).await?;
    let cookie = session_cookie(response.access_token.clone(), response.expires_in);

    Ok(HttpResponse::Ok().cookie(cookie).json(response))
}

#[post("/logout")]
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(json!({ "message": "로그아웃되었습니다" }))
}

#[get("/me")]
pub async fn get_me(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let profile = service.get_profile(&user.object_id()?).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[put("/me")]
pub async fn update_me(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    let profile = service.update_profile(&user.object_id()?, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[put("/me/password")]
pub async fn change_password(
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    service.change_password(&user.object_id()?, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "비밀번호가 변경되었습니다" })))
}

#[delete("/me")]
pub async fn delete_me(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    service.delete_account(&user.object_id()?).await?;

    Ok(HttpResponse::NoContent().cookie(removal_cookie()).finish())
}

#[get("")]
pub async fn list_users(
    user: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;
    query.validate()?;

    let service = UserService::instance();
    let page = service.list_users(&query).await?;

    Ok(HttpResponse::Ok().json(page))
}
