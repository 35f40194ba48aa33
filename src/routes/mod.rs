//! API 라우트 설정 모듈
//!
//! 모든 리소스 라우터는 `/api/v1` 아래에 마운트됩니다.
//!
//! | 스코프 | 인증 |
//! |--------|------|
//! | `/user`, `/message`, `/category`, `/product`, `/reviews`, `/feedback`, `/images` | 핸들러별 (extractor) |
//! | `/userDetails`, `/cart`, `/wishlist`, `/payment` | 스코프 전체 로그인 필수 |
//!
//! 전역 `AuthMiddleware::optional()`이 세션을 먼저 해석하므로, 공개 스코프의 핸들러도
//! `AuthenticatedUser` / `OptionalUser` extractor로 사용자 정보를 받을 수 있습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use crate::caching::redis::RedisClient;
use crate::config::ServerConfig;
use crate::core::errors::AppError;
use crate::core::registry::ServiceLocator;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::{error, get, web, HttpRequest, HttpResponse};
use serde_json::json;

/// 모든 라우트와 extractor 설정을 등록합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);

    cfg.service(index).service(health_check);

    cfg.service(
        web::scope("/api/v1")
            .configure(configure_user_routes)
            .configure(configure_message_routes)
            .configure(configure_user_details_routes)
            .configure(configure_catalog_routes)
            .configure(configure_shopping_routes)
            .configure(configure_engagement_routes)
            .configure(configure_image_routes)
            .configure(configure_payment_routes),
    );
}

/// JSON/Query/Path 파싱 실패를 `AppError::ValidationError`(400)로 통일합니다.
fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(ServerConfig::json_limit_bytes())
            .error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
                AppError::ValidationError(format!("요청 본문을 해석할 수 없습니다: {}", err)).into()
            }),
    )
    .app_data(
        web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| {
            AppError::ValidationError(format!("쿼리 파라미터가 올바르지 않습니다: {}", err)).into()
        }),
    )
    .app_data(
        web::PathConfig::default().error_handler(|err: error::PathError, _req: &HttpRequest| {
            AppError::ValidationError(format!("경로 파라미터가 올바르지 않습니다: {}", err)).into()
        }),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(handlers::users::signup)
            .service(handlers::users::login)
            .service(handlers::users::logout)
            .service(handlers::users::get_me)
            .service(handlers::users::update_me)
            .service(handlers::users::change_password)
            .service(handlers::users::delete_me)
            .service(handlers::users::list_users),
    );
}

fn configure_message_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/message")
            .service(handlers::messages::create_message)
            .service(handlers::messages::list_messages)
            .service(handlers::messages::mark_read)
            .service(handlers::messages::delete_message),
    );
}

fn configure_user_details_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/userDetails")
            .wrap(AuthMiddleware::required())
            .service(handlers::user_details::get_details)
            .service(handlers::user_details::upsert_details)
            .service(handlers::user_details::delete_details),
    );
}

fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/category")
            .service(handlers::categories::list_categories)
            .service(handlers::categories::get_category)
            .service(handlers::categories::create_category)
            .service(handlers::categories::update_category)
            .service(handlers::categories::delete_category),
    );

    cfg.service(
        web::scope("/product")
            .service(handlers::products::list_products)
            .service(handlers::products::get_product)
            .service(handlers::products::create_product)
            .service(handlers::products::update_product)
            .service(handlers::products::delete_product),
    );
}

fn configure_shopping_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .wrap(AuthMiddleware::required())
            .service(handlers::cart::get_cart)
            .service(handlers::cart::add_item)
            .service(handlers::cart::update_item)
            .service(handlers::cart::remove_item)
            .service(handlers::cart::clear_cart),
    );

    cfg.service(
        web::scope("/wishlist")
            .wrap(AuthMiddleware::required())
            .service(handlers::wishlist::get_wishlist)
            .service(handlers::wishlist::add_item)
            .service(handlers::wishlist::remove_item)
            .service(handlers::wishlist::move_to_cart)
            .service(handlers::wishlist::clear_wishlist),
    );
}

fn configure_engagement_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
            .service(handlers::reviews::list_for_product)
            .service(handlers::reviews::create_review)
            .service(handlers::reviews::update_review)
            .service(handlers::reviews::delete_review),
    );

    cfg.service(
        web::scope("/feedback")
            .service(handlers::feedback::submit_feedback)
            .service(handlers::feedback::list_feedback),
    );
}

fn configure_image_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/images")
            .service(handlers::images::upload_image)
            .service(handlers::images::delete_image),
    );
}

fn configure_payment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payment")
            .wrap(AuthMiddleware::required())
            .service(handlers::payments::get_key)
            .service(handlers::payments::checkout)
            .service(handlers::payments::verify)
            .service(handlers::payments::list_orders),
    );
}

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Storefront API is running")
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8000/health
/// ```
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "storefront_backend",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z",
///   "features": { "database": "MongoDB", "cache": "enabled" }
/// }
/// ```
#[get("/health")]
async fn health_check() -> HttpResponse {
    let cache_enabled = ServiceLocator::try_get::<RedisClient>()
        .map(|redis| redis.is_enabled())
        .unwrap_or(false);

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": if cache_enabled { "enabled" } else { "disabled" },
            "payments": "Razorpay",
            "images": "Cloudinary"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use actix_web::{cookie::Cookie, http::StatusCode, test, App};
    use chrono::Utc;
    use mongodb::bson::oid::ObjectId;
    use serde_json::Value;
    use crate::config::{CookieConfig, Role};
    use crate::domain::models::token::token::TokenClaims;
    use crate::services::auth::TokenService;

    #[actix_web::test]
    async fn test_index_and_health() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/health").to_request(),
        )
        .await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "storefront_backend");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_validation_error() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[actix_web::test]
    async fn test_invalid_signup_rejected_before_service() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .set_json(json!({
                "email": "not-an-email",
                "username": "ab",
                "display_name": "",
                "password": "short",
                "password_confirm": "different"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_protected_scopes_require_session() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        for uri in ["/api/v1/cart", "/api/v1/wishlist", "/api/v1/userDetails", "/api/v1/payment/orders"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_admin_handlers_require_session() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/api/v1/user").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/v1/category")
            .set_json(json!({ "name": "Lamps" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_customer_session_cannot_create_category() {
        let token_service = Arc::new(TokenService::new("routes-test-secret", 1));
        let now = Utc::now().timestamp();
        let customer = token_service
            .encode_claims(&TokenClaims {
                sub: ObjectId::new().to_hex(),
                roles: vec![Role::Customer],
                iat: now,
                exp: now + 3600,
            })
            .unwrap();

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::optional().with_token_service(token_service.clone()))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/category")
            .cookie(Cookie::new(CookieConfig::SESSION_COOKIE, customer))
            .set_json(json!({ "name": "Lamps" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "insufficient_permissions");
    }
}
