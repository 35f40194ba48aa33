//! 세션 인증 미들웨어
//!
//! `CustomerToken` 쿠키(우선) 또는 `Authorization: Bearer` 헤더의 JWT를 검증하고
//! [`AuthenticatedUser`](crate::domain::models::auth::authenticated_user::AuthenticatedUser)를
//! request extensions에 넣습니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::config::Role;
use crate::domain::models::auth::authentication_request::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::TokenService;

/// 세션 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
    /// 지정하지 않으면 요청 시점에 ServiceLocator에서 조회 (`main`에서 `set`한 인스턴스)
    token_service: Option<Arc<TokenService>>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
            token_service: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
            token_service: None,
        }
    }

    /// 세션이 없으면 401
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 세션이 있으면 사용자 정보를 붙이고, 없거나 잘못되어도 통과
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    pub fn required_with_role(role: Role) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role))
    }

    /// 관리자 전용 스코프 (세션 없음 401, 권한 부족 403)
    pub fn admin() -> Self {
        Self::required_with_role(Role::Admin)
    }

    pub fn with_token_service(mut self, token_service: Arc<TokenService>) -> Self {
        self.token_service = Some(token_service);
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
            token_service: self.token_service.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, http::{header, StatusCode}, test, web, App, HttpResponse};
    use chrono::Utc;
    use mongodb::bson::oid::ObjectId;
    use crate::config::CookieConfig;
    use crate::domain::models::auth::authenticated_user::{AuthenticatedUser, OptionalUser};
    use crate::domain::models::token::token::TokenClaims;

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new("middleware-test-secret", 1))
    }

    fn token_for(service: &TokenService, roles: Vec<Role>) -> String {
        let now = Utc::now().timestamp();
        service
            .encode_claims(&TokenClaims {
                sub: ObjectId::new().to_hex(),
                roles,
                iat: now,
                exp: now + 3600,
            })
            .unwrap()
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    async fn maybe(user: OptionalUser) -> HttpResponse {
        HttpResponse::Ok().body(if user.0.is_some() { "member" } else { "guest" })
    }

    macro_rules! test_app {
        ($service:expr) => {
            test::init_service(
                App::new()
                    .service(
                        web::scope("/private")
                            .wrap(AuthMiddleware::required().with_token_service($service.clone()))
                            .route("/me", web::get().to(whoami)),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(AuthMiddleware::admin().with_token_service($service.clone()))
                            .route("/me", web::get().to(whoami)),
                    )
                    .service(
                        web::scope("/public")
                            .wrap(AuthMiddleware::optional().with_token_service($service.clone()))
                            .route("/me", web::get().to(maybe)),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_required_scope_rejects_missing_session() {
        let service = token_service();
        let app = test_app!(service);

        let res = test::call_service(&app, test::TestRequest::get().uri("/private/me").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_cookie_session_authenticates() {
        let service = token_service();
        let app = test_app!(service);
        let token = token_for(&service, vec![Role::Customer]);

        let req = test::TestRequest::get()
            .uri("/private/me")
            .cookie(Cookie::new(CookieConfig::SESSION_COOKIE, token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_bearer_header_authenticates() {
        let service = token_service();
        let app = test_app!(service);
        let token = token_for(&service, vec![Role::Customer]);

        let req = test::TestRequest::get()
            .uri("/private/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_foreign_token_is_rejected() {
        let service = token_service();
        let app = test_app!(service);
        let foreign = token_for(&TokenService::new("another-secret", 1), vec![Role::Admin]);

        let req = test::TestRequest::get()
            .uri("/private/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", foreign)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_admin_scope_rejects_customer() {
        let service = token_service();
        let app = test_app!(service);

        let customer = token_for(&service, vec![Role::Customer]);
        let req = test::TestRequest::get()
            .uri("/admin/me")
            .cookie(Cookie::new(CookieConfig::SESSION_COOKIE, customer))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let admin = token_for(&service, vec![Role::Customer, Role::Admin]);
        let req = test::TestRequest::get()
            .uri("/admin/me")
            .cookie(Cookie::new(CookieConfig::SESSION_COOKIE, admin))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_optional_scope_allows_guests() {
        let service = token_service();
        let app = test_app!(service);

        let res = test::call_service(&app, test::TestRequest::get().uri("/public/me").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, web::Bytes::from_static(b"guest"));

        let req = test::TestRequest::get()
            .uri("/public/me")
            .cookie(Cookie::new(CookieConfig::SESSION_COOKIE, "garbage"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(test::read_body(res).await, web::Bytes::from_static(b"guest"));

        let token = token_for(&service, vec![Role::Customer]);
        let req = test::TestRequest::get()
            .uri("/public/me")
            .cookie(Cookie::new(CookieConfig::SESSION_COOKIE, token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(test::read_body(res).await, web::Bytes::from_static(b"member"));
    }
}
