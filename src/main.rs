//! 스토어프론트 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 리포지토리와 서비스를 초기화합니다.
//! MongoDB 연결은 필수이며, Redis는 연결에 실패하면 캐시 없이 동작합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use storefront_backend::caching::redis::RedisClient;
use storefront_backend::config::{CorsConfig, RateLimitConfig, ServerConfig};
use storefront_backend::core::errors::AppResult;
use storefront_backend::core::registry::ServiceLocator;
use storefront_backend::db::Database;
use storefront_backend::middlewares::AuthMiddleware;
use storefront_backend::repositories::base::ensure_all_indexes;
use storefront_backend::routes::configure_all_routes;
use storefront_backend::services::auth::TokenService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 스토어프론트 백엔드 시작중...");

    let (database, redis_client) = initialize_data_stores().await?;

    let token_service = TokenService::from_env().map_err(|e| {
        error!("❌ 토큰 서비스 설정 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    // 인프라 빈은 #[service]/#[repository] 생성 전에 등록
    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);
    ServiceLocator::set(Arc::new(token_service));

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| std::io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    ensure_all_indexes()
        .await
        .map_err(|e| std::io::Error::other(format!("인덱스 생성 실패: {}", e)))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어는 나중에 `wrap`한 것이 바깥쪽이므로 요청은
/// NormalizePath → Logger → CORS → AuthMiddleware(optional) → Governor 순으로 통과합니다.
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1", bind_address);

    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            // Rate Limiting은 가장 안쪽 (라우터 바로 바깥)
            .wrap(Governor::new(&governor_conf))
            .wrap(AuthMiddleware::optional())
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// `RUST_LOG` 미지정 시 `info,actix_web=info`
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// MongoDB는 필수, Redis는 실패 시 캐시 없이 진행합니다
async fn initialize_data_stores() -> std::io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database: AppResult<Database> = Database::new().await;
    let database = Arc::new(database.map_err(|e| {
        error!("❌ MongoDB 연결 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?);

    let redis_client = match RedisClient::new().await {
        Ok(client) => client,
        Err(e) => {
            warn!("⚠️ Redis 연결 실패, 캐시 없이 실행합니다: {}", e);
            RedisClient::disabled()
        }
    };

    Ok((database, Arc::new(redis_client)))
}

/// 스토어프론트(`FRONTEND_URL`)에서 쿠키를 포함한 요청을 허용합니다
fn configure_cors() -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in CorsConfig::allowed_origins() {
        cors = cors.allowed_origin(&origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn test_full_middleware_stack_serves_requests() {
        let governor_conf = GovernorConfigBuilder::default()
            .requests_per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .unwrap();
        let token_service = Arc::new(TokenService::new("stack-test-secret", 1));

        let app = test::init_service(
            App::new()
                .wrap(Governor::new(&governor_conf))
                .wrap(AuthMiddleware::optional().with_token_service(token_service))
                .wrap(configure_cors())
                .wrap(middleware::Logger::default())
                .wrap(middleware::NormalizePath::trim())
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/health/")
            .peer_addr("127.0.0.1:40000".parse().unwrap())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/v1/cart")
            .peer_addr("127.0.0.1:40000".parse().unwrap())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
