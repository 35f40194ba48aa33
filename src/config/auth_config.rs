//! # Authentication Configuration Module
//!
//! JWT 서명, 세션 쿠키, 사용자 역할 설정을 관리합니다.
//!
//! 스토어프론트는 로그인 시 발급된 JWT를 `CustomerToken` http-only 쿠키로
//! 받아 이후 모든 요청에 자동으로 실어 보냅니다.
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="72"
//! export COOKIE_SECURE="true"   # 미지정 시 production 환경에서만 true
//! ```

use std::env;
use crate::config::Environment;
use crate::core::errors::{AppError, AppResult};

/// production 이외 환경에서 `JWT_SECRET`이 없을 때 쓰는 개발용 키
const DEVELOPMENT_SECRET: &str = "storefront-dev-secret";

pub struct JwtConfig;

impl JwtConfig {
    /// # Errors
    ///
    /// * `AppError::InternalError` - production 환경인데 `JWT_SECRET`이 비어 있음
    pub fn secret() -> AppResult<String> {
        Self::resolve_secret(&Environment::current(), env::var("JWT_SECRET").ok())
    }

    pub fn resolve_secret(environment: &Environment, configured: Option<String>) -> AppResult<String> {
        match configured.filter(|secret| !secret.trim().is_empty()) {
            Some(secret) => Ok(secret),
            None if environment.is_production() => Err(AppError::InternalError(
                "production 환경에서는 JWT_SECRET 설정이 필수입니다".to_string(),
            )),
            None => {
                log::warn!("⚠️ JWT_SECRET 미설정, 개발용 키를 사용합니다 ({:?})", environment);
                Ok(DEVELOPMENT_SECRET.to_string())
            }
        }
    }

    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &i64| *v > 0)
            .unwrap_or(72)
    }
}

pub struct CookieConfig;

impl CookieConfig {
    /// 세션 토큰 쿠키 이름
    pub const SESSION_COOKIE: &'static str = "CustomerToken";

    pub fn secure() -> bool {
        match env::var("COOKIE_SECURE") {
            Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"),
            Err(_) => Environment::current().is_production(),
        }
    }
}

/// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unsupported role: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_string() {
        assert_eq!(Role::from_str("customer").unwrap(), Role::Customer);
        assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
        assert!(Role::from_str("seller").is_err());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(role, Role::Customer);
        assert_eq!(role.as_str(), "customer");
    }

    #[test]
    fn test_missing_secret_refused_in_production() {
        let result = JwtConfig::resolve_secret(&Environment::Production, None);
        assert!(matches!(result, Err(AppError::InternalError(_))));

        let blank = JwtConfig::resolve_secret(&Environment::Production, Some("   ".to_string()));
        assert!(blank.is_err());
    }

    #[test]
    fn test_secret_resolution_outside_production() {
        let configured = JwtConfig::resolve_secret(&Environment::Production, Some("s3cret".to_string())).unwrap();
        assert_eq!(configured, "s3cret");

        let fallback = JwtConfig::resolve_secret(&Environment::Development, None).unwrap();
        assert_eq!(fallback, DEVELOPMENT_SECRET);
    }

    #[test]
    fn test_session_cookie_name() {
        assert_eq!(CookieConfig::SESSION_COOKIE, "CustomerToken");
    }
}
