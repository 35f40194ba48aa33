//! JWT 세션 토큰 서비스
//!
//! HMAC-SHA256(HS256) 서명 JWT를 발급하고 검증합니다. 발급된 토큰은
//! `CustomerToken` 쿠키에 담겨 전달되며, 쿠키를 쓸 수 없는 클라이언트는
//! `Authorization: Bearer` 헤더로 보낼 수 있습니다.

use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use crate::{
    config::JwtConfig,
    core::{errors::{AppError, AppResult}, registry::ServiceLocator},
    domain::{
        entities::users::user::User,
        models::token::token::{IssuedToken, TokenClaims},
    },
};

pub struct TokenService {
    secret: String,
    ttl_hours: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours: ttl_hours.max(1),
        }
    }

    /// `JWT_SECRET`, `JWT_EXPIRATION_HOURS` 환경 변수로 생성
    ///
    /// production 환경에서 `JWT_SECRET`이 없으면 에러를 돌려주며, 서버는 시작하지 않습니다.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(JwtConfig::secret()?, JwtConfig::expiration_hours()))
    }

    /// 서명 키를 들고 있으므로 `main`에서 직접 생성해 `ServiceLocator::set`으로 등록합니다.
    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::try_get::<Self>()
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_hours * 3600
    }

    /// 사용자 세션 토큰 발급
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 사용자 ID가 없거나 서명 실패
    pub fn issue(&self, user: &User) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.ttl_hours);

        let claims = TokenClaims {
            sub: user
                .id_string()
                .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?,
            roles: user.roles.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let token = self.encode_claims(&claims)?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_seconds(),
        })
    }

    pub(crate) fn encode_claims(&self, claims: &TokenClaims) -> AppResult<String> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 토큰 검증 및 클레임 추출
    ///
    /// 만료, 서명 불일치, 형식 오류 모두 `AuthenticationError`입니다.
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());

        decode::<TokenClaims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()),
            })
    }

    /// `Bearer {token}` 형식에서 토큰 부분만 추출
    pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
