use serde::{Deserialize, Serialize};
use crate::config::Role;

/// 세션 JWT 클레임
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ObjectId (hex)
    pub sub: String,
    pub roles: Vec<Role>,
    pub iat: i64,
    pub exp: i64,
}

/// 발급된 세션 토큰
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// 만료까지 남은 초
    pub expires_in: i64,
}
