//! # Redis 캐시 클라이언트 구현
//!
//! 상품/카테고리 조회 결과를 JSON으로 직렬화해 보관하는 읽기 캐시입니다.
//! Redis는 선택 사항이라 연결에 실패하면 [`RedisClient::disabled`]로 대체되고,
//! 이 경우 모든 조회는 캐시 미스, 모든 쓰기는 no-op이 됩니다.
//!
//! 캐시 쓰기/삭제 에러는 요청을 실패시키지 않고 [`RedisClient::report`]로
//! 경고 로그만 남깁니다. 원본 데이터는 항상 MongoDB에 있습니다.

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

#[derive(Clone)]
pub struct RedisClient {
    client: Option<Client>,
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 `PING`으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, redis::RedisError> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { client: Some(client) })
    }

    /// 캐시 없이 동작하는 클라이언트
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let Some(client) = &self.client else {
            return Ok(None);
        };

        let mut conn = client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<(), redis::RedisError> {
        let Some(client) = &self.client else {
            return Ok(());
        };

        let mut conn = client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set_ex(key, json, seconds).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let Some(client) = &self.client else {
            return Ok(());
        };

        let mut conn = client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    /// 캐시 작업 결과를 경고 로그로 남기고 성공 여부를 돌려줍니다.
    pub fn report(operation: &str, key: &str, result: Result<(), redis::RedisError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("⚠️ 캐시 {} 실패 (key={}): {}", operation, key, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_disabled_client_is_a_noop() {
        let cache = RedisClient::disabled();
        assert!(!cache.is_enabled());

        cache.set_with_expiry("product:1", &"value", 60).await.unwrap();
        let cached: Option<String> = cache.get("product:1").await.unwrap();
        assert!(cached.is_none());
        cache.del("product:1").await.unwrap();
    }

    #[test]
    fn test_report_flags_failed_cache_write() {
        let failure = redis::RedisError::from((redis::ErrorKind::IoError, "connection refused"));

        assert!(!RedisClient::report("쓰기", "product:1", Err(failure)));
        assert!(RedisClient::report("삭제", "product:1", Ok(())));
    }
}
