//! 캐싱 계층 모듈
//!
//! Redis 기반 읽기 캐시를 제공합니다. 캐시가 꺼져 있어도 동작이 달라지지 않도록
//! 리포지토리는 캐시 에러를 무시하고 MongoDB로 폴백합니다.
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await.unwrap_or_else(|_| RedisClient::disabled());
//! cache.set_with_expiry("product:64f...", &product, 300).await?;
//! ```
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
