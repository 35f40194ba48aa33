//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정은 환경 변수에서 읽으며, `PROFILE`에 따라 `.env.dev` / `.env.prod` /
//! `.env` 중 하나가 `main`에서 먼저 로드됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, CORS, Rate Limiting, bcrypt 비용
//! - [`auth_config`] - JWT, 세션 쿠키, 사용자 역할
//! - [`integration_config`] - Razorpay, Cloudinary 자격 증명
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8000"
//! export FRONTEND_URL="http://localhost:5173"
//!
//! # 데이터 스토어
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="storefront"
//! export REDIS_URL="redis://localhost:6379"   # 선택 (없으면 캐시 비활성화)
//!
//! # 인증
//! export JWT_SECRET="your-super-secret-key"
//! export BCRYPT_COST="12"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod integration_config;

pub use data_config::*;
pub use auth_config::*;
pub use integration_config::*;
