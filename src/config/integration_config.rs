//! 외부 서비스 연동 설정
//!
//! 결제 게이트웨이(Razorpay)와 이미지 호스트(Cloudinary) 자격 증명을 관리합니다.
//! 자격 증명이 비어 있어도 서버는 기동되며, 해당 기능을 호출하는 시점에
//! `AppError::InternalError`로 보고됩니다.
//!
//! ```bash
//! export RAZORPAY_SECRET_ID="rzp_test_xxx"
//! export RAZORPAY_SECRET_KEY="xxx"
//! export RAZORPAY_CURRENCY="INR"
//!
//! export CLOUDINARY_CLOUD_NAME="demo"
//! export CLOUDINARY_API_KEY="1234567890"
//! export CLOUDINARY_API_SECRET="xxx"
//! export IMAGE_MAX_BYTES="5242880"
//! ```

use std::env;
use crate::core::errors::{AppError, AppResult};

fn required(name: &str) -> AppResult<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::InternalError(format!("{} 환경 변수가 설정되지 않았습니다", name)))
}

/// Razorpay 자격 증명
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
    pub currency: String,
    pub api_base: String,
}

impl RazorpayConfig {
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            key_id: required("RAZORPAY_SECRET_ID")?,
            key_secret: required("RAZORPAY_SECRET_KEY")?,
            currency: Self::currency(),
            api_base: env::var("RAZORPAY_API_BASE")
                .unwrap_or_else(|_| "https://api.razorpay.com/v1".to_string()),
        })
    }

    /// 상품 가격과 장바구니 합계에 쓰는 통화 (자격 증명 없이도 조회 가능)
    pub fn currency() -> String {
        env::var("RAZORPAY_CURRENCY")
            .ok()
            .map(|v| v.trim().to_uppercase())
            .filter(|v| v.len() == 3)
            .unwrap_or_else(|| "INR".to_string())
    }
}

/// Cloudinary 자격 증명 및 업로드 제한
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base: String,
    pub max_image_bytes: usize,
    pub default_folder: String,
}

impl CloudinaryConfig {
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            api_key: required("CLOUDINARY_API_KEY")?,
            api_secret: required("CLOUDINARY_API_SECRET")?,
            api_base: env::var("CLOUDINARY_API_BASE")
                .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string()),
            max_image_bytes: Self::max_image_bytes(),
            default_folder: env::var("CLOUDINARY_FOLDER").unwrap_or_else(|_| "storefront".to_string()),
        })
    }

    pub fn max_image_bytes() -> usize {
        env::var("IMAGE_MAX_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &usize| *v > 0)
            .unwrap_or(5 * 1024 * 1024)
    }
}
