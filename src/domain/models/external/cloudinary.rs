//! Cloudinary Upload API 와이어 타입

use serde::Deserialize;

/// `POST /image/upload` 응답 (사용하는 필드만)
#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryUploadResult {
    pub public_id: String,
    pub secure_url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
}

/// `POST /image/destroy` 응답 `{ "result": "ok" | "not found" }`
#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryDestroyResult {
    pub result: String,
}

/// 에러 응답 `{ "error": { "message": ... } }`
#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryErrorEnvelope {
    pub error: CloudinaryErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryErrorBody {
    pub message: String,
}
