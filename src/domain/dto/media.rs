//! 이미지 업로드 DTO
//!
//! 업로드는 multipart가 아닌 JSON 본문의 base64 data URI로 받습니다.
//! `data:image/<png|jpeg|jpg|gif|webp>;base64,<payload>`

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::models::external::cloudinary::CloudinaryUploadResult;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadImageRequest {
    #[validate(length(min = 1, message = "이미지 데이터가 필요합니다"))]
    pub image: String,

    #[serde(default)]
    #[validate(custom(function = "validate_folder"))]
    pub folder: Option<String>,
}

/// 영문, 숫자, `_`, `-`, `/` 만 허용하고 `..`는 금지합니다.
fn validate_folder(folder: &str) -> Result<(), ValidationError> {
    let allowed = !folder.is_empty()
        && folder.len() <= 100
        && !folder.contains("..")
        && !folder.starts_with('/')
        && folder
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '/');

    if !allowed {
        return Err(ValidationError::new("invalid_folder")
            .with_message("폴더 이름 형식이 올바르지 않습니다".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageResponse {
    pub public_id: String,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<String>,
    pub bytes: Option<u64>,
}

impl From<CloudinaryUploadResult> for ImageResponse {
    fn from(result: CloudinaryUploadResult) -> Self {
        Self {
            public_id: result.public_id,
            url: result.secure_url,
            width: result.width,
            height: result.height,
            format: result.format,
            bytes: result.bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_rules() {
        assert!(validate_folder("products/lamps").is_ok());
        assert!(validate_folder("../secrets").is_err());
        assert!(validate_folder("/root").is_err());
        assert!(validate_folder("a b").is_err());
    }
}
