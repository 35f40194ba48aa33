//! # 이미지 업로드 서비스
//!
//! 클라이언트는 이미지를 `data:image/<type>;base64,<payload>` 형식 JSON 문자열로 보냅니다.
//! 서버는 payload를 디코드해 형식과 크기(`IMAGE_MAX_BYTES`)만 확인한 뒤
//! 원본 data URI를 Cloudinary로 그대로 전달합니다.
//!
//! Cloudinary 자격 증명은 호출 시점에 읽으므로, 설정이 없어도 서버는 기동됩니다.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use singleton_macro::service;
use crate::{
    config::CloudinaryConfig,
    core::errors::{AppError, AppResult},
    domain::dto::media::{ImageResponse, UploadImageRequest},
    services::media::CloudinaryClient,
};

const ALLOWED_TYPES: [&str; 5] = ["png", "jpeg", "jpg", "gif", "webp"];

/// 디코드된 data URI
#[derive(Debug, PartialEq)]
pub struct DecodedImage {
    pub image_type: String,
    pub bytes: Vec<u8>,
}

/// `data:image/png;base64,...` 형식을 검사하고 payload를 디코드합니다.
pub fn parse_data_uri(data_uri: &str, max_bytes: usize) -> AppResult<DecodedImage> {
    let (header, payload) = data_uri
        .split_once(',')
        .ok_or_else(|| AppError::ValidationError("이미지는 data URI 형식이어야 합니다".to_string()))?;

    let image_type = header
        .strip_prefix("data:image/")
        .and_then(|rest| rest.strip_suffix(";base64"))
        .map(|t| t.to_ascii_lowercase())
        .ok_or_else(|| AppError::ValidationError("이미지는 data URI 형식이어야 합니다".to_string()))?;

    if !ALLOWED_TYPES.contains(&image_type.as_str()) {
        return Err(AppError::ValidationError(format!(
            "지원하지 않는 이미지 형식입니다: {}",
            image_type
        )));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|_| AppError::ValidationError("이미지 base64 인코딩이 올바르지 않습니다".to_string()))?;

    if bytes.is_empty() {
        return Err(AppError::ValidationError("이미지 데이터가 비어 있습니다".to_string()));
    }

    if bytes.len() > max_bytes {
        return Err(AppError::ValidationError(format!(
            "이미지 크기가 제한({} bytes)을 넘습니다",
            max_bytes
        )));
    }

    Ok(DecodedImage { image_type, bytes })
}

#[service(name = "image")]
pub struct ImageService {}

impl ImageService {
    pub async fn upload(&self, request: UploadImageRequest) -> AppResult<ImageResponse> {
        let decoded = parse_data_uri(&request.image, CloudinaryConfig::max_image_bytes())?;

        let client = CloudinaryClient::from_env()?;
        let folder = request
            .folder
            .unwrap_or_else(|| client.config().default_folder.clone());

        let uploaded = client.upload(request.image.trim(), &folder).await?;
        log::info!(
            "🖼️ 이미지 업로드: {} ({}, {} bytes)",
            uploaded.public_id, decoded.image_type, decoded.bytes.len()
        );

        Ok(ImageResponse::from(uploaded))
    }

    /// Cloudinary 결과가 `ok`일 때만 성공, `not found`는 404
    pub async fn destroy(&self, public_id: &str) -> AppResult<()> {
        if public_id.trim().is_empty() {
            return Err(AppError::ValidationError("public_id가 필요합니다".to_string()));
        }

        let client = CloudinaryClient::from_env()?;
        let result = client.destroy(public_id).await?;

        match result.result.as_str() {
            "ok" => {
                log::info!("🗑️ 이미지 삭제: {}", public_id);
                Ok(())
            }
            "not found" => Err(AppError::NotFound("이미지를 찾을 수 없습니다".to_string())),
            other => Err(AppError::UpstreamError(format!("이미지 삭제 실패: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_uri(kind: &str, bytes: &[u8]) -> String {
        format!("data:image/{};base64,{}", kind, STANDARD.encode(bytes))
    }

    #[test]
    fn test_parse_valid_png() {
        let decoded = parse_data_uri(&data_uri("png", &[0x89, 0x50, 0x4e, 0x47]), 1024).unwrap();
        assert_eq!(decoded.image_type, "png");
        assert_eq!(decoded.bytes.len(), 4);
    }

    #[test]
    fn test_rejects_non_image_types() {
        let uri = format!("data:application/pdf;base64,{}", STANDARD.encode(b"%PDF"));
        assert!(matches!(parse_data_uri(&uri, 1024), Err(AppError::ValidationError(_))));
        assert!(parse_data_uri(&data_uri("svg+xml", b"<svg/>"), 1024).is_err());
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(parse_data_uri("not a data uri", 1024).is_err());
        assert!(parse_data_uri("data:image/png,abc", 1024).is_err());
        assert!(parse_data_uri("data:image/png;base64,@@@", 1024).is_err());
        assert!(parse_data_uri("data:image/png;base64,", 1024).is_err());
    }

    #[test]
    fn test_enforces_size_limit() {
        let uri = data_uri("jpeg", &[0u8; 2048]);
        assert!(parse_data_uri(&uri, 2048).is_ok());
        assert!(matches!(parse_data_uri(&uri, 2047), Err(AppError::ValidationError(msg)) if msg.contains("2047")));
    }
}
