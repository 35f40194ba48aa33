//! # Cloudinary Upload API 클라이언트
//!
//! 서명 업로드(signed upload)만 사용합니다. 서명 규칙:
//!
//! 1. `file`, `api_key`, `resource_type`, `cloud_name`을 제외한 파라미터를 이름순 정렬
//! 2. `key=value`를 `&`로 연결
//! 3. 끝에 API secret을 붙여 SHA-1 hex
//!
//! ```text
//! folder=products&timestamp=1315060510abcd  →  sha1 hex
//! ```

use std::collections::BTreeMap;
use sha1::{Digest, Sha1};
use crate::{
    config::CloudinaryConfig,
    core::errors::{AppError, AppResult},
    domain::models::external::cloudinary::{
        CloudinaryDestroyResult, CloudinaryErrorEnvelope, CloudinaryUploadResult,
    },
};

pub struct CloudinaryClient {
    config: CloudinaryConfig,
    http: reqwest::Client,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(CloudinaryConfig::from_env()?))
    }

    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }

    /// 서명 대상 파라미터(정렬됨)와 API secret으로 SHA-1 서명을 만듭니다.
    pub fn api_signature(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
        let to_sign = params
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha1::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name,
            action
        )
    }

    /// 서명된 폼 필드 목록. `extra`는 서명 대상에 포함됩니다.
    fn signed_form(&self, extra: BTreeMap<&'static str, String>) -> Vec<(&'static str, String)> {
        let mut params = extra;
        params.insert("timestamp", chrono::Utc::now().timestamp().to_string());

        let signature = Self::api_signature(&params, &self.config.api_secret);

        let mut form: Vec<(&'static str, String)> = params.into_iter().collect();
        form.push(("api_key", self.config.api_key.clone()));
        form.push(("signature", signature));
        form
    }

    /// data URI(`data:image/png;base64,...`)를 그대로 업로드합니다.
    pub async fn upload(&self, data_uri: &str, folder: &str) -> AppResult<CloudinaryUploadResult> {
        let mut params = BTreeMap::new();
        params.insert("folder", folder.to_string());

        let mut form = self.signed_form(params);
        form.push(("file", data_uri.to_string()));

        let response = self
            .http
            .post(self.endpoint("upload"))
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("이미지 업로드 요청 실패: {}", e)))?;

        Self::parse(response, "이미지 업로드").await
    }

    pub async fn destroy(&self, public_id: &str) -> AppResult<CloudinaryDestroyResult> {
        let mut params = BTreeMap::new();
        params.insert("public_id", public_id.to_string());

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .form(&self.signed_form(params))
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("이미지 삭제 요청 실패: {}", e)))?;

        Self::parse(response, "이미지 삭제").await
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response, action: &str) -> AppResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<CloudinaryErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);

            log::warn!("☁️ Cloudinary {} 실패 ({}): {}", action, status, message);
            return Err(AppError::UpstreamError(format!("{} 실패: {}", action, message)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::UpstreamError(format!("{} 응답 파싱 실패: {}", action, e)))
    }
}
