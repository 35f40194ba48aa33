use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::entities::catalog::category::Category;
use crate::domain::entities::catalog::product::ImageRef;
use crate::utils::bson_utils::to_chrono;
use crate::utils::string_utils::deserialize_optional_string;

/// 이미 업로드된 이미지 참조 (`/images/upload` 응답의 `public_id`, `url`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ImageInput {
    #[validate(length(min = 1, max = 255, message = "public_id가 필요합니다"))]
    pub public_id: String,

    #[validate(custom(function = "validate_http_url"))]
    pub url: String,
}

impl From<ImageInput> for ImageRef {
    fn from(input: ImageInput) -> Self {
        Self {
            public_id: input.public_id.trim().to_string(),
            url: input.url.trim().to_string(),
        }
    }
}

pub(crate) fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    let url = url.trim();
    let has_scheme = url.starts_with("https://") || url.starts_with("http://");
    if !has_scheme || url.len() > 2048 || url.contains(char::is_whitespace) {
        return Err(ValidationError::new("invalid_url")
            .with_message("유효한 이미지 URL이 아닙니다".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 60, message = "카테고리 이름은 1-60자 사이여야 합니다"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 500, message = "설명은 500자 이하여야 합니다"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub image: Option<ImageInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 60, message = "카테고리 이름은 1-60자 사이여야 합니다"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 500, message = "설명은 500자 이하여야 합니다"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub image: Option<ImageInput>,
}

/// 캐시에 그대로 저장되므로 역직렬화도 지원합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<ImageRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: category.name,
            slug: category.slug,
            description: category.description,
            image: category.image,
            created_at: to_chrono(category.created_at),
            updated_at: to_chrono(category.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_category_validation() {
        let req: CreateCategoryRequest =
            serde_json::from_str(r#"{"name": "Home Decor", "description": "  "}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.description.is_none());

        let req: CreateCategoryRequest = serde_json::from_str(
            r#"{"name": "Lamps", "image": {"public_id": "p1", "url": "ftp://x"}}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_response_from_entity() {
        let category = Category::new("Wall Art".to_string(), None, None);
        let response = CategoryResponse::from(category);
        assert_eq!(response.slug, "wall-art");
    }
}
