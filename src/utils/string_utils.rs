//! # 문자열 유틸리티
//!
//! 요청 DTO 정리와 카테고리 슬러그 생성에 쓰이는 공통 함수들입니다.

use serde::Deserialize;
use crate::core::errors::AppError;

/// 앞뒤 공백을 제거하고, 비어 있으면 `ValidationError`를 반환합니다.
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 공백뿐인 문자열을 `None`으로 정리합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde `deserialize_with`용: 공백뿐인 문자열은 `None`
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// URL에 쓸 수 있는 소문자 슬러그를 만듭니다.
///
/// 영숫자(유니코드 포함)는 소문자로 유지하고, 그 외 문자 묶음은 `-` 하나로 바꿉니다.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// 정규식 메타 문자를 이스케이프합니다. (MongoDB `$regex` 검색용)
pub fn escape_regex(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if "\\^$.|?*+()[]{}/-".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("Hello", "name").unwrap(), "Hello");
        assert_eq!(validate_required_string("  World  ", "name").unwrap(), "World");

        assert!(validate_required_string("", "name").is_err());
        assert!(validate_required_string("   ", "name").is_err());
        assert!(validate_required_string("\t\n", "name").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Hello".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            field: Option<String>,
        }

        let result: Probe = serde_json::from_str(r#"{"field": "  Hello World  "}"#).unwrap();
        assert_eq!(result.field, Some("Hello World".to_string()));

        let result: Probe = serde_json::from_str(r#"{"field": "\t\n  "}"#).unwrap();
        assert_eq!(result.field, None);

        let result: Probe = serde_json::from_str(r#"{"field": null}"#).unwrap();
        assert_eq!(result.field, None);

        let result: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.field, None);

        let result: Probe = serde_json::from_str(r#"{"field": "  안녕하세요  "}"#).unwrap();
        assert_eq!(result.field, Some("안녕하세요".to_string()));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Men's Shoes"), "men-s-shoes");
        assert_eq!(slugify("  Home & Kitchen  "), "home-kitchen");
        assert_eq!(slugify("Électronique 2024"), "électronique-2024");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_escape_regex() {
        assert_eq!(escape_regex("t-shirt (xl)"), "t\\-shirt \\(xl\\)");
        assert_eq!(escape_regex("plain"), "plain");
    }
}
