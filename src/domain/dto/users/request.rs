//! 사용자 관련 요청 DTO
//!
//! 형식 검증은 `validator`가 담당하고, 이메일/사용자명 중복 같은
//! 비즈니스 검증은 서비스 계층에서 수행합니다.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::entities::users::user_details::Address;
use crate::utils::string_utils::{clean_optional_string, deserialize_optional_string};

/// 회원가입 요청
///
/// ```json
/// {
///   "email": "user@example.com",
///   "username": "john_doe",
///   "display_name": "John Doe",
///   "password": "SecurePass123",
///   "password_confirm": "SecurePass123"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_signup_passwords_match"))]
pub struct SignupRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 3, max = 30, message = "사용자명은 3-30자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(length(min = 1, max = 50, message = "표시 이름은 1-50자 사이여야 합니다"))]
    pub display_name: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    pub password_confirm: String,
}

/// 로그인 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 프로필 수정 요청 (보낸 필드만 반영)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 50, message = "표시 이름은 1-50자 사이여야 합니다"))]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 3, max = 30, message = "사용자명은 3-30자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.username.is_none()
    }
}

/// 비밀번호 변경 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_new_passwords_match"))]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "현재 비밀번호를 입력해주세요"))]
    pub current_password: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,

    pub new_password_confirm: String,
}

/// 배송지 입력
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressInput {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 30, message = "배송지 이름은 30자 이하여야 합니다"))]
    pub label: Option<String>,

    #[validate(length(min = 1, max = 200, message = "주소는 1-200자 사이여야 합니다"))]
    pub line1: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 200, message = "상세 주소는 200자 이하여야 합니다"))]
    pub line2: Option<String>,

    #[validate(length(min = 1, max = 100, message = "도시를 입력해주세요"))]
    pub city: String,

    #[validate(length(min = 1, max = 100, message = "주/도를 입력해주세요"))]
    pub state: String,

    #[validate(length(min = 3, max = 12, message = "우편번호는 3-12자 사이여야 합니다"))]
    pub postal_code: String,

    #[validate(length(min = 2, max = 60, message = "국가를 입력해주세요"))]
    pub country: String,

    #[serde(default)]
    pub is_default: bool,
}

impl From<AddressInput> for Address {
    fn from(input: AddressInput) -> Self {
        Self {
            label: clean_optional_string(input.label),
            line1: input.line1.trim().to_string(),
            line2: clean_optional_string(input.line2),
            city: input.city.trim().to_string(),
            state: input.state.trim().to_string(),
            postal_code: input.postal_code.trim().to_string(),
            country: input.country.trim().to_string(),
            is_default: input.is_default,
        }
    }
}

/// 사용자 상세 정보 upsert 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertUserDetailsRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자 사이여야 합니다"))]
    pub full_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(max = 10, message = "배송지는 최대 10개까지 등록할 수 있습니다"))]
    #[validate(nested)]
    pub addresses: Vec<AddressInput>,
}

fn validate_signup_passwords_match(req: &SignupRequest) -> Result<(), ValidationError> {
    passwords_match(&req.password, &req.password_confirm)
}

fn validate_new_passwords_match(req: &ChangePasswordRequest) -> Result<(), ValidationError> {
    passwords_match(&req.new_password, &req.new_password_confirm)
}

fn passwords_match(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("비밀번호가 일치하지 않습니다".into()));
    }
    Ok(())
}

/// 알파벳, 숫자, 언더스코어만 허용
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 알파벳, 숫자, 언더스코어만 사용 가능합니다".into()));
    }
    Ok(())
}

/// 대문자, 소문자, 숫자를 각각 하나 이상 포함해야 합니다.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_uppercase && has_lowercase && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 대문자, 소문자, 숫자를 포함해야 합니다".into()));
    }
    Ok(())
}

/// `+`로 시작할 수 있고 숫자 7-15개, 공백과 하이픈 허용
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = phone
        .char_indices()
        .all(|(i, c)| c.is_ascii_digit() || c == ' ' || c == '-' || (c == '+' && i == 0));

    if !allowed || !(7..=15).contains(&digits) {
        return Err(ValidationError::new("invalid_phone")
            .with_message("유효한 전화번호를 입력해주세요".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupRequest {
        SignupRequest {
            email: "user@example.com".to_string(),
            username: "john_doe".to_string(),
            display_name: "John Doe".to_string(),
            password: "SecurePass123".to_string(),
            password_confirm: "SecurePass123".to_string(),
        }
    }

    #[test]
    fn test_valid_signup() {
        assert!(signup().validate().is_ok());
    }

    #[test]
    fn test_signup_rejects_bad_username() {
        let mut req = signup();
        req.username = "john-doe".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));

        req.username = "jo".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_signup_rejects_weak_password() {
        let mut req = signup();
        req.password = "password123".to_string();
        req.password_confirm = "password123".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_signup_rejects_mismatched_confirmation() {
        let mut req = signup();
        req.password_confirm = "SecurePass124".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_requires_email_format() {
        let req = LoginRequest {
            email: "not-an-email".to_string(),
            password: "x".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_profile_blank_fields_become_none() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"display_name": "   ", "username": "new_name"}"#).unwrap();
        assert!(req.display_name.is_none());
        assert_eq!(req.username.as_deref(), Some("new_name"));
        assert!(req.validate().is_ok());
        assert!(!req.is_empty());
    }

    #[test]
    fn test_change_password_confirmation() {
        let req = ChangePasswordRequest {
            current_password: "OldPass123".to_string(),
            new_password: "NewPass123".to_string(),
            new_password_confirm: "NewPass999".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_user_details_nested_address_validation() {
        let json = r#"{
            "full_name": "Asha Rao",
            "phone": "+91 98765-43210",
            "addresses": [
                {"line1": "", "city": "Pune", "state": "MH", "postal_code": "411001", "country": "India"}
            ]
        }"#;
        let req: UpsertUserDetailsRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_user_details_phone_format() {
        assert!(validate_phone("+91 98765-43210").is_ok());
        assert!(validate_phone("12-34").is_err());
        assert!(validate_phone("98765+43210").is_err());
    }

    #[test]
    fn test_address_input_is_trimmed() {
        let input = AddressInput {
            label: Some("  Home ".to_string()),
            line1: " 12 MG Road ".to_string(),
            line2: Some("   ".to_string()),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            postal_code: "411001".to_string(),
            country: "India".to_string(),
            is_default: false,
        };
        let address = Address::from(input);
        assert_eq!(address.label.as_deref(), Some("Home"));
        assert_eq!(address.line1, "12 MG Road");
        assert!(address.line2.is_none());
    }
}
