//! Request DTOs for API endpoints
//!
//! Account payloads derive `Validate`. Ad and comment payloads are checked by
//! [`crate::services::validation`] so that the first violated rule is reported.

use std::sync::LazyLock;

use board_core::UserRole;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Registration request. `username` is the account email.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 4, max = 32, message = "Username must be 4-32 characters"))]
    pub username: String,

    #[validate(length(min = 8, max = 16, message = "Password must be 8-16 characters"))]
    pub password: String,

    #[validate(length(min = 2, max = 16, message = "First name must be 2-16 characters"))]
    pub first_name: String,

    #[validate(length(min = 2, max = 16, message = "Last name must be 2-16 characters"))]
    pub last_name: String,

    #[validate(regex(path = *PHONE_RE, message = "Phone must look like +7 (XXX) XXX-XX-XX"))]
    pub phone: String,

    /// Requested role, `USER` when omitted
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 4, max = 32, message = "Username must be 4-32 characters"))]
    pub username: String,

    #[validate(length(min = 8, max = 16, message = "Password must be 8-16 characters"))]
    pub password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Partial profile update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 10, message = "First name must be 3-10 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 3, max = 10, message = "Last name must be 3-10 characters"))]
    pub last_name: Option<String>,

    #[validate(regex(path = *PHONE_RE, message = "Phone must look like +7 (XXX) XXX-XX-XX"))]
    pub phone: Option<String>,
}

/// Password change request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPasswordRequest {
    #[validate(length(min = 8, max = 16, message = "Password must be 8-16 characters"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 16, message = "Password must be 8-16 characters"))]
    pub new_password: String,
}

// ============================================================================
// Ad and Comment Requests
// ============================================================================

/// Ad properties for create (all required) and update (all optional)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrUpdateAdRequest {
    pub title: Option<String>,
    pub price: Option<i32>,
    pub description: Option<String>,
}

/// Comment text for create and update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrUpdateCommentRequest {
    pub text: Option<String>,
}

/// Uploaded image as received from the client
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub content_type: Option<String>,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(content_type: Option<String>, file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type,
            file_name,
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Extension of the uploaded file name, without the dot
    pub fn extension(&self) -> Option<&str> {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

// ============================================================================
// Phone format
// ============================================================================

/// `+7` followed by ten digits, e.g. `+7 (999) 123-45-67` or `+79991234567`.
/// Separators are ASCII only.
pub(crate) static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+7[\t\n\x0B\x0C\r ]?\(?[0-9]{3}\)?[\t\n\x0B\x0C\r ]?[0-9]{3}-?[0-9]{2}-?[0-9]{2}$")
        .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
});

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid_phone(phone: &str) -> bool {
        PHONE_RE.is_match(phone)
    }

    #[test]
    fn test_phone_formats() {
        assert!(is_valid_phone("+7 (999) 123-45-67"));
        assert!(is_valid_phone("+79991234567"));
        assert!(is_valid_phone("+7 999 123-45-67"));
        assert!(is_valid_phone("+7(999)1234567"));
        assert!(!is_valid_phone("8 999 123-45-67"));
        assert!(!is_valid_phone("+7 999 123-45-6"));
        assert!(!is_valid_phone("+7 999 123-45-678"));
        assert!(!is_valid_phone("+7 abc 123-45-67"));
        assert!(!is_valid_phone("+7  999 123-45-67"));
    }

    #[test]
    fn test_phone_rejects_non_ascii_separators() {
        assert!(!is_valid_phone("+7\u{00A0}999\u{2003}123-45-67"));
        assert!(!is_valid_phone("+7 999\u{3000}123-45-67"));
        assert!(!is_valid_phone("+7 \u{0663}99 123-45-67"));
        assert!(is_valid_phone("+7\t999 123-45-67"));
    }

    #[test]
    fn test_update_user_phone_uses_pattern() {
        let request = UpdateUserRequest {
            phone: Some("+7\u{00A0}999 123-45-67".to_string()),
            ..Default::default()
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));

        let request = UpdateUserRequest {
            phone: Some("+7 (999) 123-45-67".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_validation() {
        let request = RegisterRequest {
            username: "ann@example.com".to_string(),
            password: "password1".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            phone: "+7 999 123-45-67".to_string(),
            role: None,
        };
        assert!(request.validate().is_ok());

        let bad = RegisterRequest {
            phone: "555-0100".to_string(),
            password: "short".to_string(),
            ..request
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_register_request_wire_shape() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"username":"ann@example.com","password":"password1","firstName":"Ann",
                "lastName":"Lee","phone":"+79991234567","role":"ADMIN"}"#,
        )
        .unwrap();
        assert_eq!(request.first_name, "Ann");
        assert_eq!(request.role, Some(UserRole::Admin));
    }

    #[test]
    fn test_update_user_skips_absent_fields() {
        let request = UpdateUserRequest {
            last_name: Some("Park".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        let request = UpdateUserRequest {
            first_name: Some("Al".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_image_extension() {
        let image = ImageUpload::new(None, Some("photo.final.PNG".to_string()), vec![1]);
        assert_eq!(image.extension(), Some("PNG"));
        assert_eq!(ImageUpload::new(None, Some("noext".to_string()), vec![]).extension(), None);
        assert_eq!(ImageUpload::default().extension(), None);
        assert!(ImageUpload::default().is_empty());
    }
}
