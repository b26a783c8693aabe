//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::User;

/// Request body for registering a new user.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 20, message = "Username must be between 3 and 20 characters"))]
    #[schema(example = "alice", min_length = 3, max_length = 20)]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(format = "password", min_length = 8)]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    #[schema(format = "password")]
    pub confirm_password: String,
}

/// Public view of a user. The password hash and cart are never exposed here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "alice")]
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str, confirm: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_camel_case_body() {
        let body: CreateUserRequest = serde_json::from_str(
            r#"{"username":"alice","password":"password123","confirmPassword":"password123"}"#,
        )
        .unwrap();
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_mismatched_confirmation_is_rejected() {
        let errors = request("alice", "password123", "password124")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("confirm_password"));
    }

    #[test]
    fn test_short_password_and_username_are_rejected() {
        let errors = request("al", "short", "short").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
    }
}
