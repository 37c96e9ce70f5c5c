//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use classhub_entity::user::UserRole;

/// Registration request body.
///
/// Field names are camelCase on the wire. Any shape or validation failure
/// surfaces to the client as the single "Invalid user data" message.
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address (the login key).
    #[validate(email)]
    pub email: String,
    /// Plaintext password; hashed before anything is persisted.
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    /// Given name.
    #[validate(length(min = 1, max = 120))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 120))]
    pub last_name: String,
    /// Requested role.
    pub role: UserRole,
    /// Optional display handle.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional profile image URL.
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Login request body.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
