//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user in the ClassHub system.
///
/// The `password_hash` field is never the plaintext password: it is always
/// `<hex digest>.<hex salt>` produced by the credential hasher, and it is
/// excluded from serialization so it can never leak into a response or a
/// session payload.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Optional display handle.
    pub username: Option<String>,
    /// Email address (unique, the login key).
    pub email: String,
    /// Derived credential in `<hex digest>.<hex salt>` form.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// User role.
    pub role: UserRole,
    /// Profile image URL.
    pub profile_image: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
///
/// Carries the pre-hashed password; plaintext never reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Optional display handle.
    pub username: Option<String>,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Assigned role.
    pub role: UserRole,
    /// Profile image URL.
    pub profile_image: Option<String>,
}
