//! The public identity derived from a user record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::{User, UserRole};

/// The subset of a user record that is safe to return to clients and to
/// embed in session payloads.
///
/// Explicitly excludes the hashed password. Field names are camelCase on
/// the wire, matching what the surrounding application consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display handle (empty string when the record has none).
    pub username: String,
    /// Email address.
    pub email: String,
    /// User role label.
    pub role: UserRole,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone().unwrap_or_default(),
            email: user.email.clone(),
            role: user.role,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}
