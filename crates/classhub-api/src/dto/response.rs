//! Response DTOs.

use serde::{Deserialize, Serialize};

use classhub_entity::identity::Identity;

/// Body of `GET /api/auth/session`.
///
/// Always 200: an absent, expired, or undecodable session is simply
/// unauthenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    /// Whether the request carried a live session.
    pub authenticated: bool,
    /// The session's identity, when authenticated.
    pub user: Option<Identity>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status string.
    pub status: String,
    /// Crate version.
    pub version: String,
}
