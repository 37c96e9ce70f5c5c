//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted session row.
///
/// Created at login, read on every authenticated request, deleted on
/// logout or reaped after expiry. The payload is the serialized public
/// identity; the session is self-contained and resolution never touches
/// the user table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionEntry {
    /// Opaque session token (primary key). Full values must never be logged.
    pub token: String,
    /// Serialized identity payload.
    pub payload: serde_json::Value,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

impl SessionEntry {
    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// A short token prefix safe for log lines.
    pub fn token_fragment(&self) -> &str {
        let end = self.token.len().min(8);
        &self.token[..end]
    }
}
