//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in days from creation. Expiry is absolute; sessions
    /// are not extended by activity.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
    /// Name of the session cookie handed to clients.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie carries the `Secure` flag. Enable in
    /// production behind TLS.
    #[serde(default)]
    pub secure_cookies: bool,
    /// Interval for expired session cleanup in minutes.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
            cookie_name: default_cookie_name(),
            secure_cookies: false,
            cleanup_interval_minutes: default_cleanup_interval(),
        }
    }
}

fn default_ttl_days() -> i64 {
    30
}

fn default_cookie_name() -> String {
    "classhub_session".to_string()
}

fn default_cleanup_interval() -> u64 {
    60
}
