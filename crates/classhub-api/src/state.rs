//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use classhub_auth::session::manager::SessionManager;
use classhub_auth::strategy::Authenticator;
use classhub_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Credential verification and registration
    pub authenticator: Arc<Authenticator>,
    /// Session lifecycle manager
    pub sessions: Arc<SessionManager>,
}
