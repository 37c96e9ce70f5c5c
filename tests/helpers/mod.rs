//! Shared test helpers for the HTTP-level tests.
//!
//! Builds the full router over the in-memory stores so tests exercise the
//! real handlers, extractors, and error mapping without external services.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use classhub_api::state::AppState;
use classhub_auth::password::PasswordHasher;
use classhub_auth::session::SessionManager;
use classhub_auth::store::{IdentityStore, MemoryIdentityStore, MemorySessionStore, SessionStore};
use classhub_auth::strategy::Authenticator;
use classhub_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over fresh in-memory stores.
    pub fn new() -> Self {
        let config = AppConfig::default();

        let identity_store: Arc<dyn IdentityStore> = Arc::new(MemoryIdentityStore::new());
        let session_store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

        let hasher = Arc::new(PasswordHasher::new());
        let authenticator = Arc::new(Authenticator::new(identity_store, Arc::clone(&hasher)));
        let sessions = Arc::new(SessionManager::new(session_store, config.session.clone()));

        let state = AppState {
            config: Arc::new(config.clone()),
            authenticator,
            sessions,
        };

        Self {
            router: classhub_api::build_router(state),
            config,
        }
    }

    /// Make an HTTP request to the test app.
    ///
    /// `cookie` is a `name=value` pair sent as the Cookie header.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body_str = body.map(|b| b.to_string()).unwrap_or_default();
        let request = builder
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Register a user with default names and the student role.
    pub async fn register(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": email,
                "password": password,
                "firstName": "A",
                "lastName": "Bell",
                "role": "student",
            })),
            None,
        )
        .await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

/// Extract the `name=value` session cookie pair from a Set-Cookie header.
pub fn session_cookie(response: &TestResponse) -> Option<String> {
    let raw = response.headers.get(header::SET_COOKIE)?.to_str().ok()?;
    raw.split(';').next().map(|pair| pair.trim().to_string())
}
