//! HTTP-level tests for session resolution and logout.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_session_without_cookie_is_unauthenticated() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/auth/session", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("authenticated").unwrap(), false);
    assert!(response.body.get("user").unwrap().is_null());
}

#[tokio::test]
async fn test_session_with_forged_token_is_unauthenticated() {
    let app = helpers::TestApp::new();
    app.register("a@x.com", "p@ss123").await;

    let forged = format!("{}={}", app.config.session.cookie_name, "0".repeat(64));
    let response = app
        .request("GET", "/api/auth/session", None, Some(&forged))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("authenticated").unwrap(), false);
}

#[tokio::test]
async fn test_logout_destroys_session() {
    let app = helpers::TestApp::new();

    let registered = app.register("a@x.com", "p@ss123").await;
    let cookie = helpers::session_cookie(&registered).unwrap();

    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&cookie))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    // The clearing Set-Cookie empties the session value.
    let cleared = helpers::session_cookie(&logout).unwrap();
    assert_eq!(cleared, format!("{}=", app.config.session.cookie_name));

    // The old token no longer resolves even if a client replays it.
    let session = app
        .request("GET", "/api/auth/session", None, Some(&cookie))
        .await;
    assert_eq!(session.status, StatusCode::OK);
    assert_eq!(session.body.get("authenticated").unwrap(), false);
    assert!(session.body.get("user").unwrap().is_null());

    let profile = app
        .request("GET", "/api/auth/profile", None, Some(&cookie))
        .await;
    assert_eq!(profile.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_is_ok() {
    let app = helpers::TestApp::new();

    let response = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    // Logging out twice with the same cookie is also fine.
    let registered = app.register("a@x.com", "p@ss123").await;
    let cookie = helpers::session_cookie(&registered).unwrap();
    for _ in 0..2 {
        let logout = app
            .request("POST", "/api/auth/logout", None, Some(&cookie))
            .await;
        assert_eq!(logout.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_sessions_are_independent_across_users() {
    let app = helpers::TestApp::new();

    let first = app.register("a@x.com", "p@ss123").await;
    let second = app.register("b@x.com", "0therpw!").await;
    let first_cookie = helpers::session_cookie(&first).unwrap();
    let second_cookie = helpers::session_cookie(&second).unwrap();

    // Logging out one user leaves the other's session intact.
    app.request("POST", "/api/auth/logout", None, Some(&first_cookie))
        .await;

    let remaining = app
        .request("GET", "/api/auth/session", None, Some(&second_cookie))
        .await;
    assert_eq!(remaining.body.get("authenticated").unwrap(), true);
    assert_eq!(remaining.body.pointer("/user/email").unwrap().as_str().unwrap(), "b@x.com");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("status").unwrap().as_str().unwrap(), "ok");
}
