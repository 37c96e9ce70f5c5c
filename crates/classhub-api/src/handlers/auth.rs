//! Auth handlers — register, login, logout, session, profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use classhub_auth::strategy::Registration;
use classhub_core::config::session::SessionConfig;
use classhub_core::error::AppError;
use classhub_entity::identity::Identity;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::SessionStatusResponse;
use crate::error::ApiError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
///
/// Register-then-login in one step: a successful registration immediately
/// starts a session for the new identity.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<Identity>), ApiError> {
    if req.password.chars().count() < state.config.auth.password_min_length {
        return Err(AppError::validation("Invalid user data").into());
    }

    let identity = state
        .authenticator
        .register(Registration {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role,
            profile_image: req.profile_image,
        })
        .await?;

    let token = state.sessions.start(&identity).await?;
    let jar = jar.add(session_cookie(&state.config.session, token));

    Ok((StatusCode::CREATED, jar, Json(identity)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Identity>), ApiError> {
    let identity = state
        .authenticator
        .verify_credentials(&req.email, &req.password)
        .await?;

    let token = state.sessions.start(&identity).await?;
    let jar = jar.add(session_cookie(&state.config.session, token));

    Ok((jar, Json(identity)))
}

/// POST /api/auth/logout
///
/// Destroys the session if one exists and clears the cookie either way.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), ApiError> {
    let cookie_name = state.config.session.cookie_name.clone();

    if let Some(cookie) = jar.get(&cookie_name) {
        state.sessions.destroy(cookie.value()).await?;
    }

    let removal = Cookie::build((cookie_name, "")).path("/").build();
    Ok((jar.remove(removal), StatusCode::OK))
}

/// GET /api/auth/session
pub async fn session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let user = match jar.get(&state.config.session.cookie_name) {
        Some(cookie) => state.sessions.resolve(cookie.value()).await?,
        None => None,
    };

    Ok(Json(SessionStatusResponse {
        authenticated: user.is_some(),
        user,
    }))
}

/// GET /api/auth/profile
pub async fn profile(CurrentUser(identity): CurrentUser) -> Json<Identity> {
    Json(identity)
}

/// Builds the HTTP-only session cookie carrying the opaque token.
fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .max_age(time::Duration::days(config.ttl_days))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionConfig::default();
        let cookie = session_cookie(&config, "token-value".to_string());

        assert_eq!(cookie.name(), "classhub_session");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(30)));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_secure_flag_follows_config() {
        let config = SessionConfig {
            secure_cookies: true,
            ..SessionConfig::default()
        };
        let cookie = session_cookie(&config, "t".to_string());
        assert_eq!(cookie.secure(), Some(true));
    }
}
