//! `CurrentUser` extractor — resolves the session cookie into an identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use classhub_core::error::AppError;
use classhub_entity::identity::Identity;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated identity available in handlers.
///
/// Resolution goes through the session store only; the identity embedded
/// at login is authoritative until the next login.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl std::ops::Deref for CurrentUser {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(&state.config.session.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(not_authenticated)?;

        match state.sessions.resolve(&token).await? {
            Some(identity) => Ok(CurrentUser(identity)),
            None => Err(not_authenticated()),
        }
    }
}

fn not_authenticated() -> ApiError {
    ApiError(AppError::authentication("Not authenticated"))
}
