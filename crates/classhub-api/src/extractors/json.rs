//! JSON extractor that validates the deserialized body.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use classhub_core::error::AppError;

use crate::error::ApiError;

/// `Json<T>` that also runs `validator` rules.
///
/// Both an undeserializable body and a failed validation collapse into the
/// single "Invalid user data" message the client contract specifies;
/// details go to the debug log only.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Rejected undeserializable request body");
            ApiError(AppError::validation("Invalid user data"))
        })?;

        value.validate().map_err(|e| {
            tracing::debug!(error = %e, "Rejected invalid request body");
            ApiError(AppError::validation("Invalid user data"))
        })?;

        Ok(ValidatedJson(value))
    }
}
