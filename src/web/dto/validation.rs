//! Validation utilities for Web API DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::web::error::{ApiError, INVALID_REQUEST_MESSAGE};

/// A JSON extractor that validates the request body.
///
/// A body that is not JSON, or does not fit `T`, is rejected with 400 and a
/// fixed message. Field errors from the `validator` crate are rejected with
/// 400 and per-field details.
///
/// # Example
///
/// ```ignore
/// use tempmail::web::dto::ValidatedJson;
///
/// async fn delete_inbox(
///     ValidatedJson(payload): ValidatedJson<DeleteInboxRequest>,
/// ) -> Result<Json<SuccessResponse>, ApiError> {
///     // payload is already validated
///     // ...
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            ApiError::bad_request(INVALID_REQUEST_MESSAGE)
        })?;

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}

/// Validate that a string does not contain control characters.
pub fn no_control_chars(value: &str) -> Result<(), validator::ValidationError> {
    if value.chars().any(char::is_control) {
        return Err(validator::ValidationError::new("no_control_chars")
            .with_message("Must not contain control characters".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty_trimmed_valid() {
        assert!(not_empty_trimmed("alice@mail.test").is_ok());
        assert!(not_empty_trimmed("  alice  ").is_ok());
    }

    #[test]
    fn test_not_empty_trimmed_invalid() {
        assert!(not_empty_trimmed("").is_err());
        assert!(not_empty_trimmed("   ").is_err());
        assert!(not_empty_trimmed("\t\n").is_err());
    }

    #[test]
    fn test_no_control_chars() {
        assert!(no_control_chars("alice").is_ok());
        assert!(no_control_chars("al\x00ice").is_err());
        assert!(no_control_chars("al\nice").is_err());
    }
}
