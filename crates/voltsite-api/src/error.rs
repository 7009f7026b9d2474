//! Error types for the transport layer.

use std::collections::BTreeMap;

use thiserror::Error;

/// Field-level validation messages echoed from the backend, keyed by field
/// name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors surfaced to consumers of the API client.
///
/// The type is `Clone` on purpose: a single fetch outcome may be delivered
/// to every caller that joined an in-flight request, so errors are carried
/// as plain messages rather than wrapped source errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The requested resource does not exist (HTTP 404).
    #[error("resource not found")]
    NotFound,

    /// The backend rejected a write with field-level messages (HTTP 4xx).
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// Transport failure (connection, timeout) after retries were exhausted.
    #[error("network error: {0}")]
    Network(String),

    /// Anything else: unexpected status codes, malformed response bodies.
    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Messages for a single field of a validation error, if present.
    #[must_use]
    pub fn field_messages(&self, field: &str) -> Option<&[String]> {
        match self {
            Self::Validation(fields) => fields.get(field).map(Vec::as_slice),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Unknown(format!("malformed response body: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias using [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_field_messages() {
        let mut fields = FieldErrors::new();
        fields.insert("email".to_string(), vec!["required".to_string()]);
        let err = ApiError::Validation(fields);

        assert_eq!(err.field_messages("email").unwrap(), ["required"]);
        assert!(err.field_messages("phone").is_none());
        assert!(ApiError::NotFound.field_messages("email").is_none());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(ApiError::NotFound.to_string(), "resource not found");
        assert_eq!(
            ApiError::Network("timed out".to_string()).to_string(),
            "network error: timed out"
        );
    }
}
