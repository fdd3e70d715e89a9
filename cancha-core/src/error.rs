//! API error types.

use thiserror::Error;

/// Errors surfaced by the API client and the list synchronizers.
///
/// The type is `Clone` so that callers awaiting a shared in-flight fetch
/// all receive the same failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// API base URL is not configured
    #[error("API base URL not configured. Set api.base_url in config.")]
    NotConfigured,
    /// Network-level failure
    #[error("HTTP error: {0}")]
    Transport(String),
    /// Non-2xx response, with the message extracted from the error body
    #[error("{message}")]
    Status { code: u16, message: String },
    /// Client-side validation failure, raised before any network call
    #[error("{0}")]
    Validation(String),
    /// Backend-signaled rejection on an otherwise successful response
    #[error("{0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_uses_extracted_message() {
        let err = ApiError::Status {
            code: 404,
            message: "Request failed with status 404".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status 404");
    }

    #[test]
    fn test_validation_display_is_field_specific() {
        let err = ApiError::Validation("endDate must be after startDate".to_string());
        assert_eq!(err.to_string(), "endDate must be after startDate");
    }
}
