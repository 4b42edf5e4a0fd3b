//! # Common Error Types
//!
//! Consolidated error handling for the client engine.
//!
//! Every backend failure is normalized by the HTTP wrapper into an
//! [`ApiError`], the `{status, message}` taxonomy the rest of the engine
//! works with:
//!
//! - **Network**: the request never produced a response
//! - **Validation** (422): the first message of the first field key, in
//!   wire object order
//! - **Unauthorized** (401): forces session expiry
//! - **Forbidden** (403) / **NotFound** (404)
//! - **Server**: any other non-success status
//! - **Parse**: a success response whose body did not deserialize
//!
//! [`AppError`] wraps everything the engine itself can fail on.

use thiserror::Error;

/// Normalized backend API error
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No response at all (DNS, refused connection, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// 422 with field errors; the message is the first message of the
    /// first field key in object iteration order
    #[error("{0}")]
    Validation(String),

    /// 401; the session store has already been expired by the wrapper
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Success status with an undecodable body
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// HTTP status this error was normalized from, when one exists
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(_) | ApiError::Parse(_) => None,
            ApiError::Validation(_) => Some(422),
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Server { status, .. } => Some(*status),
        }
    }
}

/// Application-wide error type for the client engine.
///
/// # Error Variants
///
/// - **Api**: backend communication failures (see [`ApiError`])
/// - **Session**: session store load/persist failures
/// - **State**: invalid state transitions (e.g. finalizing a draft that
///   was never created server-side)
/// - **Validation**: local input validation failures
#[derive(Debug, Error)]
pub enum AppError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("session error: {0}")]
    Session(String),

    #[error("state error: {0}")]
    State(String),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Convenience alias used throughout the client crate
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert_eq!(ApiError::Validation("x".into()).status(), Some(422));
        assert_eq!(
            ApiError::Server { status: 500, message: "boom".into() }.status(),
            Some(500)
        );
        assert_eq!(ApiError::Network("refused".into()).status(), None);
    }

    #[test]
    fn test_display_shapes() {
        let err = ApiError::Server { status: 503, message: "maintenance".into() };
        assert_eq!(err.to_string(), "server error (503): maintenance");
        let err: AppError = ApiError::Unauthorized.into();
        assert_eq!(err.to_string(), "API error: unauthorized");
    }
}
