//! Remote API error taxonomy

use thiserror::Error;

/// Errors returned by the remote control plane.
///
/// Gateway implementations map every transport-level failure into one of
/// these variants, preserving the raw remote message. Everything above the
/// gateway reasons about this taxonomy only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The resource does not exist, either not yet visible or already gone.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Concurrent modification or duplicate name.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The control plane asked us to slow down.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Credentials missing, expired, or insufficient.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The request payload was rejected as malformed or unsupported.
    #[error("invalid request: {0}")]
    Invalid(String),

    /// Anything else, with the original status code preserved.
    #[error("unexpected response (status {status}): {message}")]
    Unknown { status: u16, message: String },
}

impl ApiError {
    /// Map an HTTP status code and response body into the taxonomy.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            408 | 429 => ApiError::RateLimited(message),
            401 | 403 => ApiError::Unauthorized(message),
            400 | 422 => ApiError::Invalid(message),
            _ => ApiError::Unknown { status, message },
        }
    }

    /// Whether retrying the same call later can plausibly succeed.
    ///
    /// `NotFound` is deliberately not listed: right after a create it is a
    /// consistency artifact, on a plain read it means the resource is gone.
    /// The retry layer decides per call site.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Conflict(_) | ApiError::RateLimited(_) => true,
            ApiError::Unknown { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether retrying is pointless without outside intervention.
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
