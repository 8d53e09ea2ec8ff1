//! Shared error type across hassprom crates.

use thiserror::Error;

/// Stable error codes (used in HTTP bodies and logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input / malformed request or config.
    BadRequest,
    /// Labels supplied by an adapter do not fit the metric.
    LabelConflict,
    /// Metric registered twice with different kinds.
    KindMismatch,
    /// Missing or wrong bearer token.
    Unauthorized,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Service is shutting down.
    Unavailable,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::LabelConflict => "LABEL_CONFLICT",
            ErrorCode::KindMismatch => "KIND_MISMATCH",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Unavailable => "UNAVAILABLE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HasspromError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum HasspromError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("extra labels contain conflicting keys: {0:?}")]
    ConflictingLabels(Vec<String>),
    #[error("label names for {metric} must be {expected:?}, got {got:?}")]
    LabelMismatch {
        metric: String,
        expected: Vec<String>,
        got: Vec<String>,
    },
    #[error("label set of {metric} already belongs to {owner}")]
    KeyOwned { metric: String, owner: String },
    #[error("metric {metric} already registered as {existing}")]
    KindMismatch { metric: String, existing: &'static str },
    #[error("unauthorized")]
    Unauthorized,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("draining: not accepting input")]
    Draining,
    #[error("internal: {0}")]
    Internal(String),
}

impl HasspromError {
    /// Map internal error to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            HasspromError::BadRequest(_) => ErrorCode::BadRequest,
            HasspromError::ConflictingLabels(_) => ErrorCode::LabelConflict,
            HasspromError::LabelMismatch { .. } => ErrorCode::LabelConflict,
            HasspromError::KeyOwned { .. } => ErrorCode::LabelConflict,
            HasspromError::KindMismatch { .. } => ErrorCode::KindMismatch,
            HasspromError::Unauthorized => ErrorCode::Unauthorized,
            HasspromError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            HasspromError::Draining => ErrorCode::Unavailable,
            HasspromError::Internal(_) => ErrorCode::Internal,
        }
    }
}
