//! Tagged success/failure union and stable error codes.

use crate::{entity::DomainErrorKind, repository::ports::RepositoryError};
use serde::{Serialize, Serializer, ser::SerializeStruct};
use std::fmt;

/// Stable machine-readable failure codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input failed validation.
    ValidationFailed,
    /// The aggregate's state does not allow the operation.
    InvalidStateTransition,
    /// A referenced aggregate does not exist.
    NotFound,
    /// The operation conflicts with stored data.
    Conflict,
    /// Query parameters were rejected.
    InvalidQuery,
    /// The persistence backend failed.
    PersistenceFailed,
}

impl ErrorCode {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::PersistenceFailed => "PERSISTENCE_FAILED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DomainErrorKind> for ErrorCode {
    fn from(kind: DomainErrorKind) -> Self {
        match kind {
            DomainErrorKind::Validation => Self::ValidationFailed,
            DomainErrorKind::StateTransition => Self::InvalidStateTransition,
        }
    }
}

/// Errors that can cross the service boundary.
pub trait ServiceError: std::error::Error {
    /// Returns the stable code for this failure.
    fn code(&self) -> ErrorCode;
}

impl ServiceError for RepositoryError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Duplicate { .. } | Self::IdMismatch { .. } => ErrorCode::Conflict,
            Self::InvalidPagination(_) => ErrorCode::InvalidQuery,
            Self::Serialization(_) | Self::Persistence(_) => ErrorCode::PersistenceFailed,
        }
    }
}

/// Outcome of a service operation as seen by callers outside the crate.
///
/// Serialises as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "...", "code": "..."}`.
///
/// # Examples
///
/// ```
/// use atelier::repository::ports::RepositoryError;
/// use atelier::service::{ErrorCode, ServiceResponse};
///
/// let failed: ServiceResponse<u32> =
///     Err::<u32, _>(RepositoryError::InvalidPagination("page 0".to_owned())).into();
/// assert_eq!(failed.code(), Some(ErrorCode::InvalidQuery));
///
/// let ok: ServiceResponse<u32> = Ok::<_, RepositoryError>(7).into();
/// assert_eq!(ok.data(), Some(&7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResponse<T> {
    /// The operation succeeded.
    Success {
        /// Operation payload.
        data: T,
    },
    /// The operation failed with an expected error.
    Failure {
        /// Human-readable error message.
        error: String,
        /// Stable error code.
        code: ErrorCode,
    },
}

impl<T> ServiceResponse<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Wraps a failure.
    #[must_use]
    pub fn failure(error: &impl ServiceError) -> Self {
        Self::Failure {
            error: error.to_string(),
            code: error.code(),
        }
    }

    /// Returns whether the operation succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the payload of a successful response.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the error code of a failed response.
    #[must_use]
    pub const fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { code, .. } => Some(*code),
        }
    }

    /// Returns the error message of a failed response.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

impl<T, E: ServiceError> From<Result<T, E>> for ServiceResponse<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(&err),
        }
    }
}

impl<T: Serialize> Serialize for ServiceResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success { data } => {
                let mut state = serializer.serialize_struct("ServiceResponse", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            Self::Failure { error, code } => {
                let mut state = serializer.serialize_struct("ServiceResponse", 3)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.serialize_field("code", code)?;
                state.end()
            }
        }
    }
}
