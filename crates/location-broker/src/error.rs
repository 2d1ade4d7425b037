use crate::authorization::AuthorizationStatus;

/// Unified error type for the location-broker crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    /// Authorization is known and not sufficient to operate.
    #[error(transparent)]
    NotAuthorized(#[from] NotAuthorizedError),

    /// The sensor port does not support the requested operation.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Invalid input provided by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be read, parsed or written.
    #[error("config error: {0}")]
    Config(String),
}

/// Returned by `start()` when the current status is known and not in the
/// allowed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("location access not authorized (status: {status})")]
pub struct NotAuthorizedError {
    pub status: AuthorizationStatus,
}

/// Result type alias using [`LocationError`].
pub type LocationResult<T> = Result<T, LocationError>;
