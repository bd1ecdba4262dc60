use dispatch_core::ResilienceError;
use std::fmt;

/// Errors from the directory client, before the fallback chain runs.
#[derive(Debug, Clone)]
pub enum DirectoryError {
    /// The outbound call failed (transport error, non-2xx response, ...).
    QueryFailed { reason: String },
    /// The outbound call was rejected by the local rate limiter before it
    /// was attempted.
    RateLimited { retry_after_secs: u64 },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::QueryFailed { reason } => write!(f, "directory query failed: {reason}"),
            DirectoryError::RateLimited { retry_after_secs } => {
                write!(f, "directory query rate limited, retry after {retry_after_secs}s")
            }
        }
    }
}

impl std::error::Error for DirectoryError {}

impl<E> From<DirectoryError> for ResilienceError<E> {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::QueryFailed { .. } => ResilienceError::DependencyUnavailable {
                dependency: "executor_directory",
            },
            DirectoryError::RateLimited { retry_after_secs } => ResilienceError::RateLimited {
                retry_after: Some(std::time::Duration::from_secs(retry_after_secs)),
            },
        }
    }
}
