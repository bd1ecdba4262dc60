use dispatch_core::ResilienceError;
use std::fmt;

/// Errors from the dispatcher's own validation. Everything past input
/// validation degrades to a `DispatchResult` with `assigned: false` rather
/// than raising, per the "never an error for no-candidate" policy.
#[derive(Debug, Clone)]
pub enum DispatchError {
    EmptyRequestId,
    InvalidThreshold { value: f64 },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::EmptyRequestId => write!(f, "request id must not be empty"),
            DispatchError::InvalidThreshold { value } => {
                write!(f, "auto_assign_threshold must be within [0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for DispatchError {}

impl<E> From<DispatchError> for ResilienceError<E> {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::EmptyRequestId => ResilienceError::Validation {
                message: "request id must not be empty".to_string(),
            },
            DispatchError::InvalidThreshold { value } => ResilienceError::Validation {
                message: format!("auto_assign_threshold must be within [0, 1], got {value}"),
            },
        }
    }
}
