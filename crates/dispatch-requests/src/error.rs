use dispatch_core::ResilienceError;
use std::fmt;

/// Errors from [`crate::allocator::RequestNumberAllocator`].
#[derive(Debug, Clone)]
pub enum AllocatorError {
    /// The backing store could not be reached. The allocator refuses rather
    /// than falling open, since a duplicate request number is worse than an
    /// unavailable one.
    StoreUnavailable,
    /// All `001..999` slots for the date are taken.
    Exhausted { date_key: String },
}

impl fmt::Display for AllocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocatorError::StoreUnavailable => {
                write!(f, "request number store unavailable")
            }
            AllocatorError::Exhausted { date_key } => {
                write!(f, "request number slots exhausted for {date_key}")
            }
        }
    }
}

impl std::error::Error for AllocatorError {}

impl<E> From<AllocatorError> for ResilienceError<E> {
    fn from(err: AllocatorError) -> Self {
        match err {
            AllocatorError::StoreUnavailable => ResilienceError::DependencyUnavailable {
                dependency: "request_number_store",
            },
            AllocatorError::Exhausted { date_key } => {
                ResilienceError::AllocatorExhausted { date_key }
            }
        }
    }
}

/// Errors from [`crate::state_machine::RequestStateMachine`].
#[derive(Debug, Clone)]
pub enum TransitionError {
    /// `(from, to)` is not in the legal transition table.
    Illegal { from: String, to: String },
    /// The caller's expected version lost a race to a concurrent transition.
    Stale { expected: u64, actual: u64 },
    /// The actor's role does not permit this transition.
    Forbidden { from: String, to: String },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::Illegal { from, to } => {
                write!(f, "illegal transition from {from} to {to}")
            }
            TransitionError::Stale { expected, actual } => {
                write!(f, "stale state: expected version {expected}, actual {actual}")
            }
            TransitionError::Forbidden { from, to } => {
                write!(f, "actor not permitted to transition from {from} to {to}")
            }
        }
    }
}

impl std::error::Error for TransitionError {}

impl<E> From<TransitionError> for ResilienceError<E> {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Illegal { from, to } => ResilienceError::IllegalTransition { from, to },
            TransitionError::Stale { expected, actual } => ResilienceError::StaleState {
                expected_version: expected,
                actual_version: actual,
            },
            TransitionError::Forbidden { .. } => ResilienceError::Unauthorized {
                reason: "insufficient_permissions",
            },
        }
    }
}
