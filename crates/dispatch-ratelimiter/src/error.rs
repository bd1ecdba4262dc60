use dispatch_core::ResilienceError;
use std::fmt;
use std::time::Duration;

/// Errors that can occur when using the rate limiter.
#[derive(Debug, Clone)]
pub enum RateLimiterError {
    /// The caller exceeded the configured limit for this key within the window.
    RateLimitExceeded { retry_after: Duration },
}

impl fmt::Display for RateLimiterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateLimiterError::RateLimitExceeded { retry_after } => {
                write!(f, "rate limit exceeded, retry after {:?}", retry_after)
            }
        }
    }
}

impl std::error::Error for RateLimiterError {}

// Conversion to ResilienceError for zero-boilerplate error handling
impl<E> From<RateLimiterError> for ResilienceError<E> {
    fn from(err: RateLimiterError) -> Self {
        match err {
            RateLimiterError::RateLimitExceeded { retry_after } => ResilienceError::RateLimited {
                retry_after: Some(retry_after),
            },
        }
    }
}
