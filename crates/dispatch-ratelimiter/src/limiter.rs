use crate::store::{RateLimitDecision, RateLimitStore};
use std::sync::Arc;
use std::time::Duration;

/// Thin, cloneable handle around a shared [`RateLimitStore`].
///
/// Every clone asks the same backend the same question, so concurrent
/// callers (whether threads in this process or entirely separate
/// processes pointed at the same Redis instance) are counted consistently.
#[derive(Clone)]
pub(crate) struct SharedRateLimiter {
    store: Arc<dyn RateLimitStore>,
    limit: u64,
    window: Duration,
}

impl SharedRateLimiter {
    pub(crate) fn new(store: Arc<dyn RateLimitStore>, limit: u64, window: Duration) -> Self {
        Self {
            store,
            limit,
            window,
        }
    }

    pub(crate) async fn check(&self, key: &str) -> RateLimitDecision {
        self.store.check(key, self.limit, self.window).await
    }
}
