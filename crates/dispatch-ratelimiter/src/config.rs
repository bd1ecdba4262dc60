use crate::events::RateLimiterEvent;
use crate::store::{InMemoryRateLimitStore, RateLimitStore};
use dispatch_core::events::{EventListeners, FnListener};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the rate limiter pattern.
pub struct RateLimiterConfig {
    pub(crate) store: Arc<dyn RateLimitStore>,
    pub(crate) limit: u64,
    pub(crate) window: Duration,
    pub(crate) event_listeners: EventListeners<RateLimiterEvent>,
    pub(crate) name: String,
}

/// Builder for [`RateLimiterConfig`].
pub struct RateLimiterConfigBuilder {
    store: Arc<dyn RateLimitStore>,
    limit: u64,
    window: Duration,
    event_listeners: EventListeners<RateLimiterEvent>,
    name: String,
}

impl Default for RateLimiterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterConfigBuilder {
    /// Creates a new builder with defaults.
    ///
    /// Defaults:
    /// - store: in-process [`InMemoryRateLimitStore`] (use [`Self::store`] to point at Redis)
    /// - limit: 50 calls per window
    /// - window: 1 second
    /// - name: `"<unnamed>"`
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryRateLimitStore::new()),
            limit: 50,
            window: Duration::from_secs(1),
            event_listeners: EventListeners::new(),
            name: "<unnamed>".to_string(),
        }
    }

    /// Sets the maximum number of calls admitted per `window` for any given key.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the sliding window duration the limit applies over.
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Points the limiter at a shared store (Redis in production, in-memory
    /// for tests or single-process deployments). Every process configured
    /// with the same store agrees on the same count per key.
    pub fn store(mut self, store: Arc<dyn RateLimitStore>) -> Self {
        self.store = store;
        self
    }

    /// Sets the name for this rate limiter instance (used in events).
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback invoked when a call is admitted.
    pub fn on_permit_acquired<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, u64) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let RateLimiterEvent::PermitAcquired {
                current_count,
                limit,
                ..
            } = event
            {
                f(*current_count, *limit);
            }
        }));
        self
    }

    /// Registers a callback invoked when a call is rejected for exceeding the limit.
    pub fn on_permit_rejected<F>(mut self, f: F) -> Self
    where
        F: Fn(Duration) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let RateLimiterEvent::PermitRejected { retry_after, .. } = event {
                f(*retry_after);
            }
        }));
        self
    }

    /// Builds the rate limiter layer.
    pub fn build(self) -> crate::RateLimiterLayer {
        let config = RateLimiterConfig {
            store: self.store,
            limit: self.limit,
            window: self.window,
            event_listeners: self.event_listeners,
            name: self.name,
        };

        crate::RateLimiterLayer::new(config)
    }
}
