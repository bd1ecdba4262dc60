//! Distributed rate limiting middleware for Tower services.
//!
//! Every app instance that points at the same [`store::RateLimitStore`] agrees
//! on the same sliding-window count for a key, so the limit holds across a
//! fleet rather than per-process. This matters for the login-attempt and
//! token-generation limits guarding shared auth endpoints: a single attacker
//! hitting different instances behind a load balancer must still be capped.
//!
//! # Examples
//!
//! ```
//! use dispatch_ratelimiter::RateLimiterConfig;
//! use tower::ServiceBuilder;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Allow 100 requests per second against the in-memory store (swap in a
//! // RedisRateLimitStore to share the limit across processes).
//! let rate_limiter = RateLimiterConfig::builder()
//!     .limit(100)
//!     .window(Duration::from_secs(1))
//!     .on_permit_rejected(|retry_after| {
//!         println!("rate limited, retry after {:?}", retry_after);
//!     })
//!     .build();
//!
//! let service = ServiceBuilder::new()
//!     .layer(rate_limiter)
//!     .service(tower::service_fn(|req: String| async move {
//!         Ok::<_, std::io::Error>(format!("Response: {}", req))
//!     }));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod events;
mod layer;
mod limiter;
pub mod store;

pub use config::{RateLimiterConfig, RateLimiterConfigBuilder};
pub use error::RateLimiterError;
pub use events::RateLimiterEvent;
pub use layer::RateLimiterLayer;
pub use store::{InMemoryRateLimitStore, RateLimitDecision, RateLimitStore, RedisRateLimitStore};

use crate::limiter::SharedRateLimiter;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::Service;

/// A Tower [`Service`] that applies a distributed rate limit.
///
/// All requests flowing through a given layer instance share a single key
/// (the configured `name`); to limit per-caller, instantiate one layer per
/// caller identity or call [`store::RateLimitStore::check`] directly with a
/// caller-derived key.
pub struct RateLimiter<S> {
    inner: S,
    config: Arc<RateLimiterConfig>,
    limiter: SharedRateLimiter,
}

impl<S> RateLimiter<S> {
    /// Creates a new `RateLimiter` wrapping the given service.
    pub fn new(inner: S, config: Arc<RateLimiterConfig>) -> Self {
        let limiter = SharedRateLimiter::new(
            Arc::clone(&config.store),
            config.limit,
            config.window,
        );

        Self {
            inner,
            config,
            limiter,
        }
    }
}

impl<S> Clone for RateLimiter<S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
            limiter: self.limiter.clone(),
        }
    }
}

impl<S, Req> Service<Req> for RateLimiter<S>
where
    S: Service<Req> + Clone + Send + 'static,
    S::Future: Send + 'static,
    Req: Send + 'static,
{
    type Response = S::Response;
    type Error = RateLimiterError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(|_| RateLimiterError::RateLimitExceeded {
            retry_after: self.config.window,
        })
    }

    fn call(&mut self, req: Req) -> Self::Future {
        let limiter = self.limiter.clone();
        let config = Arc::clone(&self.config);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let decision = limiter.check(&config.name).await;

            if decision.allowed {
                let event = RateLimiterEvent::PermitAcquired {
                    pattern_name: config.name.clone(),
                    timestamp: Instant::now(),
                    current_count: decision.current_count,
                    limit: decision.limit,
                };
                config.event_listeners.emit(&event);

                inner.call(req).await.map_err(|_| RateLimiterError::RateLimitExceeded {
                    retry_after: config.window,
                })
            } else {
                let retry_after = decision.retry_after.unwrap_or(config.window);
                let event = RateLimiterEvent::PermitRejected {
                    pattern_name: config.name.clone(),
                    timestamp: Instant::now(),
                    current_count: decision.current_count,
                    limit: decision.limit,
                    retry_after,
                };
                config.event_listeners.emit(&event);

                Err(RateLimiterError::RateLimitExceeded { retry_after })
            }
        })
    }
}
