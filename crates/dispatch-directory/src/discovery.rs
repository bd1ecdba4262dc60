//! Composes the directory client, the shared rate limiter and the fallback
//! manager into the rate-limited, fallback-wrapped executor query the
//! dispatcher calls.

use crate::client::DirectoryClient;
use crate::events::DirectoryEvent;
use crate::model::{DiscoveryResult, ExecutorSnapshot, QueryCriteria};
use dispatch_core::events::{EventListener, EventListeners};
use dispatch_core::mode::ServiceMode;
use dispatch_fallback::{FallbackManager, OperationConfig};
use dispatch_ratelimiter::RateLimitStore;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::warn;

const OPERATION: &str = "executor_directory_query";

/// Configuration for [`ExecutorDiscovery`].
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    pub rate_limit: u64,
    pub rate_limit_window: Duration,
    pub query_timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            rate_limit: 20,
            rate_limit_window: Duration::from_secs(1),
            query_timeout: Duration::from_secs(2),
            cache_ttl: Duration::from_secs(30),
        }
    }
}

/// Executor discovery: queries the directory for candidates, admitting the
/// outbound call through a shared rate limiter and wrapping it in the
/// multi-strategy fallback chain so a directory outage degrades to a cached
/// or empty roster rather than stalling the dispatcher.
pub struct ExecutorDiscovery {
    client: Arc<dyn DirectoryClient>,
    rate_limit_store: Arc<dyn RateLimitStore>,
    config: DiscoveryConfig,
    fallback: FallbackManager<Vec<ExecutorSnapshot>>,
    event_listeners: EventListeners<DirectoryEvent>,
}

impl ExecutorDiscovery {
    pub fn new(
        client: Arc<dyn DirectoryClient>,
        rate_limit_store: Arc<dyn RateLimitStore>,
        config: DiscoveryConfig,
        mode: ServiceMode,
    ) -> Self {
        let mut fallback = FallbackManager::new(mode);
        fallback.register_operation(
            OPERATION,
            OperationConfig::new(config.query_timeout, config.cache_ttl, Vec::new()),
        );

        Self {
            client,
            rate_limit_store,
            config,
            fallback,
            event_listeners: EventListeners::new(),
        }
    }

    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: EventListener<DirectoryEvent> + 'static,
    {
        self.event_listeners.add(listener);
    }

    /// Queries the directory for candidates matching `criteria`. Never
    /// returns an error: a rate-limited, failed, or timed-out call degrades
    /// through the fallback chain down to an empty roster, so a directory
    /// outage never stalls the caller.
    pub async fn discover(&self, criteria: &QueryCriteria) -> DiscoveryResult {
        let key = format!("directory:{}", criteria.fingerprint());

        let decision = self
            .rate_limit_store
            .check(&key, self.config.rate_limit, self.config.rate_limit_window)
            .await;

        if !decision.allowed {
            #[cfg(feature = "tracing")]
            warn!(key, "executor directory query rate limited, falling back");

            self.event_listeners.emit(&DirectoryEvent::RateLimited {
                timestamp: Instant::now(),
            });

            return self.fallback_only(&key).await;
        }

        let client = Arc::clone(&self.client);
        let criteria_owned = criteria.clone();

        let outcome = self
            .fallback
            .execute(
                OPERATION,
                &key,
                || async move { client.query(&criteria_owned).await },
                None::<fn() -> Option<Vec<ExecutorSnapshot>>>,
                None::<fn() -> std::future::Ready<Result<Vec<ExecutorSnapshot>, String>>>,
                None::<fn() -> Vec<ExecutorSnapshot>>,
            )
            .await;

        let degraded = outcome.strategy_used != dispatch_fallback::FallbackStep::Primary;

        if !degraded {
            self.event_listeners.emit(&DirectoryEvent::Queried {
                candidate_count: outcome.data.len(),
                timestamp: Instant::now(),
            });
        } else {
            self.event_listeners.emit(&DirectoryEvent::FallbackServed {
                strategy: outcome.strategy_used.as_str(),
                timestamp: Instant::now(),
            });
        }

        DiscoveryResult {
            candidates: outcome.data,
            degraded,
        }
    }

    /// Reuses the fallback chain's cache/default steps without attempting
    /// the primary call, used when the rate limiter has already denied the
    /// request.
    async fn fallback_only(&self, key: &str) -> DiscoveryResult {
        let outcome = self
            .fallback
            .execute(
                OPERATION,
                key,
                || async { Err::<Vec<ExecutorSnapshot>, String>("rate_limited".to_string()) },
                None::<fn() -> Option<Vec<ExecutorSnapshot>>>,
                None::<fn() -> std::future::Ready<Result<Vec<ExecutorSnapshot>, String>>>,
                None::<fn() -> Vec<ExecutorSnapshot>>,
            )
            .await;

        self.event_listeners.emit(&DirectoryEvent::FallbackServed {
            strategy: outcome.strategy_used.as_str(),
            timestamp: Instant::now(),
        });

        DiscoveryResult {
            candidates: outcome.data,
            degraded: true,
        }
    }
}
