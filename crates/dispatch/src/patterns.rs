//! # Pattern Guides
//!
//! Detailed guides for each component: when to use it, trade-offs, and a
//! minimal example.

/// Rate limiter guide
pub mod rate_limiter {
    //! # Rate Limiter
    //!
    //! Throttles inbound requests against a fixed or sliding window, backed
    //! by an in-memory store or Redis for multi-node deployments.
    //!
    //! ## When to Use
    //!
    //! - Protecting the executor directory from abusive polling
    //! - Per-tenant quota enforcement across multiple dispatcher nodes
    //!
    //! ## Trade-offs
    //!
    //! - In-memory counters do not coordinate across nodes; use the Redis
    //!   store once more than one process enforces the same limit.
    //! - A stricter limit reduces load but increases `RateLimited` rejections
    //!   surfaced to callers.
    //!
    //! ## Example
    //!
    //! ```rust,no_run
    //! # #[cfg(feature = "ratelimiter")]
    //! # {
    //! use dispatch_ratelimiter::RateLimiterLayer;
    //! use std::time::Duration;
    //!
    //! let layer = RateLimiterLayer::builder()
    //!     .limit(100)
    //!     .window(Duration::from_secs(60))
    //!     .build();
    //! # }
    //! ```
}

/// Circuit breaker guide
pub mod circuit_breaker {
    //! # Circuit Breaker
    //!
    //! Stops calling a failing downstream dependency once its failure rate
    //! crosses a threshold, giving it time to recover.
    //!
    //! ## When to Use
    //!
    //! - Calls to the executor directory or other microservices that can
    //!   degrade independently of the dispatcher
    //!
    //! ## Trade-offs
    //!
    //! - Fails fast once open; pair with a fallback so callers still get a
    //!   usable (if degraded) result.
    //! - Needs a minimum call count before the failure rate is meaningful.
    //!
    //! ## Example
    //!
    //! ```rust,no_run
    //! # #[cfg(feature = "circuitbreaker")]
    //! # {
    //! use dispatch_circuitbreaker::CircuitBreakerLayer;
    //! use std::time::Duration;
    //!
    //! let layer = CircuitBreakerLayer::<(), std::io::Error>::builder()
    //!     .failure_rate_threshold(0.5)
    //!     .sliding_window_size(100)
    //!     .wait_duration_in_open(Duration::from_secs(30))
    //!     .build();
    //! # }
    //! ```
}

/// Credential store guide
pub mod credential_store {
    //! # Credential Store
    //!
    //! Central, revocable HMAC-verified trust between services. Replaces
    //! self-minted bearer tokens with a static-key check; the same
    //! constant-time HMAC primitive also verifies inbound webhook
    //! signatures.
    //!
    //! ## When to Use
    //!
    //! - Any service-to-service call inside the dispatch substrate
    //! - Verifying inbound webhook signatures without a separate crate
    //!
    //! ## Example
    //!
    //! ```rust,no_run
    //! # #[cfg(feature = "credentials")]
    //! # {
    //! use dispatch_credentials::CredentialStore;
    //! use std::collections::HashSet;
    //!
    //! let store = CredentialStore::new(b"master-secret".to_vec());
    //! let key = store.provision("geo-service", HashSet::from(["read_routes".to_string()])).unwrap();
    //! # }
    //! ```
}

/// Fallback manager guide
pub mod fallback_manager {
    //! # Fallback Manager
    //!
    //! Walks an ordered recovery chain when a primary operation fails:
    //! cached result, caller-supplied callback, alternative service,
    //! simplified algorithm, then a fixed default — unlike the single-step
    //! [`dispatch_fallback::Fallback`] Tower middleware this crate also
    //! provides.
    //!
    //! ## When to Use
    //!
    //! - Wrapping an ML predictor call so a degraded model still produces a
    //!   usable rule-based estimate
    //! - Serving a cached executor roster when the directory is unreachable
    //!
    //! ## Trade-offs
    //!
    //! - Every step past `Primary` marks the result `degraded`; callers that
    //!   ignore this flag silently accept stale or approximate data.
    //!
    //! ## Example
    //!
    //! ```rust,no_run
    //! # #[cfg(feature = "fallback")]
    //! # {
    //! use dispatch_fallback::{FallbackManager, OperationConfig};
    //! use dispatch_core::mode::ServiceMode;
    //! use std::time::Duration;
    //!
    //! # async fn example() {
    //! let mut manager = FallbackManager::<String>::new(ServiceMode::Full);
    //! manager.register_operation(
    //!     "predict",
    //!     OperationConfig::new(Duration::from_millis(500), Duration::from_secs(30), "fallback".to_string()),
    //! );
    //! # }
    //! # }
    //! ```
}

/// Service-mode controller guide
pub mod service_mode {
    //! # Service-Mode Controller
    //!
    //! A process-wide degradation ladder (`Full` → `Degraded` → `Minimal` →
    //! `Emergency`) that scales timeouts, iteration counts and disables
    //! expensive features (ML prediction, heavy batch optimizers) as the
    //! system comes under stress.
    //!
    //! ## When to Use
    //!
    //! - Anywhere a component needs to shed expensive work without a code
    //!   change: the optimizer halves its iteration budget, the dispatcher
    //!   stops calling the ML predictor, under `Minimal`/`Emergency`.
    //!
    //! ## Example
    //!
    //! ```rust,no_run
    //! use dispatch_core::mode::ServiceMode;
    //!
    //! let mode = ServiceMode::Degraded;
    //! assert!(!mode.allows_ml_prediction());
    //! ```
}

/// Requests guide
pub mod requests {
    //! # Request Data Model, Allocator and State Machine
    //!
    //! The shared `Request` model, an atomic `YYMMDD-NNN` number allocator,
    //! and the legal state-transition table for a request's lifecycle.
    //!
    //! ## When to Use
    //!
    //! - Issuing externally-visible request numbers from any process without
    //!   collisions, in-memory for tests or Redis for production
    //! - Guarding against stale-state writes with optimistic concurrency
    //!
    //! ## Example
    //!
    //! ```rust,no_run
    //! # #[cfg(feature = "requests")]
    //! # {
    //! use dispatch_requests::{InMemoryAllocatorStore, RequestNumberAllocator};
    //! use chrono::FixedOffset;
    //! use std::sync::Arc;
    //!
    //! # async fn example() {
    //! let allocator = RequestNumberAllocator::new(
    //!     Arc::new(InMemoryAllocatorStore::new()),
    //!     FixedOffset::east_opt(0).unwrap(),
    //! );
    //! # }
    //! # }
    //! ```
}

/// Executor discovery guide
pub mod executor_discovery {
    //! # Executor Discovery
    //!
    //! Queries the directory for candidate executors matching a set of
    //! criteria, then scores them by specialization match, efficiency,
    //! workload headroom and availability. Directory queries are
    //! rate-limited and fallback-wrapped so a directory outage degrades to
    //! a cached roster rather than failing the whole discovery call.
    //!
    //! ## When to Use
    //!
    //! - Every dispatch decision starts here: narrowing the full executor
    //!   roster down to ranked candidates for a specific request
    //!
    //! ## Example
    //!
    //! ```rust,no_run
    //! # #[cfg(feature = "directory")]
    //! # {
    //! use dispatch_directory::{DiscoveryConfig, ExecutorDiscovery, InMemoryDirectoryClient};
    //! use dispatch_ratelimiter::InMemoryRateLimitStore;
    //! use dispatch_core::mode::ServiceMode;
    //! use std::sync::Arc;
    //!
    //! let discovery = ExecutorDiscovery::new(
    //!     Arc::new(InMemoryDirectoryClient::new(vec![])),
    //!     Arc::new(InMemoryRateLimitStore::default()),
    //!     DiscoveryConfig::default(),
    //!     ServiceMode::Full,
    //! );
    //! # }
    //! ```
}

/// Geo optimizer guide
pub mod geo_optimizer {
    //! # Geo Optimizer
    //!
    //! Haversine distance and travel-time estimates, nearest-neighbor route
    //! sequencing, and geographic clustering — the distance model every
    //! batch optimizer scores assignments against.
    //!
    //! ## When to Use
    //!
    //! - Ranking executors by travel time, not just straight-line distance
    //! - Sequencing a multi-stop route for a single executor's batch
    //!
    //! ## Example
    //!
    //! ```rust,no_run
    //! # #[cfg(feature = "geo")]
    //! # {
    //! use dispatch_geo::{GeoConfig, GeoOptimizer};
    //!
    //! let optimizer = GeoOptimizer::new(GeoConfig::builder().build());
    //! # }
    //! ```
}

/// Batch optimizer guide
pub mod batch_optimizer {
    //! # Batch Optimizer
    //!
    //! Assigns a batch of requests to executors under capacity and distance
    //! constraints using greedy, simulated-annealing, genetic or hybrid
    //! search, all deterministic given a seed and cooperatively cancellable
    //! mid-run.
    //!
    //! ## When to Use
    //!
    //! - Nightly or on-demand batch reassignment runs across many open
    //!   requests at once, rather than one-at-a-time dispatch
    //!
    //! ## Trade-offs
    //!
    //! - Greedy is fastest but can land in a worse local optimum than
    //!   simulated annealing or genetic search; hybrid spends a greedy pass
    //!   as its starting point for the slower search.
    //! - Service-mode degradation scales down iteration budgets rather than
    //!   switching algorithms outright.
}

/// Dispatcher guide
pub mod dispatcher {
    //! # Dispatcher
    //!
    //! Orchestrates discovery, optional ML-assisted ranking and batch
    //! optimization behind one of four modes: `Manual` (always suggests),
    //! `AiAssisted` (ranked suggestions), `AutoAssign` (writes the
    //! assignment once a candidate clears a confidence threshold) and
    //! `BatchOptimize` (defers single-request calls to the batch run).
    //!
    //! ## When to Use
    //!
    //! - The single entry point application code calls instead of composing
    //!   discovery, scoring and optimization by hand
}

/// Webhook ingestor guide
pub mod webhook_ingestor {
    //! # Webhook Ingestor
    //!
    //! Verifies inbound webhook signatures, replays idempotent redeliveries
    //! from a `(source, external_event_id)` cache, persists a sanitized
    //! record of every delivery and schedules `2^retry_count`-minute backoff
    //! retries on handler failure. Authentication failures are never
    //! retried.
    //!
    //! ## When to Use
    //!
    //! - Any inbound integration (payments, scheduling providers) that
    //!   delivers events at-least-once and needs at-most-once processing
}
