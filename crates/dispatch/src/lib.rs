//! Cross-service reliability and dispatch substrate for a property-management
//! assistant.
//!
//! `dispatch` collects twelve components behind feature flags: request-rate
//! protection, failure isolation, credential trust, graceful degradation,
//! executor discovery and ranking, geo and batch optimization, dispatching,
//! and inbound webhook ingestion. Each component is also published as its
//! own crate; this one is a thin re-exporting front door plus a set of
//! prose guides on how the pieces compose.
//!
//! # Quick Start
//!
//! ```toml
//! [dependencies]
//! dispatch = { version = "0.8", features = ["circuitbreaker", "fallback"] }
//! ```
//!
//! # Components
//!
//! - **[Rate Limiter](ratelimiter)** — fixed/sliding-window request throttling, in-memory or Redis-backed
//! - **[Circuit Breaker](circuitbreaker)** — stops calling a failing downstream dependency
//! - **[Credential Store](credentials)** — HMAC-verified service-to-service trust
//! - **[Fallback Manager](fallback)** — cache → alternative → simplified → default recovery chain
//! - **Service-Mode Controller** — `dispatch_core::mode::ServiceMode`, scales timeouts and disables
//!   expensive features under degradation
//! - **[Requests](requests)** — request data model, `YYMMDD-NNN` allocator, and the request state machine
//! - **[Executor Discovery](directory)** — directory queries ranked by specialization, efficiency, workload and availability
//! - **[Geo Optimizer](geo)** — Haversine distance, travel time and nearest-neighbor routing
//! - **[Batch Optimizer](optimizer)** — greedy, simulated-annealing, genetic and hybrid batch assignment
//! - **[Dispatcher](dispatcher)** — orchestrates discovery, optimization and ML-assisted ranking
//! - **[Webhook Ingestor](webhooks)** — signature verification, idempotent replay, retry scheduling
//!
//! See [`composition`] for how these compose into the inbound and outbound
//! pipelines, [`patterns`] for a per-component usage guide, and
//! [`observability`] for metrics and tracing conventions.

pub mod composition;
pub mod observability;
pub mod patterns;
pub mod tower_primer;
pub mod use_cases;

// Core is always available.
pub use dispatch_core as core;

#[cfg(feature = "ratelimiter")]
pub use dispatch_ratelimiter as ratelimiter;

#[cfg(feature = "circuitbreaker")]
pub use dispatch_circuitbreaker as circuitbreaker;

#[cfg(feature = "credentials")]
pub use dispatch_credentials as credentials;

#[cfg(feature = "cache")]
pub use dispatch_cache as cache;

#[cfg(feature = "fallback")]
pub use dispatch_fallback as fallback;

#[cfg(feature = "requests")]
pub use dispatch_requests as requests;

#[cfg(feature = "geo")]
pub use dispatch_geo as geo;

#[cfg(feature = "directory")]
pub use dispatch_directory as directory;

#[cfg(feature = "optimizer")]
pub use dispatch_optimizer as optimizer;

#[cfg(feature = "dispatcher")]
pub use dispatch_dispatcher as dispatcher;

#[cfg(feature = "webhooks")]
pub use dispatch_webhooks as webhooks;
