//! Observability guide for the dispatch substrate.
//!
//! This module documents metrics, tracing and the event-listener system
//! shared by every component.

/// Metrics documentation
pub mod metrics {
    //! # Metrics Guide
    //!
    //! Every component supports optional Prometheus-compatible metrics via
    //! its `metrics` feature.
    //!
    //! ## Enabling Metrics
    //!
    //! ```toml
    //! [dependencies]
    //! dispatch = { version = "0.8", features = ["circuitbreaker", "ratelimiter"] }
    //! metrics = "0.24"
    //! metrics-exporter-prometheus = "0.16"
    //! ```
    //!
    //! ## Instance Naming
    //!
    //! Name each instance to distinguish metrics when more than one of the
    //! same component is in use (e.g. one circuit breaker per downstream
    //! dependency):
    //!
    //! ```text
    //! circuitbreaker_calls_total{circuitbreaker="executor-directory",outcome="success"} 150
    //! circuitbreaker_calls_total{circuitbreaker="payment-gateway",outcome="success"} 89
    //! ```
    //!
    //! ## Available Metrics by Component
    //!
    //! ### Circuit Breaker
    //!
    //! - `circuitbreaker_calls_total{circuitbreaker, outcome}` - success/failure/rejected
    //! - `circuitbreaker_transitions_total{circuitbreaker, from, to}` - state transitions
    //! - `circuitbreaker_state{circuitbreaker, state}` - current state gauge
    //!
    //! ### Rate Limiter
    //!
    //! - `ratelimiter_calls_total{ratelimiter, result}` - permitted/rejected
    //! - `ratelimiter_wait_duration_seconds{ratelimiter}` - permit wait time histogram
    //!
    //! ### Cache
    //!
    //! - `cache_requests_total{cache, result}` - hit/miss
    //! - `cache_evictions_total{cache}` - evictions
    //! - `cache_size{cache}` - current size gauge
    //!
    //! ### Fallback Manager
    //!
    //! - `fallback_invocations_total{operation, strategy}` - which step of the
    //!   chain ultimately produced a result
    //!
    //! ### Requests
    //!
    //! - `allocator_issued_total{date_key}` - numbers issued per day
    //! - `state_machine_transitions_total{from, to}` - legal transitions taken
    //! - `state_machine_stale_writes_total` - optimistic concurrency conflicts
    //!
    //! ### Executor Discovery / Dispatcher
    //!
    //! - `discovery_queries_total{result}` - candidates found / degraded / empty
    //! - `dispatcher_assignments_total{mode}` - assignments written, by dispatch mode
    //!
    //! ### Webhook Ingestor
    //!
    //! - `webhook_events_total{source, status}` - completed/failed/retrying
    //! - `webhook_duplicate_replays_total{source}` - idempotent redeliveries
    //!
    //! ## Example Prometheus Queries
    //!
    //! ```promql
    //! # Circuit breaker failure rate
    //! rate(circuitbreaker_calls_total{outcome="failure"}[5m])
    //!   / rate(circuitbreaker_calls_total[5m]) * 100
    //!
    //! # Fallback degradation rate
    //! rate(fallback_invocations_total{strategy!="primary"}[5m])
    //!   / rate(fallback_invocations_total[5m]) * 100
    //!
    //! # Webhook retry exhaustion
    //! rate(webhook_events_total{status="failed"}[5m])
    //! ```
    //!
    //! ## Alert Examples
    //!
    //! ```yaml
    //! - alert: CircuitBreakerOpen
    //!   expr: circuitbreaker_state{state="Open"} == 1
    //!   for: 1m
    //!
    //! - alert: WebhookRetriesExhausted
    //!   expr: increase(webhook_events_total{status="failed"}[10m]) > 0
    //!   for: 1m
    //! ```
}

/// Tracing documentation
pub mod tracing_guide {
    //! # Tracing Guide
    //!
    //! Enable structured logging with each component's `tracing` feature:
    //!
    //! ```toml
    //! [dependencies]
    //! dispatch = { version = "0.8", features = ["circuitbreaker", "tracing"] }
    //! tracing-subscriber = "0.3"
    //! ```
    //!
    //! Each component logs at its key decision points:
    //!
    //! ```text
    //! DEBUG circuitbreaker: Call succeeded within timeout duration_ms=45 circuitbreaker="executor-directory"
    //! WARN  circuitbreaker: Circuit opened from=Closed to=Open circuitbreaker="executor-directory"
    //! INFO  fallback: Primary failed, serving cached roster operation="discover_executors"
    //! WARN  webhooks: Webhook signature verification failed source="stripe"
    //! INFO  dispatcher: Assignment written request_id="R-2026-001" executor_id="e-42"
    //! ```
}

/// Event system documentation
pub mod events {
    //! # Event System Guide
    //!
    //! Every component exposes an `EventListener` hook
    //! (`dispatch_core::events::EventListener`) for custom observability —
    //! the same pattern used across the whole substrate:
    //!
    //! ```rust,ignore
    //! use dispatch_core::events::FnListener;
    //!
    //! let mut dispatcher = /* ... */;
    //! dispatcher.add_listener(FnListener::new(|event| {
    //!     println!("{}: {}", event.pattern_name(), event.event_type());
    //! }));
    //! ```
    //!
    //! See each component's `events` module for its specific event enum
    //! (`CircuitBreakerEvent`, `DispatcherEvent`, `WebhookIngestEvent`, …).
}
