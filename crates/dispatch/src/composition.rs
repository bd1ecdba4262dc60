//! # Composition Guide
//!
//! How the dispatch components are meant to be wired together end to end.

/// Common composition patterns
pub mod patterns {
    //! # Composition Patterns
    //!
    //! ## Inbound Webhook Ingestion
    //!
    //! ```text
    //! ┌─────────────┐
    //! │   Delivery  │
    //! └──────┬──────┘
    //!        │
    //!        ▼
    //! ┌───────────────────┐
    //! │ Idempotency Lookup │ ← replay a cached response on redelivery
    //! └─────────┬──────────┘
    //!           │ (miss)
    //!           ▼
    //! ┌───────────────────┐
    //! │ Signature Verify   │ ← HMAC via the credential store's primitive
    //! └─────────┬──────────┘
    //!           │ (valid)
    //!           ▼
    //! ┌───────────────────┐
    //! │   Event Handler    │ ← failure schedules 2^retry_count-minute backoff
    //! └─────────────────────┘
    //! ```
    //!
    //! ## Executor Discovery → Dispatch
    //!
    //! A single dispatch request walks discovery, scoring and (optionally)
    //! ML-assisted ranking before a candidate is either assigned or surfaced
    //! as a suggestion:
    //!
    //! ```text
    //! ┌─────────────┐
    //! │   Request   │
    //! └──────┬──────┘
    //!        │
    //!        ▼
    //! ┌─────────────────┐
    //! │ Executor         │ ← rate-limited directory query, fallback-wrapped
    //! │ Discovery        │
    //! └────────┬─────────┘
    //!          │
    //!          ▼
    //! ┌─────────────────┐
    //! │ Candidate Score  │ ← specialization, efficiency, workload, availability
    //! └────────┬─────────┘
    //!          │
    //!          ▼
    //! ┌─────────────────┐
    //! │ ML Blend         │ ← rule-based score blended with a predictor,
    //! │ (optional)        │   itself wrapped in a fallback chain
    //! └────────┬─────────┘
    //!          │
    //!          ▼
    //! ┌─────────────────┐
    //! │   Dispatcher     │ ← manual / ai-assisted / auto-assign / batch
    //! └─────────────────┘
    //! ```
    //!
    //! ## Batch Assignment Run
    //!
    //! ```text
    //! ┌─────────────┐
    //! │  Requests + │
    //! │  Executors  │
    //! └──────┬──────┘
    //!        │
    //!        ▼
    //! ┌─────────────────┐
    //! │  Geo Optimizer   │ ← distance/travel-time matrix, clustering
    //! └────────┬─────────┘
    //!          │
    //!          ▼
    //! ┌─────────────────┐
    //! │ Batch Optimizer  │ ← greedy / simulated annealing / genetic / hybrid,
    //! │                  │   scaled down under degraded service modes
    //! └────────┬─────────┘
    //!          │
    //!          ▼
    //! ┌─────────────────┐
    //! │   Assignments    │
    //! └─────────────────┘
    //! ```
    //!
    //! ## Outbound Directory Calls
    //!
    //! Protect calls to the executor directory service itself:
    //!
    //! ```text
    //! ┌─────────────┐
    //! │   Request   │
    //! └──────┬──────┘
    //!        │
    //!        ▼
    //! ┌─────────────────┐
    //! │ Circuit Breaker │ ← fail fast when the directory is down
    //! └────────┬────────┘
    //!          │
    //!          ▼
    //! ┌─────────────────┐
    //! │ Fallback Manager │ ← cached roster, then a default empty result
    //! └─────────────────┘
    //! ```
}
