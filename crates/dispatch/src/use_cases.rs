//! # Use Cases
//!
//! Real-world scenarios for applying the dispatch substrate in a
//! property-management assistant.

/// Inbound integration use cases
pub mod webhook_integrations {
    //! # Webhook Integrations
    //!
    //! ```text
    //! Payment Provider (e.g. Stripe)
    //! ├─ Idempotency keyed on the provider's event id
    //! ├─ HMAC signature verification against a per-source secret
    //! ├─ Handler updates request/invoice state
    //! └─ Failure retries with 2^retry_count-minute backoff, capped at max_retries
    //!
    //! Scheduling Provider (e.g. Google Sheets import)
    //! ├─ Different event-id field per source (`eventId` rather than `id`)
    //! ├─ Same signature verification and retry scheduling
    //! └─ Sanitized headers persisted for audit without leaking the shared secret
    //! ```
}

/// Executor directory use cases
pub mod directory_integration {
    //! # Executor Directory
    //!
    //! ```text
    //! Normal Operation
    //! ├─ Rate-limited directory queries
    //! ├─ Candidates scored by specialization, efficiency, workload, availability
    //! └─ Top-K ranked list returned to the dispatcher
    //!
    //! Directory Outage
    //! ├─ Circuit breaker trips after the failure threshold
    //! ├─ Fallback manager serves the last cached roster, marked degraded
    //! └─ Service mode may drop to Degraded, disabling ML-assisted ranking
    //! ```
}

/// Dispatch and batch-assignment use cases
pub mod dispatch_operations {
    //! # Dispatch Operations
    //!
    //! ```text
    //! Single Urgent Request
    //! ├─ AutoAssign mode
    //! ├─ Rule-based score blended with an ML predictor (fallback-wrapped)
    //! └─ Assignment written immediately if confidence clears the threshold
    //!
    //! Nightly Batch Run
    //! ├─ BatchOptimize mode, hundreds of open requests at once
    //! ├─ Geo optimizer computes a distance/travel-time matrix
    //! ├─ Batch optimizer searches (greedy / simulated annealing / genetic / hybrid)
    //! └─ Degraded service mode scales down iteration budgets rather than switching algorithms
    //!
    //! Operator Review
    //! ├─ Manual or AiAssisted mode
    //! └─ Every candidate surfaced as a suggestion, nothing auto-assigned
    //! ```
}

/// Service-mode degradation use cases
pub mod degradation {
    //! # Service-Mode Degradation
    //!
    //! ```text
    //! Full
    //! ├─ ML-assisted ranking enabled
    //! └─ Full iteration budgets for batch optimizers
    //!
    //! Degraded
    //! ├─ ML prediction disabled, rule-based scoring only
    //! └─ Scaled-down timeouts and iteration counts
    //!
    //! Minimal / Emergency
    //! ├─ Heavy optimizers (simulated annealing, genetic, hybrid) disabled
    //! └─ Greedy assignment only, shortest safe timeouts
    //! ```
}
