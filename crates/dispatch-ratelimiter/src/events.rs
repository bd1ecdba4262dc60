//! Events emitted by the rate limiter.

use dispatch_core::ResilienceEvent;
use std::time::{Duration, Instant};

/// Observability event emitted at every rate limit decision point.
#[derive(Debug, Clone)]
pub enum RateLimiterEvent {
    PermitAcquired {
        pattern_name: String,
        timestamp: Instant,
        current_count: u64,
        limit: u64,
    },
    PermitRejected {
        pattern_name: String,
        timestamp: Instant,
        current_count: u64,
        limit: u64,
        retry_after: Duration,
    },
}

impl ResilienceEvent for RateLimiterEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RateLimiterEvent::PermitAcquired { .. } => "permit_acquired",
            RateLimiterEvent::PermitRejected { .. } => "permit_rejected",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            RateLimiterEvent::PermitAcquired { timestamp, .. }
            | RateLimiterEvent::PermitRejected { timestamp, .. } => *timestamp,
        }
    }

    fn pattern_name(&self) -> &str {
        match self {
            RateLimiterEvent::PermitAcquired { pattern_name, .. }
            | RateLimiterEvent::PermitRejected { pattern_name, .. } => pattern_name,
        }
    }
}
