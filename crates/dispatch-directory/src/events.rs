//! Events emitted by executor discovery.

use dispatch_core::ResilienceEvent;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum DirectoryEvent {
    /// The outbound directory query succeeded.
    Queried {
        candidate_count: usize,
        timestamp: Instant,
    },
    /// The local rate limiter rejected the outbound call before it was made.
    RateLimited { timestamp: Instant },
    /// The primary query failed or timed out and a fallback strategy
    /// produced the result instead.
    FallbackServed {
        strategy: &'static str,
        timestamp: Instant,
    },
}

impl ResilienceEvent for DirectoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DirectoryEvent::Queried { .. } => "queried",
            DirectoryEvent::RateLimited { .. } => "rate_limited",
            DirectoryEvent::FallbackServed { .. } => "fallback_served",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            DirectoryEvent::Queried { timestamp, .. } => *timestamp,
            DirectoryEvent::RateLimited { timestamp } => *timestamp,
            DirectoryEvent::FallbackServed { timestamp, .. } => *timestamp,
        }
    }

    fn pattern_name(&self) -> &str {
        "executor_discovery"
    }
}
