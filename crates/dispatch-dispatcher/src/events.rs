//! Events emitted by the dispatcher.

use dispatch_core::ResilienceEvent;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum DispatcherEvent {
    Assigned {
        request_id: String,
        executor_id: String,
        score: f64,
        degraded: bool,
        timestamp: Instant,
    },
    Suggested {
        request_id: String,
        reason: String,
        candidate_count: usize,
        timestamp: Instant,
    },
    BatchDispatched {
        algorithm: &'static str,
        assigned_count: usize,
        timestamp: Instant,
    },
}

impl ResilienceEvent for DispatcherEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DispatcherEvent::Assigned { .. } => "assigned",
            DispatcherEvent::Suggested { .. } => "suggested",
            DispatcherEvent::BatchDispatched { .. } => "batch_dispatched",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            DispatcherEvent::Assigned { timestamp, .. } => *timestamp,
            DispatcherEvent::Suggested { timestamp, .. } => *timestamp,
            DispatcherEvent::BatchDispatched { timestamp, .. } => *timestamp,
        }
    }

    fn pattern_name(&self) -> &str {
        "dispatcher"
    }
}
