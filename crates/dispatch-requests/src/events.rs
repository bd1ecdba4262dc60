//! Domain events published by the allocator and the state machine.

use crate::model::RequestStatus;
use dispatch_core::ResilienceEvent;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum RequestEvent {
    Allocated {
        request_number: String,
        timestamp: Instant,
    },
    AllocationExhausted {
        date_key: String,
        timestamp: Instant,
    },
    StatusChanged {
        request_number: String,
        timestamp: Instant,
        from: RequestStatus,
        to: RequestStatus,
    },
    StaleTransitionRejected {
        request_number: String,
        timestamp: Instant,
    },
}

impl ResilienceEvent for RequestEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RequestEvent::Allocated { .. } => "allocated",
            RequestEvent::AllocationExhausted { .. } => "allocation_exhausted",
            RequestEvent::StatusChanged { .. } => "status_changed",
            RequestEvent::StaleTransitionRejected { .. } => "stale_transition_rejected",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            RequestEvent::Allocated { timestamp, .. }
            | RequestEvent::AllocationExhausted { timestamp, .. }
            | RequestEvent::StatusChanged { timestamp, .. }
            | RequestEvent::StaleTransitionRejected { timestamp, .. } => *timestamp,
        }
    }

    fn pattern_name(&self) -> &str {
        match self {
            RequestEvent::Allocated { request_number, .. }
            | RequestEvent::StatusChanged { request_number, .. }
            | RequestEvent::StaleTransitionRejected { request_number, .. } => request_number,
            RequestEvent::AllocationExhausted { date_key, .. } => date_key,
        }
    }
}
