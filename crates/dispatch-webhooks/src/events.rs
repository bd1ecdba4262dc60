//! Events emitted at every stage of inbound webhook processing.

use dispatch_core::ResilienceEvent;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum WebhookIngestEvent {
    Received {
        source: String,
        event_type: String,
        timestamp: Instant,
    },
    DuplicateReplay {
        source: String,
        external_event_id: String,
        timestamp: Instant,
    },
    SignatureRejected {
        source: String,
        timestamp: Instant,
    },
    Completed {
        source: String,
        timestamp: Instant,
    },
    RetryScheduled {
        source: String,
        retry_count: u32,
        timestamp: Instant,
    },
    RetriesExhausted {
        source: String,
        timestamp: Instant,
    },
}

impl ResilienceEvent for WebhookIngestEvent {
    fn event_type(&self) -> &'static str {
        match self {
            WebhookIngestEvent::Received { .. } => "received",
            WebhookIngestEvent::DuplicateReplay { .. } => "duplicate_replay",
            WebhookIngestEvent::SignatureRejected { .. } => "signature_rejected",
            WebhookIngestEvent::Completed { .. } => "completed",
            WebhookIngestEvent::RetryScheduled { .. } => "retry_scheduled",
            WebhookIngestEvent::RetriesExhausted { .. } => "retries_exhausted",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            WebhookIngestEvent::Received { timestamp, .. }
            | WebhookIngestEvent::DuplicateReplay { timestamp, .. }
            | WebhookIngestEvent::SignatureRejected { timestamp, .. }
            | WebhookIngestEvent::Completed { timestamp, .. }
            | WebhookIngestEvent::RetryScheduled { timestamp, .. }
            | WebhookIngestEvent::RetriesExhausted { timestamp, .. } => *timestamp,
        }
    }

    fn pattern_name(&self) -> &str {
        match self {
            WebhookIngestEvent::Received { source, .. }
            | WebhookIngestEvent::DuplicateReplay { source, .. }
            | WebhookIngestEvent::SignatureRejected { source, .. }
            | WebhookIngestEvent::Completed { source, .. }
            | WebhookIngestEvent::RetryScheduled { source, .. }
            | WebhookIngestEvent::RetriesExhausted { source, .. } => source,
        }
    }
}
