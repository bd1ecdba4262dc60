//! Events emitted by the credential store.

use dispatch_core::ResilienceEvent;
use std::time::Instant;

/// Observability event emitted at every credential store decision point.
#[derive(Debug, Clone)]
pub enum CredentialEvent {
    Validated {
        service_name: String,
        timestamp: Instant,
    },
    Denied {
        service_name: String,
        timestamp: Instant,
        reason: &'static str,
    },
    Revoked {
        service_name: String,
        timestamp: Instant,
        admin_id: String,
    },
    Restored {
        service_name: String,
        timestamp: Instant,
        admin_id: String,
    },
}

impl ResilienceEvent for CredentialEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CredentialEvent::Validated { .. } => "validated",
            CredentialEvent::Denied { .. } => "denied",
            CredentialEvent::Revoked { .. } => "revoked",
            CredentialEvent::Restored { .. } => "restored",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            CredentialEvent::Validated { timestamp, .. }
            | CredentialEvent::Denied { timestamp, .. }
            | CredentialEvent::Revoked { timestamp, .. }
            | CredentialEvent::Restored { timestamp, .. } => *timestamp,
        }
    }

    fn pattern_name(&self) -> &str {
        match self {
            CredentialEvent::Validated { service_name, .. }
            | CredentialEvent::Denied { service_name, .. }
            | CredentialEvent::Revoked { service_name, .. }
            | CredentialEvent::Restored { service_name, .. } => service_name,
        }
    }
}
