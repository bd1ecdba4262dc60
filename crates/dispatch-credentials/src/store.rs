//! The credential store itself: provisioning, constant-time validation,
//! revocation/restoration, status summaries and the audit log.

use crate::error::CredentialError;
use crate::events::CredentialEvent;
use crate::hmac_primitive::{compute_hmac_hex, verify_hmac_hex};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use dispatch_core::events::EventListeners;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing::{info, warn};

/// A service's credential record.
#[derive(Debug, Clone)]
pub struct ServiceCredential {
    pub service_name: String,
    pub permissions: HashSet<String>,
    pub revoked: bool,
    pub revocation_reason: Option<String>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    verifier: String,
}

/// Per-service summary returned by [`CredentialStore::status`].
#[derive(Debug, Clone)]
pub struct CredentialStatus {
    pub service_name: String,
    pub revoked: bool,
    pub permission_count: usize,
    pub last_used_at: Option<DateTime<Utc>>,
}

/// What happened, for the audit log.
#[derive(Debug, Clone)]
pub enum AuditEventKind {
    ValidationSucceeded,
    ValidationFailed { reason: String },
    Revoked { reason: String, admin_id: String },
    Restored { admin_id: String },
}

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub service_name: String,
    pub event: AuditEventKind,
    pub timestamp: DateTime<Utc>,
}

struct Inner {
    credentials: HashMap<String, ServiceCredential>,
    audit_log: Vec<AuditEntry>,
}

/// Central, revocable, HMAC-verified credential store.
///
/// Models revocation propagation as a single `RwLock`-guarded map: every reader in
/// this process observes a revocation the instant the writer commits it.
/// A multi-process deployment would back this with the same kind of shared
/// store [`dispatch_ratelimiter::RateLimitStore`] uses for rate limit
/// counters; that wiring is a deployment choice outside this crate.
pub struct CredentialStore {
    master_secret: Vec<u8>,
    inner: RwLock<Inner>,
    event_listeners: EventListeners<CredentialEvent>,
}

impl CredentialStore {
    pub fn new(master_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            master_secret: master_secret.into(),
            inner: RwLock::new(Inner {
                credentials: HashMap::new(),
                audit_log: Vec::new(),
            }),
            event_listeners: EventListeners::new(),
        }
    }

    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: dispatch_core::events::EventListener<CredentialEvent> + 'static,
    {
        self.event_listeners.add(listener);
    }

    fn verifier_for(&self, service_name: &str) -> String {
        compute_hmac_hex(&self.master_secret, service_name.as_bytes())
    }

    /// Provisions a new credential, returning the static key the service
    /// must present on every subsequent call. There is no separate
    /// self-issuance flow: this is the only way a key comes into being.
    pub fn provision(
        &self,
        service_name: impl Into<String>,
        permissions: HashSet<String>,
    ) -> Result<String, CredentialError> {
        let service_name = service_name.into();
        if service_name.is_empty() {
            return Err(CredentialError::EmptyServiceName);
        }

        let verifier = self.verifier_for(&service_name);
        let now = Utc::now();
        let credential = ServiceCredential {
            service_name: service_name.clone(),
            permissions,
            revoked: false,
            revocation_reason: None,
            last_used_at: None,
            created_at: now,
            updated_at: now,
            verifier: verifier.clone(),
        };

        let mut inner = self.inner.write().unwrap();
        inner.credentials.insert(service_name, credential);
        Ok(verifier)
    }

    /// Self-issuance of bearer tokens is disabled; the endpoint that used to
    /// mint them now always returns `410 Gone` at the HTTP layer, modeled
    /// here as an error a handler can map directly to that status.
    pub fn self_issue_token(&self) -> Result<String, CredentialError> {
        Err(CredentialError::SelfIssuanceDisabled)
    }

    /// Validates a presented key for `service_name`, optionally requiring a
    /// permission. Updates `last_used_at` and records an audit entry on
    /// every call, success or failure.
    pub fn validate(
        &self,
        service_name: &str,
        presented_key: &str,
        required_permission: Option<&str>,
    ) -> Result<ServiceCredential, CredentialError> {
        if service_name.is_empty() {
            return Err(CredentialError::EmptyServiceName);
        }

        let mut inner = self.inner.write().unwrap();
        let now = Utc::now();

        let credential = match inner.credentials.get(service_name) {
            Some(c) => c.clone(),
            None => {
                inner.audit_log.push(AuditEntry {
                    service_name: service_name.to_string(),
                    event: AuditEventKind::ValidationFailed {
                        reason: "unknown_service".to_string(),
                    },
                    timestamp: now,
                });
                self.deny(service_name, "unknown_service");
                return Err(CredentialError::UnknownService {
                    service_name: service_name.to_string(),
                });
            }
        };

        if credential.revoked {
            inner.audit_log.push(AuditEntry {
                service_name: service_name.to_string(),
                event: AuditEventKind::ValidationFailed {
                    reason: "revoked".to_string(),
                },
                timestamp: now,
            });
            self.deny(service_name, "service_authentication_required");
            return Err(CredentialError::Revoked {
                service_name: service_name.to_string(),
                reason: credential
                    .revocation_reason
                    .clone()
                    .unwrap_or_else(|| "revoked".to_string()),
            });
        }

        if !verify_hmac_hex(&self.master_secret, service_name.as_bytes(), presented_key) {
            inner.audit_log.push(AuditEntry {
                service_name: service_name.to_string(),
                event: AuditEventKind::ValidationFailed {
                    reason: "invalid_key".to_string(),
                },
                timestamp: now,
            });
            self.deny(service_name, "invalid_token");
            return Err(CredentialError::InvalidKey {
                service_name: service_name.to_string(),
            });
        }

        if let Some(permission) = required_permission {
            if !credential.permissions.contains(permission) {
                inner.audit_log.push(AuditEntry {
                    service_name: service_name.to_string(),
                    event: AuditEventKind::ValidationFailed {
                        reason: format!("missing_permission:{permission}"),
                    },
                    timestamp: now,
                });
                self.deny(service_name, "insufficient_permissions");
                return Err(CredentialError::InsufficientPermission {
                    service_name: service_name.to_string(),
                    permission: permission.to_string(),
                });
            }
        }

        inner.audit_log.push(AuditEntry {
            service_name: service_name.to_string(),
            event: AuditEventKind::ValidationSucceeded,
            timestamp: now,
        });

        if let Some(stored) = inner.credentials.get_mut(service_name) {
            stored.last_used_at = Some(now);
        }

        #[cfg(feature = "metrics")]
        metrics::counter!("dispatch_credentials_validations_total", "service" => service_name.to_string()).increment(1);

        self.event_listeners.emit(&CredentialEvent::Validated {
            service_name: service_name.to_string(),
            timestamp: Instant::now(),
        });

        Ok(credential)
    }

    fn deny(&self, service_name: &str, reason: &'static str) {
        #[cfg(feature = "tracing")]
        warn!(service_name, reason, "credential validation denied");
        #[cfg(feature = "metrics")]
        metrics::counter!("dispatch_credentials_denials_total", "service" => service_name.to_string(), "reason" => reason).increment(1);

        self.event_listeners.emit(&CredentialEvent::Denied {
            service_name: service_name.to_string(),
            timestamp: Instant::now(),
            reason,
        });
    }

    pub fn revoke(
        &self,
        service_name: &str,
        reason: impl Into<String>,
        admin_id: impl Into<String>,
    ) -> Result<(), CredentialError> {
        let reason = reason.into();
        let admin_id = admin_id.into();
        let mut inner = self.inner.write().unwrap();
        let now = Utc::now();

        let credential =
            inner
                .credentials
                .get_mut(service_name)
                .ok_or_else(|| CredentialError::UnknownService {
                    service_name: service_name.to_string(),
                })?;

        credential.revoked = true;
        credential.revocation_reason = Some(reason.clone());
        credential.updated_at = now;

        inner.audit_log.push(AuditEntry {
            service_name: service_name.to_string(),
            event: AuditEventKind::Revoked {
                reason,
                admin_id: admin_id.clone(),
            },
            timestamp: now,
        });

        #[cfg(feature = "tracing")]
        info!(service_name, admin_id, "credential revoked");

        self.event_listeners.emit(&CredentialEvent::Revoked {
            service_name: service_name.to_string(),
            timestamp: Instant::now(),
            admin_id,
        });

        Ok(())
    }

    pub fn restore(
        &self,
        service_name: &str,
        admin_id: impl Into<String>,
    ) -> Result<(), CredentialError> {
        let admin_id = admin_id.into();
        let mut inner = self.inner.write().unwrap();
        let now = Utc::now();

        let credential =
            inner
                .credentials
                .get_mut(service_name)
                .ok_or_else(|| CredentialError::UnknownService {
                    service_name: service_name.to_string(),
                })?;

        credential.revoked = false;
        credential.revocation_reason = None;
        credential.updated_at = now;

        inner.audit_log.push(AuditEntry {
            service_name: service_name.to_string(),
            event: AuditEventKind::Restored {
                admin_id: admin_id.clone(),
            },
            timestamp: now,
        });

        self.event_listeners.emit(&CredentialEvent::Restored {
            service_name: service_name.to_string(),
            timestamp: Instant::now(),
            admin_id,
        });

        Ok(())
    }

    pub fn status(&self) -> Vec<CredentialStatus> {
        let inner = self.inner.read().unwrap();
        let mut statuses: Vec<CredentialStatus> = inner
            .credentials
            .values()
            .map(|c| CredentialStatus {
                service_name: c.service_name.clone(),
                revoked: c.revoked,
                permission_count: c.permissions.len(),
                last_used_at: c.last_used_at,
            })
            .collect();
        statuses.sort_by(|a, b| a.service_name.cmp(&b.service_name));
        statuses
    }

    /// Returns authentication events from the last `hours` hours.
    /// `hours` must be within `1..=168` (one week), matching the bound the
    /// original admin endpoint enforced.
    pub fn audit(&self, hours: u32) -> Result<Vec<AuditEntry>, CredentialError> {
        if !(1..=168).contains(&hours) {
            return Err(CredentialError::InvalidAuditWindow { hours });
        }

        let cutoff = Utc::now() - ChronoDuration::hours(hours as i64);
        let inner = self.inner.read().unwrap();
        Ok(inner
            .audit_log
            .iter()
            .filter(|entry| entry.timestamp >= cutoff)
            .cloned()
            .collect())
    }
}
