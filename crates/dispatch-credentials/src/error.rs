use dispatch_core::ResilienceError;
use std::fmt;

/// Errors surfaced by the credential store.
///
/// Each kind stays distinct rather than collapsing into a single
/// "auth failed" error, per the permission model: unknown services, empty
/// names, revoked credentials, bad keys, and missing permissions are all
/// different failures for an operator to tell apart.
#[derive(Debug, Clone)]
pub enum CredentialError {
    /// `service_name` was empty.
    EmptyServiceName,
    /// No credential has ever been provisioned for this service name.
    UnknownService { service_name: String },
    /// The presented key did not match the stored verifier.
    InvalidKey { service_name: String },
    /// The credential exists but has been revoked.
    Revoked {
        service_name: String,
        reason: String,
    },
    /// The credential lacks a permission the caller required.
    InsufficientPermission {
        service_name: String,
        permission: String,
    },
    /// `Audit(hours)` was called with an hours value outside `1..=168`.
    InvalidAuditWindow { hours: u32 },
    /// Self-issuance of bearer tokens is disabled; callers must provision
    /// a static key out of band instead.
    SelfIssuanceDisabled,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::EmptyServiceName => write!(f, "service name must not be empty"),
            CredentialError::UnknownService { service_name } => {
                write!(f, "unknown service '{service_name}'")
            }
            CredentialError::InvalidKey { service_name } => {
                write!(f, "invalid key presented for service '{service_name}'")
            }
            CredentialError::Revoked {
                service_name,
                reason,
            } => write!(f, "credential for '{service_name}' revoked: {reason}"),
            CredentialError::InsufficientPermission {
                service_name,
                permission,
            } => write!(
                f,
                "service '{service_name}' lacks required permission '{permission}'"
            ),
            CredentialError::InvalidAuditWindow { hours } => {
                write!(f, "audit window must be within 1..=168 hours, got {hours}")
            }
            CredentialError::SelfIssuanceDisabled => {
                write!(f, "self-issuance of bearer tokens is disabled (410 Gone)")
            }
        }
    }
}

impl std::error::Error for CredentialError {}

impl<E> From<CredentialError> for ResilienceError<E> {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::EmptyServiceName => ResilienceError::Validation {
                message: "service name must not be empty".to_string(),
            },
            CredentialError::UnknownService { .. } | CredentialError::InvalidKey { .. } => {
                ResilienceError::Unauthenticated {
                    reason: "invalid_token",
                }
            }
            CredentialError::Revoked { .. } => ResilienceError::Unauthenticated {
                reason: "service_authentication_required",
            },
            CredentialError::InsufficientPermission { .. } => ResilienceError::Unauthorized {
                reason: "insufficient_permissions",
            },
            CredentialError::InvalidAuditWindow { .. } => ResilienceError::Validation {
                message: "audit window must be within 1..=168 hours".to_string(),
            },
            CredentialError::SelfIssuanceDisabled => ResilienceError::Unauthorized {
                reason: "self_issuance_disabled",
            },
        }
    }
}
