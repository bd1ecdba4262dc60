//! Service-to-service trust plane.
//!
//! Replaces self-minted bearer tokens with a central, revocable,
//! HMAC-verified static key check (`self_issue_token` always returns
//! [`error::CredentialError::SelfIssuanceDisabled`], the library-level stand-in
//! for the `410 Gone` the old issuance endpoint now returns). The same
//! [`hmac_primitive`] that verifies service keys also backs webhook
//! signature verification.
//!
//! - [`store::CredentialStore`] — provisioning, validation, revocation, audit.
//! - [`events::CredentialEvent`] — observability hooks for every decision.
//! - [`hmac_primitive`] — the shared constant-time HMAC-SHA256 primitive.

pub mod error;
pub mod events;
pub mod hmac_primitive;
pub mod store;

pub use error::CredentialError;
pub use events::CredentialEvent;
pub use hmac_primitive::{compute_hmac_hex, verify_hmac_hex};
pub use store::{AuditEntry, AuditEventKind, CredentialStatus, CredentialStore, ServiceCredential};
