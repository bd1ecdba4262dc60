//! Inbound webhook ingestion.
//!
//! - [`ingestor::WebhookIngestor`] — resolves per-source config, verifies
//!   HMAC signatures via [`dispatch_credentials`], checks idempotency,
//!   persists a sanitized record and dispatches to a [`handler::WebhookEventHandler`].
//! - [`retry`] — the `2^retry_count`-minute backoff schedule for failed deliveries.
//! - [`idempotency::IdempotencyStore`] — at-most-once replay keyed by `(source, external_event_id)`.
//! - [`sanitize`] — header redaction applied before any record is stored.

pub mod error;
pub mod events;
pub mod handler;
pub mod idempotency;
pub mod ingestor;
pub mod model;
pub mod retry;
pub mod sanitize;

pub use error::WebhookError;
pub use events::WebhookIngestEvent;
pub use handler::{NoopHandler, WebhookEventHandler};
pub use idempotency::{IdempotencyStore, InMemoryIdempotencyStore};
pub use ingestor::WebhookIngestor;
pub use model::{IngestOutcome, IngestRequest, WebhookConfig, WebhookConfigBuilder, WebhookEvent, WebhookEventStatus};
