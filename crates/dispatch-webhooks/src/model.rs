//! The inbound webhook request, its stored record, and per-source config.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Lifecycle of a stored [`WebhookEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookEventStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Retrying,
}

impl WebhookEventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WebhookEventStatus::Pending => "pending",
            WebhookEventStatus::Processing => "processing",
            WebhookEventStatus::Completed => "completed",
            WebhookEventStatus::Failed => "failed",
            WebhookEventStatus::Retrying => "retrying",
        }
    }
}

/// How to verify and route events from one source (e.g. `"stripe"`).
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub source: String,
    pub secret: Vec<u8>,
    /// Header carrying `hex(HMAC-SHA256(secret, raw_body))`. Default `X-Signature`.
    pub signature_header: String,
    /// Field in the JSON body holding the external event id, used for idempotency.
    pub event_id_field: String,
    pub max_retries: u32,
    pub require_signature: bool,
}

impl WebhookConfig {
    pub fn builder(source: impl Into<String>, secret: impl Into<Vec<u8>>) -> WebhookConfigBuilder {
        WebhookConfigBuilder::new(source, secret)
    }
}

pub struct WebhookConfigBuilder {
    source: String,
    secret: Vec<u8>,
    signature_header: String,
    event_id_field: String,
    max_retries: u32,
    require_signature: bool,
}

impl WebhookConfigBuilder {
    pub fn new(source: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            source: source.into(),
            secret: secret.into(),
            signature_header: "X-Signature".to_string(),
            event_id_field: "id".to_string(),
            max_retries: 5,
            require_signature: true,
        }
    }

    pub fn signature_header(mut self, header: impl Into<String>) -> Self {
        self.signature_header = header.into();
        self
    }

    pub fn event_id_field(mut self, field: impl Into<String>) -> Self {
        self.event_id_field = field.into();
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn require_signature(mut self, require: bool) -> Self {
        self.require_signature = require;
        self
    }

    pub fn build(self) -> WebhookConfig {
        WebhookConfig {
            source: self.source,
            secret: self.secret,
            signature_header: self.signature_header,
            event_id_field: self.event_id_field,
            max_retries: self.max_retries,
            require_signature: self.require_signature,
        }
    }
}

/// One inbound delivery, as handed to [`crate::ingestor::WebhookIngestor::receive`].
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub source: String,
    pub event_type: String,
    pub headers: HashMap<String, String>,
    /// Raw JSON body, stored verbatim.
    pub body: String,
}

/// A stored webhook delivery. Headers are sanitized before this is ever
/// constructed; `body` keeps the verbatim payload per the at-most-once /
/// audit invariant.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub id: String,
    pub source: String,
    pub event_type: String,
    pub external_event_id: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub signature_valid: bool,
    pub status: WebhookEventStatus,
    pub retry_count: u32,
    pub max_retries: u32,
    pub next_retry_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub response_body: Option<String>,
    pub error_message: Option<String>,
}

/// Outcome of [`crate::ingestor::WebhookIngestor::receive`].
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub event_id: String,
    pub external_event_id: Option<String>,
    pub duplicate: bool,
    pub signature_valid: bool,
    pub status: WebhookEventStatus,
    pub response_body: Option<String>,
}
