//! The pluggable per-event handler dispatched to after signature
//! verification and idempotency checks have passed.

use async_trait::async_trait;

/// Processes one webhook delivery and returns the JSON response body to
/// store (and to replay on a duplicate delivery). An `Err` schedules a
/// retry per [`crate::retry`].
#[async_trait]
pub trait WebhookEventHandler: Send + Sync {
    async fn handle(&self, source: &str, event_type: &str, body: &str) -> Result<String, String>;
}

/// Acknowledges every event without routing it anywhere; the default for
/// sources with no registered handler.
pub struct NoopHandler;

#[async_trait]
impl WebhookEventHandler for NoopHandler {
    async fn handle(&self, _source: &str, _event_type: &str, _body: &str) -> Result<String, String> {
        Ok(r#"{"status":"received"}"#.to_string())
    }
}
