//! Idempotency lookup keyed by `(source, external_event_id)`, the same
//! key the concurrency model serializes webhook processing on.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Looks up and records completed deliveries so a redelivered event
/// replays its stored response instead of running the handler twice.
#[async_trait]
pub trait IdempotencyStore: Send + Sync {
    async fn lookup(&self, source: &str, external_event_id: &str) -> Option<String>;
    async fn record(&self, source: &str, external_event_id: &str, response_body: &str);
}

#[derive(Default)]
pub struct InMemoryIdempotencyStore {
    completed: Mutex<HashMap<(String, String), String>>,
}

impl InMemoryIdempotencyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdempotencyStore for InMemoryIdempotencyStore {
    async fn lookup(&self, source: &str, external_event_id: &str) -> Option<String> {
        let completed = self.completed.lock().await;
        completed.get(&(source.to_string(), external_event_id.to_string())).cloned()
    }

    async fn record(&self, source: &str, external_event_id: &str, response_body: &str) {
        let mut completed = self.completed.lock().await;
        completed.insert((source.to_string(), external_event_id.to_string()), response_body.to_string());
    }
}
