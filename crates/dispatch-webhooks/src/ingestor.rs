//! Wires signature verification, idempotency, sanitized storage and retry
//! scheduling into the inbound webhook pipeline.

use crate::events::WebhookIngestEvent;
use crate::handler::WebhookEventHandler;
use crate::idempotency::IdempotencyStore;
use crate::model::{IngestOutcome, IngestRequest, WebhookConfig, WebhookEvent, WebhookEventStatus};
use crate::retry::next_retry_at;
use crate::sanitize::sanitize_headers;
use crate::WebhookError;
use chrono::{DateTime, Utc};
use dispatch_core::events::{EventListener, EventListeners};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use uuid::Uuid;

#[cfg(feature = "tracing")]
use tracing::warn;

/// Ingests inbound webhook deliveries: resolves per-source configuration,
/// checks `(source, external_event_id)` idempotency, verifies the HMAC
/// signature, persists a sanitized [`WebhookEvent`] record, dispatches to
/// the configured handler and schedules exponential-backoff retries on
/// failure. Authentication failures are never retried.
pub struct WebhookIngestor {
    configs: HashMap<String, WebhookConfig>,
    handler: Arc<dyn WebhookEventHandler>,
    idempotency: Arc<dyn IdempotencyStore>,
    store: Mutex<HashMap<String, WebhookEvent>>,
    event_listeners: EventListeners<WebhookIngestEvent>,
}

impl WebhookIngestor {
    pub fn new(configs: Vec<WebhookConfig>, handler: Arc<dyn WebhookEventHandler>, idempotency: Arc<dyn IdempotencyStore>) -> Self {
        Self {
            configs: configs.into_iter().map(|c| (c.source.clone(), c)).collect(),
            handler,
            idempotency,
            store: Mutex::new(HashMap::new()),
            event_listeners: EventListeners::new(),
        }
    }

    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: EventListener<WebhookIngestEvent> + 'static,
    {
        self.event_listeners.add(listener);
    }

    /// Returns the stored record for a delivery, if still retained.
    pub async fn event(&self, event_id: &str) -> Option<WebhookEvent> {
        self.store.lock().await.get(event_id).cloned()
    }

    /// Runs the full ingestion pipeline for one delivery.
    pub async fn receive(&self, request: IngestRequest) -> Result<IngestOutcome, WebhookError> {
        if request.source.is_empty() {
            return Err(WebhookError::EmptySource);
        }
        if request.event_type.is_empty() {
            return Err(WebhookError::EmptyEventType);
        }

        let config = self
            .configs
            .get(&request.source)
            .cloned()
            .ok_or_else(|| WebhookError::UnknownSource {
                source: request.source.clone(),
            })?;

        self.event_listeners.emit(&WebhookIngestEvent::Received {
            source: request.source.clone(),
            event_type: request.event_type.clone(),
            timestamp: Instant::now(),
        });

        let external_event_id = extract_event_id(&request.body, &config.event_id_field);

        if let Some(ext_id) = &external_event_id {
            if let Some(cached) = self.idempotency.lookup(&request.source, ext_id).await {
                self.event_listeners.emit(&WebhookIngestEvent::DuplicateReplay {
                    source: request.source.clone(),
                    external_event_id: ext_id.clone(),
                    timestamp: Instant::now(),
                });

                return Ok(IngestOutcome {
                    event_id: ext_id.clone(),
                    external_event_id: Some(ext_id.clone()),
                    duplicate: true,
                    signature_valid: true,
                    status: WebhookEventStatus::Completed,
                    response_body: Some(cached),
                });
            }
        }

        let signature_valid = verify_signature(&config, &request.headers, &request.body);
        let now = Utc::now();
        let event_id = Uuid::new_v4().to_string();

        let mut event = WebhookEvent {
            id: event_id.clone(),
            source: request.source.clone(),
            event_type: request.event_type.clone(),
            external_event_id: external_event_id.clone(),
            headers: sanitize_headers(&request.headers, &config.signature_header),
            body: request.body.clone(),
            signature_valid,
            status: WebhookEventStatus::Pending,
            retry_count: 0,
            max_retries: config.max_retries,
            next_retry_at: None,
            created_at: now,
            processed_at: None,
            response_body: None,
            error_message: None,
        };

        if config.require_signature && !signature_valid {
            #[cfg(feature = "tracing")]
            warn!(source = %request.source, "webhook signature verification failed");

            event.status = WebhookEventStatus::Failed;
            event.error_message = Some("invalid signature".to_string());

            self.event_listeners.emit(&WebhookIngestEvent::SignatureRejected {
                source: request.source.clone(),
                timestamp: Instant::now(),
            });

            self.store.lock().await.insert(event_id.clone(), event);

            return Ok(IngestOutcome {
                event_id,
                external_event_id,
                duplicate: false,
                signature_valid: false,
                status: WebhookEventStatus::Failed,
                response_body: None,
            });
        }

        let outcome = self.handler.handle(&request.source, &request.event_type, &request.body).await;

        match outcome {
            Ok(response_body) => {
                event.status = WebhookEventStatus::Completed;
                event.processed_at = Some(now);
                event.response_body = Some(response_body.clone());

                if let Some(ext_id) = &external_event_id {
                    self.idempotency.record(&request.source, ext_id, &response_body).await;
                }

                self.event_listeners.emit(&WebhookIngestEvent::Completed {
                    source: request.source.clone(),
                    timestamp: Instant::now(),
                });

                self.store.lock().await.insert(event_id.clone(), event);

                Ok(IngestOutcome {
                    event_id,
                    external_event_id,
                    duplicate: false,
                    signature_valid: true,
                    status: WebhookEventStatus::Completed,
                    response_body: Some(response_body),
                })
            }
            Err(reason) => {
                event.error_message = Some(reason);

                if event.retry_count < event.max_retries {
                    event.status = WebhookEventStatus::Retrying;
                    event.next_retry_at = Some(next_retry_at(now, event.retry_count));

                    self.event_listeners.emit(&WebhookIngestEvent::RetryScheduled {
                        source: request.source.clone(),
                        retry_count: event.retry_count,
                        timestamp: Instant::now(),
                    });
                } else {
                    event.status = WebhookEventStatus::Failed;

                    self.event_listeners.emit(&WebhookIngestEvent::RetriesExhausted {
                        source: request.source.clone(),
                        timestamp: Instant::now(),
                    });
                }

                let status = event.status;
                self.store.lock().await.insert(event_id.clone(), event);

                Ok(IngestOutcome {
                    event_id,
                    external_event_id,
                    duplicate: false,
                    signature_valid: true,
                    status,
                    response_body: None,
                })
            }
        }
    }

    /// Retries every stored event whose `next_retry_at` has elapsed.
    /// Returns the ids of events retried this tick.
    pub async fn retry_due(&self, now: DateTime<Utc>) -> Vec<String> {
        let due_ids: Vec<String> = {
            let store = self.store.lock().await;
            store
                .values()
                .filter(|e| e.status == WebhookEventStatus::Retrying && e.retry_count < e.max_retries)
                .filter(|e| e.next_retry_at.map(|t| t <= now).unwrap_or(false))
                .map(|e| e.id.clone())
                .collect()
        };

        for id in &due_ids {
            self.retry_one(id, now).await;
        }

        due_ids
    }

    async fn retry_one(&self, event_id: &str, now: DateTime<Utc>) {
        let Some((source, event_type, body, retry_count, max_retries, external_event_id)) = ({
            let mut store = self.store.lock().await;
            store.get_mut(event_id).map(|event| {
                event.status = WebhookEventStatus::Processing;
                event.retry_count += 1;
                (
                    event.source.clone(),
                    event.event_type.clone(),
                    event.body.clone(),
                    event.retry_count,
                    event.max_retries,
                    event.external_event_id.clone(),
                )
            })
        }) else {
            return;
        };

        let outcome = self.handler.handle(&source, &event_type, &body).await;

        let mut store = self.store.lock().await;
        let Some(event) = store.get_mut(event_id) else {
            return;
        };

        match outcome {
            Ok(response_body) => {
                event.status = WebhookEventStatus::Completed;
                event.processed_at = Some(now);
                event.response_body = Some(response_body.clone());
                event.next_retry_at = None;
                drop(store);

                if let Some(ext_id) = &external_event_id {
                    self.idempotency.record(&source, ext_id, &response_body).await;
                }

                self.event_listeners.emit(&WebhookIngestEvent::Completed {
                    source,
                    timestamp: Instant::now(),
                });
            }
            Err(reason) => {
                event.error_message = Some(reason);

                if retry_count < max_retries {
                    event.status = WebhookEventStatus::Retrying;
                    event.next_retry_at = Some(next_retry_at(now, retry_count));
                    drop(store);

                    self.event_listeners.emit(&WebhookIngestEvent::RetryScheduled {
                        source,
                        retry_count,
                        timestamp: Instant::now(),
                    });
                } else {
                    event.status = WebhookEventStatus::Failed;
                    event.next_retry_at = None;
                    drop(store);

                    self.event_listeners.emit(&WebhookIngestEvent::RetriesExhausted {
                        source,
                        timestamp: Instant::now(),
                    });
                }
            }
        }
    }
}

fn verify_signature(config: &WebhookConfig, headers: &HashMap<String, String>, body: &str) -> bool {
    let header_name = config.signature_header.to_ascii_lowercase();
    let presented = headers
        .iter()
        .find(|(key, _)| key.to_ascii_lowercase() == header_name)
        .map(|(_, value)| value.as_str());

    match presented {
        Some(signature) => dispatch_credentials::verify_hmac_hex(&config.secret, body.as_bytes(), signature),
        None => false,
    }
}

fn extract_event_id(body: &str, field: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let field_value = value.get(field)?;

    if let Some(s) = field_value.as_str() {
        Some(s.to_string())
    } else if field_value.is_number() {
        Some(field_value.to_string())
    } else {
        None
    }
}
