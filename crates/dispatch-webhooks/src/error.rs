use dispatch_core::ResilienceError;
use std::fmt;

/// Errors raised by the ingestor's own validation, before a
/// [`crate::model::WebhookEvent`] is ever persisted. Everything past this
/// point (handler failures, retry scheduling) is recorded on the event
/// record rather than raised.
#[derive(Debug, Clone)]
pub enum WebhookError {
    EmptySource,
    EmptyEventType,
    UnknownSource { source: String },
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookError::EmptySource => write!(f, "webhook source must not be empty"),
            WebhookError::EmptyEventType => write!(f, "webhook event type must not be empty"),
            WebhookError::UnknownSource { source } => {
                write!(f, "no webhook configuration registered for source '{source}'")
            }
        }
    }
}

impl std::error::Error for WebhookError {}

impl<E> From<WebhookError> for ResilienceError<E> {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::EmptySource => ResilienceError::Validation {
                message: "webhook source must not be empty".to_string(),
            },
            WebhookError::EmptyEventType => ResilienceError::Validation {
                message: "webhook event type must not be empty".to_string(),
            },
            WebhookError::UnknownSource { .. } => ResilienceError::NotFound {
                kind: "webhook_config",
            },
        }
    }
}
