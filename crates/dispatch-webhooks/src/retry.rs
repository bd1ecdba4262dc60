//! Exponential backoff schedule for failed webhook deliveries: a single
//! formula, owned here rather than pulled in from a shared retry crate
//! since the ingestor is its only consumer.

use chrono::{DateTime, Duration, Utc};

/// `2^retry_count` minutes.
pub fn backoff_minutes(retry_count: u32) -> i64 {
    2i64.saturating_pow(retry_count)
}

/// `now + backoff_minutes(retry_count)`.
pub fn next_retry_at(now: DateTime<Utc>, retry_count: u32) -> DateTime<Utc> {
    now + Duration::minutes(backoff_minutes(retry_count))
}
