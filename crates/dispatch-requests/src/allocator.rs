//! The request-number allocator (`YYMMDD-NNN`).
//!
//! Allocation is a single atomic increment against a date-scoped key in a
//! shared store, exactly like [`dispatch_ratelimiter`]'s sliding-window
//! counters — but unlike the rate limiter, the allocator refuses rather than
//! failing open when the store is unreachable: an allowed-but-uncounted
//! request is harmless, a duplicate request number is not.

use crate::error::AllocatorError;
use crate::events::RequestEvent;
use async_trait::async_trait;
use chrono::{FixedOffset, Utc};
use dispatch_core::events::EventListeners;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::warn;

/// Highest sequence value a single date may allocate.
const MAX_SEQUENCE: u32 = 999;

/// A backend capable of atomically incrementing a date-scoped counter.
///
/// Implementations must never return a value already handed out for the
/// same `date_key` — the increment itself is the uniqueness guarantee, so
/// it has to be a single atomic operation on the backend, not a
/// read-then-write from this process.
#[async_trait]
pub trait AllocatorStore: Send + Sync {
    /// Increments the counter for `date_key`, creating it at `1` if absent,
    /// and setting its TTL to `ttl` the first time it is created. Returns
    /// the post-increment value.
    async fn increment(&self, date_key: &str, ttl: Duration) -> Result<u32, AllocatorError>;
}

const INCR_SCRIPT: &str = r#"
local current = redis.call('INCR', KEYS[1])
if current == 1 then
    redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
return current
"#;

/// Redis-backed counter. `INCR` is atomic on its own; the script only adds
/// the one-time `PEXPIRE` so a crash between `INCR` and `EXPIRE` can't leave
/// an immortal key behind.
pub struct RedisAllocatorStore {
    client: redis::Client,
    script: redis::Script,
}

impl RedisAllocatorStore {
    pub fn new(client: redis::Client) -> Self {
        Self {
            client,
            script: redis::Script::new(INCR_SCRIPT),
        }
    }

    pub fn open(url: &str) -> redis::RedisResult<Self> {
        Ok(Self::new(redis::Client::open(url)?))
    }
}

#[async_trait]
impl AllocatorStore for RedisAllocatorStore {
    async fn increment(&self, date_key: &str, ttl: Duration) -> Result<u32, AllocatorError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|_err| {
                #[cfg(feature = "tracing")]
                warn!(date_key, "allocator store unreachable, refusing to allocate");
                AllocatorError::StoreUnavailable
            })?;

        let value: i64 = self
            .script
            .key(date_key)
            .arg(ttl.as_millis() as i64)
            .invoke_async(&mut conn)
            .await
            .map_err(|_err| AllocatorError::StoreUnavailable)?;

        Ok(value.max(0) as u32)
    }
}

/// In-process counter, used in tests and as the single-instance default.
#[derive(Default)]
pub struct InMemoryAllocatorStore {
    counters: Mutex<HashMap<String, u32>>,
}

impl InMemoryAllocatorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AllocatorStore for InMemoryAllocatorStore {
    async fn increment(&self, date_key: &str, _ttl: Duration) -> Result<u32, AllocatorError> {
        let mut counters = self.counters.lock().unwrap();
        let counter = counters.entry(date_key.to_string()).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }
}

/// Issues `YYMMDD-NNN` request numbers, monotonic within a date and
/// resetting at local midnight by construction (each date gets its own
/// counter key).
pub struct RequestNumberAllocator {
    store: std::sync::Arc<dyn AllocatorStore>,
    timezone: FixedOffset,
    event_listeners: EventListeners<RequestEvent>,
}

impl RequestNumberAllocator {
    /// `timezone` is the service's configured local timezone; the date
    /// portion of the request number is computed in it.
    pub fn new(store: std::sync::Arc<dyn AllocatorStore>, timezone: FixedOffset) -> Self {
        Self {
            store,
            timezone,
            event_listeners: EventListeners::new(),
        }
    }

    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: dispatch_core::events::EventListener<RequestEvent> + 'static,
    {
        self.event_listeners.add(listener);
    }

    fn date_key_now(&self) -> String {
        Utc::now().with_timezone(&self.timezone).format("%y%m%d").to_string()
    }

    /// Allocates the next request number for "today" in the configured
    /// timezone. TTL on the backing counter key is `25h` — comfortably
    /// longer than a day so a slow clock skew can't drop the key early.
    pub async fn allocate(&self) -> Result<String, AllocatorError> {
        let date_key = self.date_key_now();
        let sequence = self
            .store
            .increment(&date_key, Duration::from_secs(25 * 3600))
            .await?;

        if sequence > MAX_SEQUENCE {
            self.event_listeners.emit(&RequestEvent::AllocationExhausted {
                date_key: date_key.clone(),
                timestamp: Instant::now(),
            });
            return Err(AllocatorError::Exhausted { date_key });
        }

        let request_number = format!("{date_key}-{sequence:03}");

        #[cfg(feature = "metrics")]
        metrics::counter!("dispatch_requests_allocations_total").increment(1);

        self.event_listeners.emit(&RequestEvent::Allocated {
            request_number: request_number.clone(),
            timestamp: Instant::now(),
        });

        Ok(request_number)
    }
}
