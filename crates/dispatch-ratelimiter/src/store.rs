//! Pluggable storage backends for the distributed rate limiter.
//!
//! The limiter is meant to agree across every process hitting the same
//! backend, so the count has to live somewhere shared. [`RedisRateLimitStore`]
//! keeps a sorted-set-per-key sliding window log in Redis, trimmed and
//! counted atomically in a single Lua script so concurrent callers never
//! race on the count. [`InMemoryRateLimitStore`] reimplements the identical
//! algorithm locally for tests and as the default when no distributed
//! backend is configured.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Outcome of a single rate-limit check against a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub current_count: u64,
    pub limit: u64,
    pub retry_after: Option<Duration>,
}

/// A backend capable of evaluating a sliding-window limit for a key.
///
/// Implementations should fail open: if the store can't be reached, `check`
/// returns `allowed: true` rather than surfacing a transport error, so a
/// degraded store never turns into an outage for every other service.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn check(&self, key: &str, limit: u64, window: Duration) -> RateLimitDecision;
}

const SLIDING_WINDOW_SCRIPT: &str = r#"
local key = KEYS[1]
local now = tonumber(ARGV[1])
local window_ms = tonumber(ARGV[2])
local limit = tonumber(ARGV[3])
local member = ARGV[4]

redis.call('ZREMRANGEBYSCORE', key, 0, now - window_ms)
local current = redis.call('ZCARD', key)

if current < limit then
    redis.call('ZADD', key, now, member)
    redis.call('PEXPIRE', key, window_ms)
    return {1, current + 1}
else
    return {0, current}
end
"#;

/// Redis-backed sliding window log.
pub struct RedisRateLimitStore {
    client: redis::Client,
    script: redis::Script,
}

impl RedisRateLimitStore {
    pub fn new(client: redis::Client) -> Self {
        Self {
            client,
            script: redis::Script::new(SLIDING_WINDOW_SCRIPT),
        }
    }

    pub fn open(url: &str) -> redis::RedisResult<Self> {
        Ok(Self::new(redis::Client::open(url)?))
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn check(&self, key: &str, limit: u64, window: Duration) -> RateLimitDecision {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64;
        let window_ms = window.as_millis().max(1) as i64;
        let member = format!("{now_ms}-{:p}", key.as_ptr());

        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(key, "rate limit store unreachable, allowing request");
                return RateLimitDecision {
                    allowed: true,
                    current_count: 0,
                    limit,
                    retry_after: None,
                };
            }
        };

        let result: redis::RedisResult<(i64, i64)> = self
            .script
            .key(key)
            .arg(now_ms)
            .arg(window_ms)
            .arg(limit as i64)
            .arg(member)
            .invoke_async(&mut conn)
            .await;

        match result {
            Ok((allowed, current)) => RateLimitDecision {
                allowed: allowed == 1,
                current_count: current.max(0) as u64,
                limit,
                retry_after: (allowed != 1).then_some(window),
            },
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(key, "rate limit store error, allowing request");
                RateLimitDecision {
                    allowed: true,
                    current_count: 0,
                    limit,
                    retry_after: None,
                }
            }
        }
    }
}

/// In-process sliding window log, used in tests and as the no-backend default.
#[derive(Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn check(&self, key: &str, limit: u64, window: Duration) -> RateLimitDecision {
        let mut windows = self.windows.lock().unwrap();
        let now = Instant::now();
        let entry = windows.entry(key.to_string()).or_default();

        while let Some(&front) = entry.front() {
            if now.duration_since(front) > window {
                entry.pop_front();
            } else {
                break;
            }
        }

        let current = entry.len() as u64;
        if current < limit {
            entry.push_back(now);
            RateLimitDecision {
                allowed: true,
                current_count: current + 1,
                limit,
                retry_after: None,
            }
        } else {
            RateLimitDecision {
                allowed: false,
                current_count: current,
                limit,
                retry_after: Some(window),
            }
        }
    }
}
