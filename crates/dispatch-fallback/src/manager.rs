//! Multi-strategy fallback manager.
//!
//! Unlike [`crate::Fallback`] (a single-strategy Tower middleware), the
//! `FallbackManager` walks an ordered chain of recovery strategies when a
//! primary operation fails: cached result, caller-supplied callback,
//! alternative service, simplified algorithm, then a fixed default value.
//! The first strategy that produces a value wins and the result is marked
//! `degraded`; a successful primary call is written back to the cache for
//! next time.

use dispatch_core::mode::ServiceMode;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// Which step of the chain ultimately produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStep {
    Primary,
    Cache,
    AlternativeCallback,
    AlternativeService,
    SimplifiedAlgorithm,
    DefaultValue,
}

impl FallbackStep {
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackStep::Primary => "primary",
            FallbackStep::Cache => "cache",
            FallbackStep::AlternativeCallback => "alternative_callback",
            FallbackStep::AlternativeService => "alternative_service",
            FallbackStep::SimplifiedAlgorithm => "simplified_algorithm",
            FallbackStep::DefaultValue => "default_value",
        }
    }
}

/// Outcome of [`FallbackManager::execute`].
#[derive(Debug, Clone)]
pub struct FallbackOutcome<T> {
    pub data: T,
    pub strategy_used: FallbackStep,
    pub degraded: bool,
    pub fallback_reason: Option<String>,
    pub execution_time: Duration,
}

/// Per-operation configuration: how long the primary gets before the chain
/// kicks in, how long a cached value stays fresh, and what to return if
/// every strategy fails.
#[derive(Debug, Clone)]
pub struct OperationConfig<T> {
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub default_value: T,
}

impl<T> OperationConfig<T> {
    pub fn new(timeout: Duration, cache_ttl: Duration, default_value: T) -> Self {
        Self {
            timeout,
            cache_ttl,
            default_value,
        }
    }
}

struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
}

/// Orchestrates the primary-then-chain execution described in the module
/// docs. `T` is the per-operation result type; operations are registered by
/// name with their own [`OperationConfig`].
pub struct FallbackManager<T> {
    configs: HashMap<String, OperationConfig<T>>,
    cache: Mutex<HashMap<String, CacheEntry<T>>>,
    mode: ServiceMode,
}

impl<T: Clone + Send + Sync + 'static> FallbackManager<T> {
    pub fn new(mode: ServiceMode) -> Self {
        Self {
            configs: HashMap::new(),
            cache: Mutex::new(HashMap::new()),
            mode,
        }
    }

    pub fn register_operation(&mut self, name: impl Into<String>, config: OperationConfig<T>) {
        self.configs.insert(name.into(), config);
    }

    fn config_for<'a>(&'a self, operation: &str) -> Option<&'a OperationConfig<T>> {
        self.configs.get(operation)
    }

    fn cache_get(&self, key: &str, ttl: Duration) -> Option<T> {
        let mut cache = self.cache.lock().unwrap();
        let hit = cache.get(key)?;
        if hit.inserted_at.elapsed() > ttl {
            cache.remove(key);
            return None;
        }
        Some(hit.value.clone())
    }

    fn cache_put(&self, key: &str, value: T) {
        let mut cache = self.cache.lock().unwrap();
        cache.insert(
            key.to_string(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Runs `primary` under the operation's (mode-scaled) timeout; on
    /// success, caches the result and returns a [`FallbackStep::Primary`]
    /// outcome. On failure or timeout, walks cache -> `alt_callback` ->
    /// `alt_service` -> `simplified` -> the registered default value, in
    /// that order, returning the first strategy that yields a value.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(operation)))]
    pub async fn execute<P, PFut, AC, ASFut, SA>(
        &self,
        operation: &str,
        cache_key: &str,
        primary: P,
        alt_callback: Option<AC>,
        alt_service: Option<impl Fn() -> ASFut>,
        simplified: Option<SA>,
    ) -> FallbackOutcome<T>
    where
        P: FnOnce() -> PFut,
        PFut: Future<Output = Result<T, String>>,
        AC: FnOnce() -> Option<T>,
        ASFut: Future<Output = Result<T, String>>,
        SA: FnOnce() -> T,
    {
        let started = Instant::now();
        let config = self
            .config_for(operation)
            .expect("operation must be registered before execute() is called");
        let timeout = self.mode.scale_timeout(config.timeout);

        let primary_result = tokio::time::timeout(timeout, primary()).await;

        match primary_result {
            Ok(Ok(value)) => {
                self.cache_put(cache_key, value.clone());
                return FallbackOutcome {
                    data: value,
                    strategy_used: FallbackStep::Primary,
                    degraded: false,
                    fallback_reason: None,
                    execution_time: started.elapsed(),
                };
            }
            Ok(Err(reason)) => {
                #[cfg(feature = "tracing")]
                warn!(operation, reason = %reason, "primary operation failed, entering fallback chain");
                self.run_chain(
                    operation,
                    cache_key,
                    config,
                    reason,
                    started,
                    alt_callback,
                    alt_service,
                    simplified,
                )
                .await
            }
            Err(_elapsed) => {
                #[cfg(feature = "tracing")]
                warn!(operation, "primary operation timed out, entering fallback chain");
                self.run_chain(
                    operation,
                    cache_key,
                    config,
                    "timeout".to_string(),
                    started,
                    alt_callback,
                    alt_service,
                    simplified,
                )
                .await
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn run_chain<AC, ASFut, SA>(
        &self,
        operation: &str,
        cache_key: &str,
        config: &OperationConfig<T>,
        reason: String,
        started: Instant,
        alt_callback: Option<AC>,
        alt_service: Option<impl Fn() -> ASFut>,
        simplified: Option<SA>,
    ) -> FallbackOutcome<T>
    where
        AC: FnOnce() -> Option<T>,
        ASFut: Future<Output = Result<T, String>>,
        SA: FnOnce() -> T,
    {
        if let Some(cached) = self.cache_get(cache_key, config.cache_ttl) {
            #[cfg(feature = "tracing")]
            debug!(operation, "serving cached value");
            return self.finish(cached, FallbackStep::Cache, reason, started);
        }

        if let Some(cb) = alt_callback {
            if let Some(value) = cb() {
                return self.finish(value, FallbackStep::AlternativeCallback, reason, started);
            }
        }

        if let Some(svc) = alt_service {
            if let Ok(value) = svc().await {
                return self.finish(value, FallbackStep::AlternativeService, reason, started);
            }
        }

        if let Some(simplify) = simplified {
            let value = simplify();
            return self.finish(value, FallbackStep::SimplifiedAlgorithm, reason, started);
        }

        self.finish(
            config.default_value.clone(),
            FallbackStep::DefaultValue,
            reason,
            started,
        )
    }

    fn finish(
        &self,
        data: T,
        strategy_used: FallbackStep,
        reason: String,
        started: Instant,
    ) -> FallbackOutcome<T> {
        #[cfg(feature = "metrics")]
        metrics::counter!(
            "dispatch_fallback_chain_total",
            "strategy" => strategy_used.as_str()
        )
        .increment(1);

        FallbackOutcome {
            data,
            strategy_used,
            degraded: true,
            fallback_reason: Some(reason),
            execution_time: started.elapsed(),
        }
    }
}
