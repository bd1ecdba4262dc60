//! Process-wide Service-Mode controller.
//!
//! `ServiceMode` is the one piece of sanctioned global mutable state in the
//! dispatch substrate: every process runs in exactly one mode at a time, and
//! every other component (optimizers, dispatcher, fallback manager) reads it
//! to scale timeouts and iteration budgets or to disable expensive features
//! rather than keeping its own copy.

use crate::events::{EventListeners, ResilienceEvent};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Degradation level of the whole process.
///
/// Modes are ordered from least to most degraded; `as_u8` preserves that
/// ordering so callers can compare severity with `>=` if they need to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ServiceMode {
    /// Everything runs at full capability.
    Full = 0,
    /// Non-critical features still run, but with tighter budgets.
    Degraded = 1,
    /// Expensive optimization (simulated annealing / genetic algorithm) and
    /// ML-assisted scoring are disabled; only greedy assignment and
    /// rule-based scoring run.
    Minimal = 2,
    /// Only the cheapest, most deterministic paths run; the dispatcher
    /// always falls back to its default-value strategy rather than calling
    /// any optimizer or predictor.
    Emergency = 3,
}

impl ServiceMode {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ServiceMode::Full,
            1 => ServiceMode::Degraded,
            2 => ServiceMode::Minimal,
            _ => ServiceMode::Emergency,
        }
    }

    /// Multiplicative scale applied to timeouts and iteration budgets.
    pub fn scale_factor(self) -> f64 {
        match self {
            ServiceMode::Full => 1.0,
            ServiceMode::Degraded => 0.75,
            ServiceMode::Minimal => 0.5,
            ServiceMode::Emergency => 0.25,
        }
    }

    /// Scales a timeout, then applies the absolute caps observed for
    /// minimal/emergency modes (3s and 2s respectively) so a very large
    /// configured timeout can't defeat the point of degrading.
    pub fn scale_timeout(self, base: Duration) -> Duration {
        let scaled = base.mul_f64(self.scale_factor());
        match self {
            ServiceMode::Emergency => scaled.min(Duration::from_secs(2)),
            ServiceMode::Minimal => scaled.min(Duration::from_secs(3)),
            _ => scaled,
        }
    }

    /// Scales an iteration/population budget (batch optimizers), rounding
    /// down but never to zero.
    pub fn scale_iterations(self, base: usize) -> usize {
        let scaled = (base as f64 * self.scale_factor()).floor() as usize;
        scaled.max(1)
    }

    /// Whether simulated annealing / genetic-algorithm optimizers may run.
    pub fn allows_heavy_optimizers(self) -> bool {
        matches!(self, ServiceMode::Full | ServiceMode::Degraded)
    }

    /// Whether the dispatcher may call out to an ML predictor at all.
    pub fn allows_ml_prediction(self) -> bool {
        !matches!(self, ServiceMode::Emergency)
    }
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceMode::Full => "full",
            ServiceMode::Degraded => "degraded",
            ServiceMode::Minimal => "minimal",
            ServiceMode::Emergency => "emergency",
        };
        write!(f, "{s}")
    }
}

/// Emitted whenever [`ServiceModeController`] transitions modes.
#[derive(Debug, Clone)]
pub struct ModeEvent {
    pub from: ServiceMode,
    pub to: ServiceMode,
    pub reason: String,
    timestamp: Instant,
}

impl ResilienceEvent for ModeEvent {
    fn event_type(&self) -> &'static str {
        "mode_transition"
    }

    fn timestamp(&self) -> Instant {
        self.timestamp
    }

    fn pattern_name(&self) -> &str {
        "service_mode"
    }
}

/// Shared, atomically-readable handle to the process's current mode.
///
/// Reads are a single `Acquire` load so any component on the hot path
/// (optimizer loop, dispatcher admission check) can consult the mode
/// without awaiting a lock. Transitions go through `set_mode`, which also
/// notifies registered listeners.
#[derive(Clone)]
pub struct ServiceModeController {
    state: Arc<AtomicU8>,
    listeners: EventListeners<ModeEvent>,
}

impl ServiceModeController {
    pub fn new(initial: ServiceMode) -> Self {
        Self {
            state: Arc::new(AtomicU8::new(initial as u8)),
            listeners: EventListeners::new(),
        }
    }

    /// Registers a listener for mode transitions.
    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: crate::events::EventListener<ModeEvent> + 'static,
    {
        self.listeners.add(listener);
    }

    /// Current mode. Wait-free.
    pub fn mode(&self) -> ServiceMode {
        ServiceMode::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Transitions to a new mode, emitting a [`ModeEvent`] if it actually
    /// changed. Idempotent no-op if `mode` already equals the current mode.
    pub fn set_mode(&self, mode: ServiceMode, reason: impl Into<String>) {
        let previous = self.state.swap(mode as u8, Ordering::AcqRel);
        let previous = ServiceMode::from_u8(previous);
        if previous == mode {
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(from = %previous, to = %mode, "service mode transition");

        #[cfg(feature = "metrics")]
        metrics::gauge!("dispatch_service_mode").set(mode as u8 as f64);

        self.listeners.emit(&ModeEvent {
            from: previous,
            to: mode,
            reason: reason.into(),
            timestamp: Instant::now(),
        });
    }
}

impl Default for ServiceModeController {
    fn default() -> Self {
        Self::new(ServiceMode::Full)
    }
}
