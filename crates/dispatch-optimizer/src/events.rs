//! Events emitted by the batch optimizers.

use dispatch_core::ResilienceEvent;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum OptimizerEvent {
    RunCompleted {
        algorithm: &'static str,
        optimization_score: f64,
        iterations: usize,
        elapsed_ms: u64,
        timestamp: Instant,
    },
    Cancelled {
        algorithm: &'static str,
        iterations: usize,
        timestamp: Instant,
    },
}

impl ResilienceEvent for OptimizerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OptimizerEvent::RunCompleted { .. } => "run_completed",
            OptimizerEvent::Cancelled { .. } => "cancelled",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            OptimizerEvent::RunCompleted { timestamp, .. } => *timestamp,
            OptimizerEvent::Cancelled { timestamp, .. } => *timestamp,
        }
    }

    fn pattern_name(&self) -> &str {
        match self {
            OptimizerEvent::RunCompleted { algorithm, .. } => algorithm,
            OptimizerEvent::Cancelled { algorithm, .. } => algorithm,
        }
    }
}
