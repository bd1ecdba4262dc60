//! Inputs and outputs of a batch optimization run.

/// One request to be assigned, as seen by the optimizer. `sequence` breaks
/// ties between equal-priority requests FIFO (lower sequence = older).
#[derive(Debug, Clone)]
pub struct OptimizerRequest {
    pub request_id: String,
    /// 1 (lowest) .. 5 (highest).
    pub priority: u8,
    pub sequence: u64,
    pub required_specialization: Option<String>,
    pub district: Option<String>,
}

/// One committed request-to-executor pairing with the score that earned it.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub request_id: String,
    pub executor_id: String,
    pub score: f64,
}

/// Result of any of the batch optimizers.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub assignments: Vec<Assignment>,
    pub optimization_score: f64,
    pub algorithm_used: &'static str,
    pub iterations: usize,
    pub elapsed_ms: u64,
}
