//! Dispatcher modes and tunables.

/// Governs whether the dispatcher writes an assignment itself or only
/// returns a suggestion for human confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Always returns suggestions; a human picks.
    Manual,
    /// Returns a ranked suggestion list annotated with the blended
    /// rule+ML score; still never writes the assignment itself.
    AiAssisted,
    /// Writes the assignment itself when the best score clears
    /// `auto_assign_threshold`; otherwise downgrades to a suggestion.
    AutoAssign,
    /// Routes to the batch optimizer rather than single-request scoring.
    BatchOptimize,
}

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub mode: DispatchMode,
    /// Minimum blended score required for `AutoAssign` to write the
    /// assignment itself. Default: 0.6.
    pub auto_assign_threshold: f64,
    /// Weight given to the ML predictor's `success_probability` when
    /// blending it with the rule-based score. 0.0 ignores ML entirely;
    /// 1.0 uses only ML. Default: 0.5.
    pub ml_weight: f64,
    /// How many top-ranked candidates get a prediction pass in
    /// `AiAssisted`/`AutoAssign` modes.
    pub top_k: usize,
    /// A pending request older than this is `overdue` in
    /// `get_pending_assignments`.
    pub overdue_after_minutes: i64,
}

impl DispatcherConfig {
    pub fn builder() -> DispatcherConfigBuilder {
        DispatcherConfigBuilder::new()
    }
}

pub struct DispatcherConfigBuilder {
    mode: DispatchMode,
    auto_assign_threshold: f64,
    ml_weight: f64,
    top_k: usize,
    overdue_after_minutes: i64,
}

impl DispatcherConfigBuilder {
    pub fn new() -> Self {
        Self {
            mode: DispatchMode::AiAssisted,
            auto_assign_threshold: 0.6,
            ml_weight: 0.5,
            top_k: 5,
            overdue_after_minutes: 60,
        }
    }

    pub fn mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn auto_assign_threshold(mut self, threshold: f64) -> Self {
        self.auto_assign_threshold = threshold;
        self
    }

    pub fn ml_weight(mut self, weight: f64) -> Self {
        self.ml_weight = weight;
        self
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn overdue_after_minutes(mut self, minutes: i64) -> Self {
        self.overdue_after_minutes = minutes;
        self
    }

    pub fn build(self) -> DispatcherConfig {
        DispatcherConfig {
            mode: self.mode,
            auto_assign_threshold: self.auto_assign_threshold,
            ml_weight: self.ml_weight,
            top_k: self.top_k,
            overdue_after_minutes: self.overdue_after_minutes,
        }
    }
}

impl Default for DispatcherConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
