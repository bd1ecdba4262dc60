//! Inputs and outputs of the dispatcher's operations.

use chrono::{DateTime, Utc};

/// One request awaiting assignment.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub request_id: String,
    pub required_specialization: Option<String>,
    pub district: Option<String>,
}

/// A ranked candidate offered when the dispatcher doesn't write the
/// assignment itself.
#[derive(Debug, Clone)]
pub struct Suggestion {
    pub executor_id: String,
    pub score: f64,
}

/// Outcome of [`crate::dispatcher::Dispatcher::dispatch_one`]. The
/// dispatcher never silently assigns without a score: either `assigned` is
/// `true` and `executor_id`/`score` are set, or `assigned` is `false` and
/// `suggestions`/`reason` explain why.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub request_id: String,
    pub assigned: bool,
    pub executor_id: Option<String>,
    pub score: Option<f64>,
    pub suggestions: Vec<Suggestion>,
    pub reason: Option<String>,
    pub degraded: bool,
}

/// One unassigned request as seen by `get_pending_assignments`.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub request_id: String,
    pub created_at: DateTime<Utc>,
    /// Best candidate score known so far, if a discovery pass has already
    /// run for this request; `None` skips the auto-assign-eligible check.
    pub best_score: Option<f64>,
}

/// A pending request annotated with staleness flags.
#[derive(Debug, Clone)]
pub struct PendingAssignment {
    pub request_id: String,
    pub waiting_minutes: i64,
    pub overdue: bool,
    pub auto_assign_eligible: bool,
}
