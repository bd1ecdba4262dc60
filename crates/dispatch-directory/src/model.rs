//! The executor snapshot and the query criteria used to fetch them.

use std::collections::HashSet;

/// A candidate executor as seen by the dispatcher. Held transiently; the
/// directory service is the system of record, this crate never persists it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutorSnapshot {
    pub executor_id: String,
    pub specializations: HashSet<String>,
    pub home_district: String,
    pub current_workload: u32,
    pub capacity: u32,
    /// 0..100
    pub efficiency_score: f64,
    /// 1..5
    pub rating: f64,
    pub is_available: bool,
}

impl ExecutorSnapshot {
    /// `max(0.1, 1 - current/capacity)`; a `capacity` of zero is treated as
    /// fully loaded rather than dividing by zero.
    pub fn workload_headroom(&self) -> f64 {
        if self.capacity == 0 {
            return 0.1;
        }
        (1.0 - self.current_workload as f64 / self.capacity as f64).max(0.1)
    }
}

/// Result of an [`crate::discovery::ExecutorDiscovery::discover`] call.
/// `degraded` is set whenever the primary directory query did not serve the
/// result (rate limited, failed, or timed out and a fallback strategy
/// stepped in instead).
#[derive(Debug, Clone)]
pub struct DiscoveryResult {
    pub candidates: Vec<ExecutorSnapshot>,
    pub degraded: bool,
}

/// Criteria for a directory query. `None` fields are unconstrained.
#[derive(Debug, Clone, Default)]
pub struct QueryCriteria {
    pub specialization: Option<String>,
    pub district: Option<String>,
    pub approved_only: bool,
}

impl QueryCriteria {
    /// Stable string used as both the rate-limit key and the fallback cache
    /// key, so identical queries share quota and a cached result.
    pub fn fingerprint(&self) -> String {
        format!(
            "spec={}|district={}|approved={}",
            self.specialization.as_deref().unwrap_or("-"),
            self.district.as_deref().unwrap_or("-"),
            self.approved_only,
        )
    }
}
