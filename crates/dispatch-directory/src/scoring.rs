//! Candidate scoring: how well an executor fits a request's requirements.

use crate::model::ExecutorSnapshot;

const W_SPECIALIZATION: f64 = 0.40;
const W_EFFICIENCY: f64 = 0.30;
const W_WORKLOAD: f64 = 0.20;
const W_AVAILABILITY: f64 = 0.10;

/// `1.0` if the executor carries the required specialization, `0.7` if it
/// only carries `"general"`, `0.5` otherwise.
fn specialization_match(required: Option<&str>, executor: &ExecutorSnapshot) -> f64 {
    match required {
        None => 1.0,
        Some(tag) if executor.specializations.contains(tag) => 1.0,
        Some(_) if executor.specializations.contains("general") => 0.7,
        Some(_) => 0.5,
    }
}

/// Weighted fit score for `executor` against `required_specialization`,
/// always in `[0, 1]`.
pub fn score(required_specialization: Option<&str>, executor: &ExecutorSnapshot) -> f64 {
    let specialization = specialization_match(required_specialization, executor);
    let efficiency = (executor.efficiency_score / 100.0).clamp(0.0, 1.0);
    let workload = executor.workload_headroom();
    let availability = if executor.is_available { 1.0 } else { 0.0 };

    W_SPECIALIZATION * specialization
        + W_EFFICIENCY * efficiency
        + W_WORKLOAD * workload
        + W_AVAILABILITY * availability
}

/// Orders candidates best-first: higher score, then higher rating, then
/// lower current workload, then lower executor id.
pub fn rank(
    required_specialization: Option<&str>,
    mut candidates: Vec<ExecutorSnapshot>,
) -> Vec<(ExecutorSnapshot, f64)> {
    let mut scored: Vec<(ExecutorSnapshot, f64)> = candidates
        .drain(..)
        .map(|e| {
            let s = score(required_specialization, &e);
            (e, s)
        })
        .collect();

    scored.sort_by(|(a, score_a), (b, score_b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap()
            .then_with(|| b.rating.partial_cmp(&a.rating).unwrap())
            .then_with(|| a.current_workload.cmp(&b.current_workload))
            .then_with(|| a.executor_id.cmp(&b.executor_id))
    });

    scored
}
