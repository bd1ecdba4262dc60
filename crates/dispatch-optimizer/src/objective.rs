//! The objective function every algorithm maximizes: total fit score minus
//! an inter-district travel penalty, subject to executor capacity and
//! at-most-one-executor-per-request.

use crate::model::OptimizerRequest;
use dispatch_directory::{score as fit_score, ExecutorSnapshot};
use dispatch_geo::GeoOptimizer;

/// An assignment vector: `assignment[i] = Some(j)` means request `i` goes to
/// `executors[j]`; `None` means the request is left unassigned.
pub type AssignmentVector = Vec<Option<usize>>;

/// Net score for one (request, executor) pairing: the directory fit score
/// minus a distance penalty when the executor's home district differs from
/// the request's.
pub fn pair_score(
    request: &OptimizerRequest,
    executor: &ExecutorSnapshot,
    geo: Option<&GeoOptimizer>,
    penalty_weight: f64,
    max_distance_km: f64,
) -> f64 {
    let base = fit_score(request.required_specialization.as_deref(), executor);

    let penalty = match (&request.district, geo) {
        (Some(district), Some(geo)) if district != &executor.home_district => {
            let distance = geo.district_distance(district, &executor.home_district);
            let normalized = (distance / max_distance_km.max(1e-6)).min(1.0);
            penalty_weight * normalized
        }
        _ => 0.0,
    };

    base - penalty
}

/// Remaining capacity for each executor before this run's assignments.
fn remaining_capacity(executors: &[ExecutorSnapshot]) -> Vec<u32> {
    executors
        .iter()
        .map(|e| e.capacity.saturating_sub(e.current_workload))
        .collect()
}

/// Whether `assignment` respects every executor's remaining capacity.
pub fn is_feasible(assignment: &AssignmentVector, executors: &[ExecutorSnapshot]) -> bool {
    let mut used = vec![0u32; executors.len()];
    for slot in assignment.iter().flatten() {
        used[*slot] += 1;
    }
    let capacity = remaining_capacity(executors);
    used.iter().zip(capacity.iter()).all(|(u, c)| u <= c)
}

/// Total objective value of `assignment`: the sum of net pair scores over
/// every assigned request.
pub fn total_objective(
    assignment: &AssignmentVector,
    requests: &[OptimizerRequest],
    executors: &[ExecutorSnapshot],
    geo: Option<&GeoOptimizer>,
    penalty_weight: f64,
    max_distance_km: f64,
) -> f64 {
    assignment
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.map(|j| (i, j)))
        .map(|(i, j)| pair_score(&requests[i], &executors[j], geo, penalty_weight, max_distance_km))
        .sum()
}
