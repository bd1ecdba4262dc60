//! Greedy batch assignment: highest priority first, best feasible executor
//! each time. O(R·E).

use crate::model::OptimizerRequest;
use crate::objective::{pair_score, AssignmentVector};
use dispatch_directory::ExecutorSnapshot;
use dispatch_geo::GeoOptimizer;

pub fn run(
    requests: &[OptimizerRequest],
    executors: &[ExecutorSnapshot],
    geo: Option<&GeoOptimizer>,
    penalty_weight: f64,
    max_distance_km: f64,
) -> AssignmentVector {
    let mut order: Vec<usize> = (0..requests.len()).collect();
    order.sort_by(|&a, &b| {
        requests[b]
            .priority
            .cmp(&requests[a].priority)
            .then_with(|| requests[a].sequence.cmp(&requests[b].sequence))
    });

    let remaining_capacity: Vec<u32> = executors
        .iter()
        .map(|e| e.capacity.saturating_sub(e.current_workload))
        .collect();
    let mut used = vec![0u32; executors.len()];
    let mut assignment: AssignmentVector = vec![None; requests.len()];

    for i in order {
        let best = executors
            .iter()
            .enumerate()
            .filter(|(j, _)| used[*j] < remaining_capacity[*j])
            .map(|(j, executor)| {
                let score = pair_score(&requests[i], executor, geo, penalty_weight, max_distance_km);
                (j, score)
            })
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap());

        if let Some((j, _)) = best {
            assignment[i] = Some(j);
            used[j] += 1;
        }
    }

    assignment
}
