//! Simulated annealing over the full assignment vector. Neighbor moves are
//! a swap of two requests' executors or a single request's reassignment;
//! acceptance follows the Metropolis criterion `exp(-delta / T)`.

use crate::greedy;
use crate::model::OptimizerRequest;
use crate::objective::{is_feasible, total_objective, AssignmentVector};
use dispatch_directory::ExecutorSnapshot;
use dispatch_geo::GeoOptimizer;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Outcome of one SA run: the best vector found and how many iterations it
/// actually ran before stopping (cap or `cooled below T_min` or cancelled).
pub struct Outcome {
    pub assignment: AssignmentVector,
    pub objective: f64,
    pub iterations: usize,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    requests: &[OptimizerRequest],
    executors: &[ExecutorSnapshot],
    geo: Option<&GeoOptimizer>,
    penalty_weight: f64,
    max_distance_km: f64,
    seed: u64,
    iteration_cap: usize,
    t0: f64,
    alpha: f64,
    t_min: f64,
    seed_assignment: Option<AssignmentVector>,
    is_cancelled: &dyn Fn() -> bool,
) -> Outcome {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut current =
        seed_assignment.unwrap_or_else(|| greedy::run(requests, executors, geo, penalty_weight, max_distance_km));
    let mut current_objective = total_objective(&current, requests, executors, geo, penalty_weight, max_distance_km);

    let mut best = current.clone();
    let mut best_objective = current_objective;

    let mut temperature = t0;
    let mut iterations = 0;

    while iterations < iteration_cap && temperature > t_min {
        if is_cancelled() {
            break;
        }

        if let Some(candidate) = propose_neighbor(&current, requests.len(), executors, &mut rng) {
            let candidate_objective =
                total_objective(&candidate, requests, executors, geo, penalty_weight, max_distance_km);
            let delta = current_objective - candidate_objective;

            let accept = delta <= 0.0 || rng.random::<f64>() < (-delta / temperature).exp();

            if accept {
                current = candidate;
                current_objective = candidate_objective;

                if current_objective > best_objective {
                    best = current.clone();
                    best_objective = current_objective;
                }
            }
        }

        temperature *= alpha;
        iterations += 1;
    }

    Outcome {
        assignment: best,
        objective: best_objective,
        iterations,
    }
}

/// Either swaps two requests' executor assignments or moves one request to
/// a random different executor, rejecting the move if it breaks capacity.
fn propose_neighbor(
    current: &AssignmentVector,
    request_count: usize,
    executors: &[ExecutorSnapshot],
    rng: &mut StdRng,
) -> Option<AssignmentVector> {
    if request_count == 0 || executors.is_empty() {
        return None;
    }

    let mut candidate = current.clone();

    if request_count >= 2 && rng.random::<bool>() {
        let i = rng.random_range(0..request_count);
        let j = rng.random_range(0..request_count);
        candidate.swap(i, j);
    } else {
        let i = rng.random_range(0..request_count);
        let new_executor = rng.random_range(0..executors.len());
        candidate[i] = Some(new_executor);
    }

    is_feasible(&candidate, executors).then_some(candidate)
}
