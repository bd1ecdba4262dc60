//! Hybrid strategy: genetic algorithm for global exploration over half the
//! iteration budget, then simulated annealing seeded by the GA champion for
//! the remainder.

use crate::genetic;
use crate::model::OptimizerRequest;
use crate::objective::AssignmentVector;
use crate::simulated_annealing;
use dispatch_directory::ExecutorSnapshot;
use dispatch_geo::GeoOptimizer;

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
    budget: usize,
    population_size: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    elite_size: usize,
    t0: f64,
    alpha: f64,
    t_min: f64,
    is_cancelled: &dyn Fn() -> bool,
) -> Outcome {
    let half = (budget / 2).max(1);

    let ga = genetic::run(
        requests,
        executors,
        geo,
        penalty_weight,
        max_distance_km,
        seed,
        half,
        population_size,
        mutation_rate,
        crossover_rate,
        elite_size,
        is_cancelled,
    );

    let sa_budget = budget.saturating_sub(ga.generations).max(1);

    let sa = simulated_annealing::run(
        requests,
        executors,
        geo,
        penalty_weight,
        max_distance_km,
        seed,
        sa_budget,
        t0,
        alpha,
        t_min,
        Some(ga.assignment),
        is_cancelled,
    );

    Outcome {
        assignment: sa.assignment,
        objective: sa.objective,
        iterations: ga.generations + sa.iterations,
    }
}
