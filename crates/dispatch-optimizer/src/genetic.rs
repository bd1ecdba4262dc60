//! Genetic algorithm over assignment vectors: tournament selection, uniform
//! crossover with capacity repair, per-gene mutation, elitism.

use crate::greedy;
use crate::model::OptimizerRequest;
use crate::objective::{is_feasible, total_objective, AssignmentVector};
use dispatch_directory::ExecutorSnapshot;
use dispatch_geo::GeoOptimizer;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

pub struct Outcome {
    pub assignment: AssignmentVector,
    pub objective: f64,
    pub generations: usize,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    requests: &[OptimizerRequest],
    executors: &[ExecutorSnapshot],
    geo: Option<&GeoOptimizer>,
    penalty_weight: f64,
    max_distance_km: f64,
    seed: u64,
    generation_cap: usize,
    population_size: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    elite_size: usize,
    is_cancelled: &dyn Fn() -> bool,
) -> Outcome {
    let mut rng = StdRng::seed_from_u64(seed);

    if requests.is_empty() || executors.is_empty() {
        return Outcome {
            assignment: vec![None; requests.len()],
            objective: 0.0,
            generations: 0,
        };
    }

    let mut population = seed_population(requests, executors, geo, penalty_weight, max_distance_km, population_size, &mut rng);
    let mut best = population[0].clone();
    let mut best_objective = total_objective(&best, requests, executors, geo, penalty_weight, max_distance_km);

    let mut generations = 0;

    while generations < generation_cap {
        if is_cancelled() {
            break;
        }

        let mut scored: Vec<(AssignmentVector, f64)> = population
            .into_iter()
            .map(|individual| {
                let objective = total_objective(&individual, requests, executors, geo, penalty_weight, max_distance_km);
                (individual, objective)
            })
            .collect();
        scored.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap());

        if scored[0].1 > best_objective {
            best = scored[0].0.clone();
            best_objective = scored[0].1;
        }

        let elites: Vec<AssignmentVector> = scored.iter().take(elite_size).map(|(a, _)| a.clone()).collect();

        let mut next_generation = elites;
        while next_generation.len() < population_size {
            let parent1 = tournament_select(&scored, &mut rng);
            let parent2 = tournament_select(&scored, &mut rng);

            let child = if rng.random::<f64>() < crossover_rate {
                uniform_crossover(parent1, parent2, &mut rng)
            } else {
                parent1.clone()
            };

            let mutated = mutate(child, executors.len(), mutation_rate, &mut rng);
            let repaired = repair(mutated, executors, &mut rng);
            next_generation.push(repaired);
        }

        population = next_generation;
        generations += 1;
    }

    Outcome {
        assignment: best,
        objective: best_objective,
        generations,
    }
}

fn seed_population(
    requests: &[OptimizerRequest],
    executors: &[ExecutorSnapshot],
    geo: Option<&GeoOptimizer>,
    penalty_weight: f64,
    max_distance_km: f64,
    population_size: usize,
    rng: &mut StdRng,
) -> Vec<AssignmentVector> {
    let seed = greedy::run(requests, executors, geo, penalty_weight, max_distance_km);
    let mut population = vec![seed.clone()];

    while population.len() < population_size.max(1) {
        let mutated = mutate(seed.clone(), executors.len(), 0.3, rng);
        population.push(repair(mutated, executors, rng));
    }

    population
}

fn tournament_select<'a>(scored: &'a [(AssignmentVector, f64)], rng: &mut StdRng) -> &'a AssignmentVector {
    let a = rng.random_range(0..scored.len());
    let b = rng.random_range(0..scored.len());
    if scored[a].1 >= scored[b].1 {
        &scored[a].0
    } else {
        &scored[b].0
    }
}

fn uniform_crossover(parent1: &AssignmentVector, parent2: &AssignmentVector, rng: &mut StdRng) -> AssignmentVector {
    parent1
        .iter()
        .zip(parent2.iter())
        .map(|(g1, g2)| if rng.random::<bool>() { *g1 } else { *g2 })
        .collect()
}

fn mutate(mut individual: AssignmentVector, executor_count: usize, mutation_rate: f64, rng: &mut StdRng) -> AssignmentVector {
    if executor_count == 0 {
        return individual;
    }
    for gene in individual.iter_mut() {
        if rng.random::<f64>() < mutation_rate {
            *gene = Some(rng.random_range(0..executor_count));
        }
    }
    individual
}

/// Restores capacity feasibility by unassigning the most recently-added
/// overflow for any executor over its remaining capacity.
fn repair(mut individual: AssignmentVector, executors: &[ExecutorSnapshot], _rng: &mut StdRng) -> AssignmentVector {
    let remaining: Vec<u32> = executors
        .iter()
        .map(|e| e.capacity.saturating_sub(e.current_workload))
        .collect();
    let mut used = vec![0u32; executors.len()];

    for gene in individual.iter_mut() {
        if let Some(j) = *gene {
            if used[j] < remaining[j] {
                used[j] += 1;
            } else {
                *gene = None;
            }
        }
    }

    debug_assert!(is_feasible(&individual, executors));
    individual
}
