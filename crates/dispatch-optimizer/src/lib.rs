//! Batch assignment optimizers over requests x executor snapshots: greedy,
//! simulated annealing, genetic, and a GA-then-SA hybrid, all deterministic
//! given a seed and all `ServiceMode`-scaled.
//!
//! - [`config`] — `Algorithm`, `OptimizerConfig`.
//! - [`model`] — `OptimizerRequest`, `Assignment`, `OptimizationResult`.
//! - [`objective`] — the scored, capacity-constrained objective function.
//! - [`cancellation`] — the flag optimizers poll between iterations.

pub mod cancellation;
pub mod config;
pub mod events;
pub mod genetic;
pub mod greedy;
pub mod hybrid;
pub mod model;
pub mod objective;
pub mod simulated_annealing;

pub use cancellation::CancellationToken;
pub use config::{Algorithm, OptimizerConfig, OptimizerConfigBuilder};
pub use events::OptimizerEvent;
pub use model::{Assignment, OptimizationResult, OptimizerRequest};

use dispatch_core::events::{EventListener, EventListeners};
use dispatch_core::mode::ServiceMode;
use dispatch_directory::ExecutorSnapshot;
use dispatch_geo::GeoOptimizer;
use objective::total_objective;
use std::time::Instant;

/// Entry point for batch assignment: picks the configured algorithm, scales
/// its iteration budget by `ServiceMode`, downgrades heavy algorithms to
/// greedy when the mode forbids them, and turns the winning assignment
/// vector into an `OptimizationResult`.
pub struct BatchOptimizer {
    config: OptimizerConfig,
    geo: Option<GeoOptimizer>,
    max_distance_km: f64,
    event_listeners: EventListeners<OptimizerEvent>,
}

impl BatchOptimizer {
    pub fn new(config: OptimizerConfig, geo: Option<GeoOptimizer>, max_distance_km: f64) -> Self {
        Self {
            config,
            geo,
            max_distance_km,
            event_listeners: EventListeners::new(),
        }
    }

    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: EventListener<OptimizerEvent> + 'static,
    {
        self.event_listeners.add(listener);
    }

    pub fn optimize(
        &self,
        requests: &[OptimizerRequest],
        executors: &[ExecutorSnapshot],
        mode: ServiceMode,
        cancellation: &CancellationToken,
    ) -> OptimizationResult {
        let started = Instant::now();

        let algorithm = if mode.allows_heavy_optimizers() {
            self.config.algorithm
        } else {
            Algorithm::Greedy
        };

        let is_cancelled = || cancellation.is_cancelled();
        let geo = self.geo.as_ref();
        let penalty_weight = self.config.inter_district_penalty_weight;
        let max_distance_km = self.max_distance_km;

        let (assignment_vector, iterations) = match algorithm {
            Algorithm::Greedy => {
                let assignment = greedy::run(requests, executors, geo, penalty_weight, max_distance_km);
                (assignment, 1)
            }
            Algorithm::SimulatedAnnealing => {
                let iteration_cap = mode.scale_iterations(self.config.iterations);
                let outcome = simulated_annealing::run(
                    requests,
                    executors,
                    geo,
                    penalty_weight,
                    max_distance_km,
                    self.config.seed,
                    iteration_cap,
                    self.config.t0,
                    self.config.alpha,
                    self.config.t_min,
                    None,
                    &is_cancelled,
                );
                (outcome.assignment, outcome.iterations)
            }
            Algorithm::Genetic => {
                let generation_cap = mode.scale_iterations(self.config.iterations);
                let outcome = genetic::run(
                    requests,
                    executors,
                    geo,
                    penalty_weight,
                    max_distance_km,
                    self.config.seed,
                    generation_cap,
                    self.config.population_size,
                    self.config.mutation_rate,
                    self.config.crossover_rate,
                    self.config.elite_size,
                    &is_cancelled,
                );
                (outcome.assignment, outcome.generations)
            }
            Algorithm::Hybrid => {
                let budget = mode.scale_iterations(self.config.iterations);
                let outcome = hybrid::run(
                    requests,
                    executors,
                    geo,
                    penalty_weight,
                    max_distance_km,
                    self.config.seed,
                    budget,
                    self.config.population_size,
                    self.config.mutation_rate,
                    self.config.crossover_rate,
                    self.config.elite_size,
                    self.config.t0,
                    self.config.alpha,
                    self.config.t_min,
                    &is_cancelled,
                );
                (outcome.assignment, outcome.iterations)
            }
        };

        let optimization_score =
            total_objective(&assignment_vector, requests, executors, geo, penalty_weight, max_distance_km);

        let assignments: Vec<Assignment> = assignment_vector
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|j| (i, j)))
            .map(|(i, j)| Assignment {
                request_id: requests[i].request_id.clone(),
                executor_id: executors[j].executor_id.clone(),
                score: objective::pair_score(&requests[i], &executors[j], geo, penalty_weight, max_distance_km),
            })
            .collect();

        let elapsed_ms = started.elapsed().as_millis() as u64;

        if cancellation.is_cancelled() {
            self.event_listeners.emit(&OptimizerEvent::Cancelled {
                algorithm: algorithm.as_str(),
                iterations,
                timestamp: Instant::now(),
            });
        } else {
            self.event_listeners.emit(&OptimizerEvent::RunCompleted {
                algorithm: algorithm.as_str(),
                optimization_score,
                iterations,
                elapsed_ms,
                timestamp: Instant::now(),
            });
        }

        OptimizationResult {
            assignments,
            optimization_score,
            algorithm_used: algorithm.as_str(),
            iterations,
            elapsed_ms,
        }
    }
}
