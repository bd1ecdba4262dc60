//! Optimizer selection and the knobs each algorithm reads.

/// Which assignment algorithm to run. `as_str()` is the exact value
/// reported as `algorithm_used`; no other aliases are ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Greedy,
    SimulatedAnnealing,
    Genetic,
    Hybrid,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::SimulatedAnnealing => "simulated_annealing",
            Algorithm::Genetic => "genetic",
            Algorithm::Hybrid => "hybrid",
        }
    }
}

/// Tunables for every algorithm. Unused fields for a given `algorithm` are
/// simply ignored rather than split into per-algorithm structs, matching
/// spec's "explicit configuration struct with an enumerated set of knobs".
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub algorithm: Algorithm,
    pub seed: u64,
    /// SA iteration cap / GA generation cap (pre-`ServiceMode` scaling).
    pub iterations: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elite_size: usize,
    pub population_size: usize,
    pub t0: f64,
    pub alpha: f64,
    pub t_min: f64,
    pub inter_district_penalty_weight: f64,
}

impl OptimizerConfig {
    pub fn builder() -> OptimizerConfigBuilder {
        OptimizerConfigBuilder::new()
    }
}

pub struct OptimizerConfigBuilder {
    algorithm: Algorithm,
    seed: u64,
    iterations: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    elite_size: usize,
    population_size: usize,
    t0: f64,
    alpha: f64,
    t_min: f64,
    inter_district_penalty_weight: f64,
}

impl OptimizerConfigBuilder {
    pub fn new() -> Self {
        Self {
            algorithm: Algorithm::Greedy,
            seed: 0,
            iterations: 1000,
            mutation_rate: 0.05,
            crossover_rate: 0.7,
            elite_size: 2,
            population_size: 30,
            t0: 100.0,
            alpha: 0.95,
            t_min: 0.1,
            inter_district_penalty_weight: 0.1,
        }
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn elite_size(mut self, size: usize) -> Self {
        self.elite_size = size;
        self
    }

    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn t0(mut self, t0: f64) -> Self {
        self.t0 = t0;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn t_min(mut self, t_min: f64) -> Self {
        self.t_min = t_min;
        self
    }

    pub fn inter_district_penalty_weight(mut self, weight: f64) -> Self {
        self.inter_district_penalty_weight = weight;
        self
    }

    pub fn build(self) -> OptimizerConfig {
        OptimizerConfig {
            algorithm: self.algorithm,
            seed: self.seed,
            iterations: self.iterations,
            mutation_rate: self.mutation_rate,
            crossover_rate: self.crossover_rate,
            elite_size: self.elite_size,
            population_size: self.population_size,
            t0: self.t0,
            alpha: self.alpha,
            t_min: self.t_min,
            inter_district_penalty_weight: self.inter_district_penalty_weight,
        }
    }
}

impl Default for OptimizerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
