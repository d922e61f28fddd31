//! MOEA configuration.
//!
//! [`MoeaConfig`] holds every parameter of the evolutionary search: the
//! objective mode, the operator strategies, and the termination rules.

use crate::community::{MutationStrategy, ObjectiveMode, SeedingStrategy};
use crate::error::{BicommError, Result};

/// Crossover operator applied to pairs of parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Each locus taken from either parent with probability 0.5.
    #[default]
    Uniform,
    /// The segment between two cut points is swapped.
    TwoPoint,
}

/// Configuration for the multi-objective evolutionary search.
///
/// # Defaults
///
/// ```
/// use u_bicomm::moea::MoeaConfig;
///
/// let config = MoeaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 1000);
/// assert!(config.keep_history);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bicomm::community::{MutationStrategy, ObjectiveMode};
/// use u_bicomm::moea::MoeaConfig;
///
/// let config = MoeaConfig::default()
///     .with_population_size(60)
///     .with_mode(ObjectiveMode::FourD)
///     .with_mutation(MutationStrategy::Uniform)
///     .with_seed(7)
///     .with_history(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoeaConfig {
    /// Number of genomes per generation.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Objectives to optimize.
    pub mode: ObjectiveMode,

    /// Mutation applied to every offspring.
    pub mutation: MutationStrategy,

    /// How the first population is built.
    pub seeding: SeedingStrategy,

    /// Crossover operator.
    pub crossover: Crossover,

    /// Probability of recombining a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, the children are clones of the parents.
    pub crossover_rate: f64,

    /// Number of generations without improvement of the best first
    /// objective before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Minimum absolute improvement of the best first objective that resets
    /// the stagnation counter.
    pub convergence_threshold: f64,

    /// Whether to evaluate and mutate in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to retain a `(evaluations, objectives)` snapshot of every
    /// generation.
    pub keep_history: bool,

    /// Optional wall-clock time limit in milliseconds, checked at the start
    /// of each generation.
    pub time_limit_ms: Option<u64>,
}

impl Default for MoeaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 1000,
            mode: ObjectiveMode::default(),
            mutation: MutationStrategy::default(),
            seeding: SeedingStrategy::default(),
            crossover: Crossover::default(),
            crossover_rate: 0.1,
            stagnation_limit: 0,
            convergence_threshold: 0.0,
            parallel: true,
            seed: None,
            keep_history: true,
            time_limit_ms: None,
        }
    }
}

impl MoeaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the objective mode.
    pub fn with_mode(mut self, mode: ObjectiveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation(mut self, mutation: MutationStrategy) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the seeding strategy.
    pub fn with_seeding(mut self, seeding: SeedingStrategy) -> Self {
        self.seeding = seeding;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the convergence threshold.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold.max(0.0);
        self
    }

    /// Enables or disables parallel evaluation and mutation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables per-generation history.
    pub fn with_history(mut self, keep: bool) -> Self {
        self.keep_history = keep;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Preset for quick exploration.
    ///
    /// - Population: 40, Generations: 50
    /// - Stagnation limit: 15, Convergence threshold: 0.001
    pub fn fast() -> Self {
        Self {
            population_size: 40,
            max_generations: 50,
            stagnation_limit: 15,
            convergence_threshold: 0.001,
            ..Self::default()
        }
    }

    /// Preset balancing front quality and run time.
    ///
    /// - Population: 100, Generations: 200
    /// - Stagnation limit: 40, Convergence threshold: 0.0005
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            max_generations: 200,
            stagnation_limit: 40,
            convergence_threshold: 0.0005,
            ..Self::default()
        }
    }

    /// Preset for the best fronts on larger graphs.
    ///
    /// - Population: 200, Generations: 500
    /// - Stagnation limit: 80, Convergence threshold: 0.0001
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            max_generations: 500,
            stagnation_limit: 80,
            convergence_threshold: 0.0001,
            ..Self::default()
        }
    }

    /// Picks a preset from the vertex count of the graph.
    ///
    /// - `vertex_count < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ vertex_count < 500` → [`balanced()`](Self::balanced)
    /// - `vertex_count ≥ 500` → [`quality()`](Self::quality)
    pub fn auto_select(vertex_count: usize) -> Self {
        if vertex_count < 50 {
            Self::fast()
        } else if vertex_count < 500 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`BicommError::Config`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(BicommError::config("population_size must be at least 2"));
        }
        if self.max_generations == 0 {
            return Err(BicommError::config("max_generations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(BicommError::config("crossover_rate must lie in [0, 1]"));
        }
        if self.convergence_threshold < 0.0 {
            return Err(BicommError::config(
                "convergence_threshold must be non-negative",
            ));
        }
        if let MutationStrategy::PolynomialInt { eta } = self.mutation {
            if !(eta.is_finite() && eta >= 0.0) {
                return Err(BicommError::config(
                    "polynomial mutation eta must be finite and non-negative",
                ));
            }
        }
        if self.time_limit_ms == Some(0) {
            return Err(BicommError::config("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}
