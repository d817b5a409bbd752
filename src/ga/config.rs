//! Population configuration.
//!
//! [`PopulationConfig`] holds everything that stays fixed across
//! generations: sizes, rates, the policy recipe and the fitness weights.

use crate::agent::FitnessConfig;
use crate::error::ConfigError;
use crate::policy::PolicyKind;
use crate::vector::Vector2D;

/// Configuration for a [`Population`](super::Population).
///
/// # Defaults
///
/// ```
/// use ga_pathfinder::ga::PopulationConfig;
///
/// let config = PopulationConfig::default();
/// assert_eq!(config.population_size, 35);
/// assert_eq!(config.lifespan, 250);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use ga_pathfinder::ga::PopulationConfig;
/// use ga_pathfinder::policy::PolicyKind;
///
/// let config = PopulationConfig::default()
///     .with_population_size(100)
///     .with_policy(PolicyKind::GeneTable { magnitude: 0.5 })
///     .with_mating_fraction(0.25)
///     .with_mutation_rate(0.02)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationConfig {
    /// Number of agents in every generation.
    pub population_size: usize,

    /// Maximum number of steps an agent lives.
    pub lifespan: usize,

    /// Where every agent starts.
    pub start_position: Vector2D,

    /// Top fraction of a ranked generation kept as the mating pool (0.0–1.0].
    ///
    /// The pool size is rounded up, so it is never empty.
    pub mating_fraction: f64,

    /// Per-gene (gene table) or per-matrix sample (network) mutation rate.
    pub mutation_rate: f64,

    /// Which genetic representation new agents use.
    pub policy: PolicyKind,

    /// Fitness weights.
    pub fitness: FitnessConfig,

    /// Whether to step agents and breed children in parallel using rayon.
    ///
    /// Ignored when the `parallel` feature is off.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            population_size: 35,
            lifespan: 250,
            start_position: Vector2D::new(50.0, 250.0),
            mating_fraction: 0.2,
            mutation_rate: 0.05,
            policy: PolicyKind::default(),
            fitness: FitnessConfig::default(),
            parallel: true,
            seed: None,
        }
    }
}

impl PopulationConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the lifespan.
    pub fn with_lifespan(mut self, steps: usize) -> Self {
        self.lifespan = steps;
        self
    }

    /// Sets the position every agent starts from.
    pub fn with_start_position(mut self, start: Vector2D) -> Self {
        self.start_position = start;
        self
    }

    /// Sets the mating fraction, clamped to `[0, 1]`.
    pub fn with_mating_fraction(mut self, fraction: f64) -> Self {
        self.mating_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the policy representation for new agents.
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the fitness weights.
    pub fn with_fitness(mut self, fitness: FitnessConfig) -> Self {
        self.fitness = fitness;
        self
    }

    /// Enables or disables parallel stepping and breeding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of parents kept each generation: `ceil(size * fraction)`,
    /// at least one and at most the population size.
    pub fn mating_pool_size(&self) -> usize {
        // Tolerance keeps products like 35 * 0.2 from rounding up past 7.
        let raw = self.population_size as f64 * self.mating_fraction;
        ((raw - 1e-9).ceil() as usize).clamp(1, self.population_size.max(1))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.lifespan == 0 {
            return Err(ConfigError::ZeroLifespan);
        }
        if !(self.mating_fraction > 0.0 && self.mating_fraction <= 1.0) {
            return Err(ConfigError::InvalidMatingFraction(self.mating_fraction));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if !self.start_position.is_finite() {
            return Err(ConfigError::InvalidStart(self.start_position));
        }
        self.policy.validate()?;
        self.fitness.validate()
    }
}
