//! Generational loop.
//!
//! [`Population`] owns one generation of agents and drives it tick by tick:
//! step every agent → once all are terminal, score → rank → select → breed
//! → replace → repeat.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::PopulationConfig;
use super::selection::MatingPool;
use crate::agent::{AgentSnapshot, FitnessConfig, Finder, Outcome};
use crate::environment::Environment;
use crate::error::{ConfigError, PolicyError, Result};
use crate::rng::{create_rng, derive_rng, PathRng};

/// Summary of one finished generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 1-based index of the generation these numbers describe.
    pub generation: usize,
    pub average_fitness: f64,
    pub best_fitness: f64,
    pub worst_fitness: f64,
    pub completed: usize,
    pub crashed: usize,
    pub too_old: usize,
    /// Number of parents the next generation was bred from.
    pub mating_pool: usize,
}

/// What a single [`Population::tick`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Agents were stepped; `alive` of them are still moving.
    Stepped { alive: usize },
    /// Every agent had stopped, so a new generation was bred.
    GenerationCompleted(GenerationStats),
}

/// Result of [`Population::evolve`].
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Generations completed during this call.
    pub generations: usize,

    /// Whether the run was stopped by the cancel flag.
    pub cancelled: bool,

    /// Statistics for every generation completed during this call.
    pub history: Vec<GenerationStats>,
}

impl EvolutionResult {
    /// Highest single-agent fitness seen during the call.
    pub fn best_fitness(&self) -> Option<f64> {
        self.history
            .iter()
            .map(|s| s.best_fitness)
            .max_by(f64::total_cmp)
    }

    /// Average fitness of each generation, in order.
    pub fn average_fitness_history(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.average_fitness).collect()
    }
}

/// A fixed-size set of agents evolving across generations.
///
/// # Usage
///
/// ```
/// use ga_pathfinder::environment::{Border, Environment, Target};
/// use ga_pathfinder::ga::{Population, PopulationConfig};
/// use ga_pathfinder::Vector2D;
///
/// let env = Environment::new(
///     Border::new(Vector2D::new(20.0, 20.0), Vector2D::new(480.0, 480.0)),
///     Target::default_radius(Vector2D::new(450.0, 250.0)),
///     Vec::new(),
/// );
/// let config = PopulationConfig::default()
///     .with_population_size(10)
///     .with_lifespan(50)
///     .with_seed(42);
///
/// let mut population = Population::new(config).unwrap();
/// let stats = population.run_generation(&env).unwrap();
/// assert_eq!(stats.generation, 1);
/// assert_eq!(population.agents().len(), 10);
/// ```
#[derive(Debug)]
pub struct Population {
    config: PopulationConfig,
    agents: Vec<Finder>,
    generation: usize,
    rng: PathRng,
    history: Vec<GenerationStats>,
}

impl Population {
    /// Validates `config` and creates the first, random generation.
    ///
    /// # Errors
    /// [`ConfigError`] if the configuration is invalid.
    pub fn new(config: PopulationConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let agents = (0..config.population_size)
            .map(|_| {
                Finder::random(
                    &config.policy,
                    config.lifespan,
                    config.start_position,
                    &mut rng,
                )
            })
            .collect::<std::result::Result<Vec<_>, PolicyError>>()
            .map_err(ConfigError::from)?;

        debug!(
            size = config.population_size,
            lifespan = config.lifespan,
            mating_pool = config.mating_pool_size(),
            "population created"
        );

        Ok(Self {
            config,
            agents,
            generation: 0,
            rng,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    /// Configured number of agents per generation.
    pub fn size(&self) -> usize {
        self.config.population_size
    }

    pub fn lifespan(&self) -> usize {
        self.config.lifespan
    }

    /// Agents of the current generation.
    pub fn agents(&self) -> &[Finder] {
        &self.agents
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Read-only state of every current agent, for drawing.
    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents.iter().map(Finder::snapshot).collect()
    }

    /// Number of current agents still moving.
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    /// Average fitness of the last completed generation.
    pub fn average_fitness(&self) -> Option<f64> {
        self.last_generation().map(|s| s.average_fitness)
    }

    pub fn last_generation(&self) -> Option<&GenerationStats> {
        self.history.last()
    }

    /// Statistics of every completed generation.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Advances the simulation by one tick.
    ///
    /// If any agent is still alive, every agent is stepped once. Otherwise
    /// the generation boundary runs instead and the agent set is replaced.
    ///
    /// # Errors
    /// Propagates policy recombination errors; the current generation is
    /// left untouched when breeding fails.
    pub fn tick(&mut self, environment: &Environment) -> Result<Tick> {
        if self.alive_count() == 0 {
            return self
                .advance_generation(environment)
                .map(Tick::GenerationCompleted);
        }
        step_all(&mut self.agents, environment, self.config.parallel);
        Ok(Tick::Stepped {
            alive: self.alive_count(),
        })
    }

    /// Ticks until the current generation has been replaced.
    pub fn run_generation(&mut self, environment: &Environment) -> Result<GenerationStats> {
        loop {
            if let Tick::GenerationCompleted(stats) = self.tick(environment)? {
                return Ok(stats);
            }
        }
    }

    /// Runs up to `max_generations` generations.
    ///
    /// If `cancel` is `Some` and the flag becomes `true`, evolution stops at
    /// the next tick and the partial generation is kept as is.
    pub fn evolve(
        &mut self,
        environment: &Environment,
        max_generations: usize,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolutionResult> {
        let mut history = Vec::new();
        let mut cancelled = false;

        while history.len() < max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Tick::GenerationCompleted(stats) = self.tick(environment)? {
                history.push(stats);
            }
        }

        debug!(generations = history.len(), cancelled, "evolution stopped");
        Ok(EvolutionResult {
            generations: history.len(),
            cancelled,
            history,
        })
    }

    /// Scores, ranks and replaces the current generation.
    ///
    /// Must only run once every agent is terminal.
    fn advance_generation(&mut self, environment: &Environment) -> Result<GenerationStats> {
        score_all(
            &mut self.agents,
            environment,
            &self.config.fitness,
            self.config.parallel,
        );
        self.agents.sort_by(|a, b| fitness_of(b).total_cmp(&fitness_of(a)));

        let stats = self.summarize();
        let pool = MatingPool::from_ranked(&self.agents, stats.mating_pool)?;
        let seed: u64 = self.rng.random();
        let children = breed_all(
            &pool,
            self.config.population_size,
            self.config.mutation_rate,
            seed,
            self.config.parallel,
        )?;

        self.agents = children;
        self.generation += 1;
        self.history.push(stats.clone());

        info!(
            generation = stats.generation,
            average_fitness = stats.average_fitness,
            best_fitness = stats.best_fitness,
            completed = stats.completed,
            crashed = stats.crashed,
            too_old = stats.too_old,
            "generation complete"
        );
        Ok(stats)
    }

    /// Statistics of the scored, ranked current generation.
    fn summarize(&self) -> GenerationStats {
        let n = self.agents.len();
        let total: f64 = self.agents.iter().map(fitness_of).sum();
        let count = |outcome: Outcome| {
            self.agents
                .iter()
                .filter(|a| a.outcome() == outcome)
                .count()
        };
        GenerationStats {
            generation: self.generation + 1,
            average_fitness: total / n as f64,
            best_fitness: self.agents.first().map(fitness_of).unwrap_or(f64::NAN),
            worst_fitness: self.agents.last().map(fitness_of).unwrap_or(f64::NAN),
            completed: count(Outcome::Completed),
            crashed: count(Outcome::Crashed),
            too_old: count(Outcome::TooOld),
            mating_pool: self.config.mating_pool_size(),
        }
    }
}

fn fitness_of(agent: &Finder) -> f64 {
    agent.fitness().unwrap_or(f64::NEG_INFINITY)
}

// ============================================================================
// Data-parallel helpers
// ============================================================================

#[cfg(feature = "parallel")]
fn step_all(agents: &mut [Finder], environment: &Environment, parallel: bool) {
    if parallel {
        agents.par_iter_mut().for_each(|a| {
            a.step(environment);
        });
    } else {
        for a in agents.iter_mut() {
            a.step(environment);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn step_all(agents: &mut [Finder], environment: &Environment, _parallel: bool) {
    for a in agents.iter_mut() {
        a.step(environment);
    }
}

#[cfg(feature = "parallel")]
fn score_all(agents: &mut [Finder], environment: &Environment, fitness: &FitnessConfig, parallel: bool) {
    if parallel {
        agents.par_iter_mut().for_each(|a| {
            a.calculate_fitness(environment, fitness);
        });
    } else {
        for a in agents.iter_mut() {
            a.calculate_fitness(environment, fitness);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn score_all(agents: &mut [Finder], environment: &Environment, fitness: &FitnessConfig, _parallel: bool) {
    for a in agents.iter_mut() {
        a.calculate_fitness(environment, fitness);
    }
}

/// Breeds `size` children, child `i` from its own stream `derive_rng(seed, i)`.
#[cfg(feature = "parallel")]
fn breed_all(
    pool: &MatingPool<'_>,
    size: usize,
    mutation_rate: f64,
    seed: u64,
    parallel: bool,
) -> std::result::Result<Vec<Finder>, PolicyError> {
    let breed = |i: usize| pool.breed(mutation_rate, &mut derive_rng(seed, i));
    if parallel {
        (0..size).into_par_iter().map(breed).collect()
    } else {
        (0..size).map(breed).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn breed_all(
    pool: &MatingPool<'_>,
    size: usize,
    mutation_rate: f64,
    seed: u64,
    _parallel: bool,
) -> std::result::Result<Vec<Finder>, PolicyError> {
    (0..size)
        .map(|i| pool.breed(mutation_rate, &mut derive_rng(seed, i)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
