//! Simulated point-mass agents ("finders").
//!
//! A [`Finder`] integrates its own motion one step at a time, asks its
//! [`Policy`] for the next acceleration, and checks the [`Environment`] for
//! crashes and arrival. Once it reaches a terminal [`Outcome`] it stops
//! moving for the rest of the generation.

use rand::Rng;
use tracing::trace;

use crate::environment::Environment;
use crate::error::{ConfigError, PolicyError};
use crate::policy::{Policy, PolicyKind};
use crate::vector::Vector2D;

/// Diagonal of the 500×500 demo scene, the default inverse-distance scale.
pub const DEFAULT_DISTANCE_SCALE: f64 = 1.414 * 500.0;

/// How far an agent got this generation.
///
/// Outcomes are absorbing: once an agent leaves [`Outcome::Alive`] it never
/// changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    #[default]
    Alive,
    Completed,
    Crashed,
    TooOld,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Alive
    }
}

/// The distance component of the fitness score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceTerm {
    /// `scale / max(distance_to_target, min_distance)`.
    InverseToTarget { scale: f64, min_distance: f64 },
    /// `scale * distance_from_start`.
    DisplacementFromStart { scale: f64 },
}

impl Default for DistanceTerm {
    fn default() -> Self {
        DistanceTerm::InverseToTarget {
            scale: DEFAULT_DISTANCE_SCALE,
            min_distance: 1.0,
        }
    }
}

/// Weights of the fitness formula
///
/// ```text
/// fitness = alive_duration / lifespan + distance_term
///         - crash_penalty    · [crashed]
///         - too_old_penalty  · [too_old]
///         + completion_bonus · [completed]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessConfig {
    pub distance: DistanceTerm,
    pub crash_penalty: f64,
    pub too_old_penalty: f64,
    pub completion_bonus: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            distance: DistanceTerm::default(),
            crash_penalty: 2.0,
            too_old_penalty: 0.5,
            completion_bonus: 10.0,
        }
    }
}

impl FitnessConfig {
    /// Every weight must be finite and non-negative, and the inverse
    /// distance floor strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = |name: &'static str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidFitness { name, value })
            }
        };
        check("crash_penalty", self.crash_penalty)?;
        check("too_old_penalty", self.too_old_penalty)?;
        check("completion_bonus", self.completion_bonus)?;
        match self.distance {
            DistanceTerm::InverseToTarget {
                scale,
                min_distance,
            } => {
                check("scale", scale)?;
                if !(min_distance.is_finite() && min_distance > 0.0) {
                    return Err(ConfigError::InvalidFitness {
                        name: "min_distance",
                        value: min_distance,
                    });
                }
                Ok(())
            }
            DistanceTerm::DisplacementFromStart { scale } => check("scale", scale),
        }
    }
}

/// Read-only view of an agent for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub outcome: Outcome,
    pub step: usize,
}

/// One agent of a generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Finder {
    start: Vector2D,
    position: Vector2D,
    velocity: Vector2D,
    acceleration: Vector2D,
    lifespan: usize,
    policy: Policy,
    step: usize,
    alive_duration: usize,
    outcome: Outcome,
    fitness: Option<f64>,
}

impl Finder {
    /// An agent at rest at `start`.
    ///
    /// # Errors
    /// Fails if `policy` cannot drive `lifespan` steps, see
    /// [`Policy::check_lifespan`].
    pub fn new(policy: Policy, lifespan: usize, start: Vector2D) -> Result<Self, PolicyError> {
        policy.check_lifespan(lifespan)?;
        Ok(Self {
            start,
            position: start,
            velocity: Vector2D::ZERO,
            acceleration: Vector2D::ZERO,
            lifespan,
            policy,
            step: 0,
            alive_duration: 0,
            outcome: Outcome::Alive,
            fitness: None,
        })
    }

    /// An agent with a freshly drawn policy.
    pub fn random<R: Rng + ?Sized>(
        kind: &PolicyKind,
        lifespan: usize,
        start: Vector2D,
        rng: &mut R,
    ) -> Result<Self, PolicyError> {
        Self::new(kind.random(lifespan, rng)?, lifespan, start)
    }

    pub fn start(&self) -> Vector2D {
        self.start
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    pub fn acceleration(&self) -> Vector2D {
        self.acceleration
    }

    pub fn lifespan(&self) -> usize {
        self.lifespan
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Number of `step` calls so far, including no-op calls after the
    /// agent stopped.
    pub fn steps_taken(&self) -> usize {
        self.step
    }

    pub fn alive_duration(&self) -> usize {
        self.alive_duration
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_alive(&self) -> bool {
        self.outcome == Outcome::Alive
    }

    pub fn completed(&self) -> bool {
        self.outcome == Outcome::Completed
    }

    pub fn crashed(&self) -> bool {
        self.outcome == Outcome::Crashed
    }

    pub fn too_old(&self) -> bool {
        self.outcome == Outcome::TooOld
    }

    /// Fitness from the last [`calculate_fitness`](Self::calculate_fitness) call.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            position: self.position,
            velocity: self.velocity,
            outcome: self.outcome,
            step: self.step,
        }
    }

    /// Advances one simulation step and returns the resulting outcome.
    ///
    /// While alive: move by the velocity, accelerate, query the policy for
    /// the next acceleration, then test for a crash along the new velocity,
    /// then arrival, then age. After a terminal outcome only the step
    /// counter advances.
    pub fn step(&mut self, environment: &Environment) -> Outcome {
        if self.outcome.is_terminal() {
            self.step += 1;
            return self.outcome;
        }

        self.position = self.position.add(self.velocity);
        self.velocity = self.velocity.add(self.acceleration);
        self.acceleration = self
            .policy
            .acceleration(self.step, self.position, environment)
            .unwrap_or(Vector2D::ZERO);

        self.outcome = if environment.test_collision(self.position, self.velocity) {
            Outcome::Crashed
        } else if environment.test_finish(self.position) {
            Outcome::Completed
        } else {
            Outcome::Alive
        };

        self.alive_duration += 1;
        self.step += 1;

        if self.outcome == Outcome::Alive && self.step >= self.lifespan {
            self.outcome = Outcome::TooOld;
        }
        if self.outcome.is_terminal() {
            trace!(
                outcome = ?self.outcome,
                step = self.step,
                x = self.position.x,
                y = self.position.y,
                "finder stopped"
            );
        }
        self.outcome
    }

    /// Scores the agent's run and caches the result.
    ///
    /// Always finite: the inverse distance term is floored at
    /// `min_distance`.
    pub fn calculate_fitness(&mut self, environment: &Environment, config: &FitnessConfig) -> f64 {
        let mut fitness = self.alive_duration as f64 / self.lifespan as f64;
        fitness += match config.distance {
            DistanceTerm::InverseToTarget {
                scale,
                min_distance,
            } => {
                let remaining = self
                    .position
                    .distance_from(environment.target().position());
                scale / remaining.max(min_distance)
            }
            DistanceTerm::DisplacementFromStart { scale } => {
                scale * self.position.distance_from(self.start)
            }
        };
        fitness += match self.outcome {
            Outcome::Alive => 0.0,
            Outcome::Crashed => -config.crash_penalty,
            Outcome::TooOld => -config.too_old_penalty,
            Outcome::Completed => config.completion_bonus,
        };
        self.fitness = Some(fitness);
        fitness
    }

    /// A child of `self` and `partner`: crossover, then mutation at `mutation_rate`.
    ///
    /// The child starts where `self` started.
    ///
    /// # Errors
    /// Propagates policy recombination errors.
    pub fn breed<R: Rng + ?Sized>(
        &self,
        partner: &Finder,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Result<Finder, PolicyError> {
        let policy = self
            .policy
            .crossover(&partner.policy, rng)?
            .mutate(mutation_rate, rng);
        Finder::new(policy, self.lifespan, self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Border, Target, Wall};
    use crate::policy::GeneTable;
    use crate::rng::create_rng;

    fn v(x: f64, y: f64) -> Vector2D {
        Vector2D::new(x, y)
    }

    fn open_scene() -> Environment {
        Environment::new(
            Border::new(v(20.0, 20.0), v(480.0, 480.0)),
            Target::default_radius(v(450.0, 250.0)),
            Vec::new(),
        )
    }

    fn constant(lifespan: usize, gene: Vector2D) -> Finder {
        let table = GeneTable::from_genes(vec![gene; lifespan], 1.0).unwrap();
        Finder::new(table.into(), lifespan, v(50.0, 250.0)).unwrap()
    }

    #[test]
    fn test_lifespan_mismatch_rejected() {
        let table = GeneTable::from_genes(vec![Vector2D::ZERO; 10], 1.0).unwrap();
        assert_eq!(
            Finder::new(table.into(), 12, Vector2D::ZERO),
            Err(PolicyError::LifespanMismatch {
                expected: 12,
                actual: 10
            })
        );
    }

    #[test]
    fn test_integration_order() {
        let env = open_scene();
        let mut f = constant(10, v(1.0, 0.0));
        f.step(&env);
        // Acceleration only takes effect one step later.
        assert_eq!(f.position(), v(50.0, 250.0));
        assert_eq!(f.velocity(), Vector2D::ZERO);
        assert_eq!(f.acceleration(), v(1.0, 0.0));
        f.step(&env);
        assert_eq!(f.velocity(), v(1.0, 0.0));
        f.step(&env);
        assert_eq!(f.position(), v(51.0, 250.0));
        assert_eq!(f.velocity(), v(2.0, 0.0));
    }

    #[test]
    fn test_too_old_after_lifespan_steps() {
        let env = open_scene();
        let mut f = constant(5, Vector2D::ZERO);
        for _ in 0..4 {
            assert_eq!(f.step(&env), Outcome::Alive);
        }
        assert_eq!(f.step(&env), Outcome::TooOld);
        assert_eq!(f.alive_duration(), 5);
        // Terminal steps only advance the counter.
        assert_eq!(f.step(&env), Outcome::TooOld);
        assert_eq!(f.steps_taken(), 6);
        assert_eq!(f.alive_duration(), 5);
    }

    #[test]
    fn test_crash_is_absorbing() {
        let env = Environment::new(
            Border::new(v(20.0, 20.0), v(480.0, 480.0)),
            Target::default_radius(v(450.0, 250.0)),
            vec![Wall::new(v(60.0, 20.0), v(0.0, 460.0))],
        );
        let mut f = constant(100, v(1.0, 0.0));
        while f.is_alive() {
            f.step(&env);
        }
        assert!(f.crashed());
        let frozen = f.snapshot();
        for _ in 0..5 {
            f.step(&env);
        }
        assert_eq!(f.position(), frozen.position);
        assert_eq!(f.velocity(), frozen.velocity);
        assert_eq!(f.steps_taken(), frozen.step + 5);
    }

    #[test]
    fn test_completion() {
        let env = Environment::new(
            Border::new(v(20.0, 20.0), v(480.0, 480.0)),
            Target::new(v(60.0, 250.0), 5.0).unwrap(),
            Vec::new(),
        );
        let mut f = constant(100, v(1.0, 0.0));
        while f.is_alive() {
            f.step(&env);
        }
        assert!(f.completed());
        assert!(f.position().distance_from(v(60.0, 250.0)) <= 5.0);
    }

    #[test]
    fn test_fitness_rewards_completion_and_punishes_crashes() {
        let env = open_scene();
        let config = FitnessConfig::default();
        let mut base = constant(10, Vector2D::ZERO);
        base.alive_duration = 4;

        let mut alive = base.clone();
        let mut done = base.clone();
        done.outcome = Outcome::Completed;
        let mut crashed = base.clone();
        crashed.outcome = Outcome::Crashed;
        let mut old = base.clone();
        old.outcome = Outcome::TooOld;

        let f_alive = alive.calculate_fitness(&env, &config);
        let f_done = done.calculate_fitness(&env, &config);
        let f_crashed = crashed.calculate_fitness(&env, &config);
        let f_old = old.calculate_fitness(&env, &config);

        assert!(f_done > f_alive);
        assert!(f_crashed < f_alive);
        assert!((f_alive - f_old - 0.5).abs() < 1e-12);
        assert!((f_alive - f_crashed - 2.0).abs() < 1e-12);
        assert!((f_done - f_alive - 10.0).abs() < 1e-12);
        assert_eq!(alive.fitness(), Some(f_alive));
    }

    #[test]
    fn test_inverse_distance_is_finite_on_target() {
        let env = Environment::new(
            Border::new(v(20.0, 20.0), v(480.0, 480.0)),
            Target::point(v(50.0, 250.0)),
            Vec::new(),
        );
        let mut f = constant(10, Vector2D::ZERO);
        let fitness = f.calculate_fitness(&env, &FitnessConfig::default());
        assert!(fitness.is_finite());
        assert!((fitness - DEFAULT_DISTANCE_SCALE).abs() < 1e-9);
    }

    #[test]
    fn test_displacement_term() {
        let env = open_scene();
        let config = FitnessConfig {
            distance: DistanceTerm::DisplacementFromStart { scale: 0.01 },
            ..FitnessConfig::default()
        };
        let mut f = constant(10, v(1.0, 0.0));
        f.step(&env);
        f.step(&env);
        f.step(&env);
        // Moved one unit in three steps.
        let fitness = f.calculate_fitness(&env, &config);
        assert!((fitness - (0.3 + 0.01)).abs() < 1e-12);
    }

    #[test]
    fn test_fitness_config_validation() {
        assert!(FitnessConfig::default().validate().is_ok());
        let bad = FitnessConfig {
            distance: DistanceTerm::InverseToTarget {
                scale: 1.0,
                min_distance: 0.0,
            },
            ..FitnessConfig::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::InvalidFitness {
                name: "min_distance",
                ..
            })
        ));
    }

    #[test]
    fn test_breed_child_starts_fresh() {
        let mut rng = create_rng(42);
        let kind = PolicyKind::GeneTable { magnitude: 1.0 };
        let env = open_scene();
        let mut a = Finder::random(&kind, 20, v(50.0, 250.0), &mut rng).unwrap();
        let b = Finder::random(&kind, 20, v(60.0, 250.0), &mut rng).unwrap();
        a.step(&env);
        let child = a.breed(&b, 0.05, &mut rng).unwrap();
        assert_eq!(child.start(), v(50.0, 250.0));
        assert_eq!(child.position(), v(50.0, 250.0));
        assert_eq!(child.steps_taken(), 0);
        assert_eq!(child.lifespan(), 20);
        assert!(child.is_alive());
        assert!(child.fitness().is_none());
    }

    #[test]
    fn test_network_finder_runs_to_terminal() {
        let mut rng = create_rng(7);
        let env = open_scene();
        let mut f = Finder::random(&PolicyKind::default(), 60, v(50.0, 250.0), &mut rng).unwrap();
        for _ in 0..60 {
            f.step(&env);
        }
        assert!(f.outcome().is_terminal());
        assert!(f.position().is_finite());
    }
}
