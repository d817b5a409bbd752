//! Evolving path-finding agents with a genetic algorithm.
//!
//! A population of point-mass agents ([`Finder`]s) tries to reach a target
//! inside a walled rectangular scene. Each agent is steered by a [`Policy`]:
//!
//! - **Gene table**: a fixed list of per-step acceleration vectors.
//! - **Network**: a small sigmoid feed-forward network fed by ray sensors.
//!
//! When every agent has crashed, arrived or run out of steps, the generation
//! is scored, the best fraction is kept as a mating pool, and a new
//! generation of the same size is bred from it.
//!
//! # Example
//!
//! ```
//! use ga_pathfinder::environment::{Border, Environment, Target};
//! use ga_pathfinder::{Population, PopulationConfig, Vector2D};
//!
//! let env = Environment::new(
//!     Border::new(Vector2D::new(20.0, 20.0), Vector2D::new(480.0, 480.0)),
//!     Target::default_radius(Vector2D::new(450.0, 250.0)),
//!     Vec::new(),
//! );
//! let mut population = Population::new(
//!     PopulationConfig::default().with_population_size(8).with_lifespan(30).with_seed(1),
//! )
//! .unwrap();
//! let result = population.evolve(&env, 2, None).unwrap();
//! assert_eq!(result.generations, 2);
//! ```
//!
//! # Architecture
//!
//! The crate has no graphics dependency. Renderers read the scene through
//! [`Environment::segments`] and the agents through
//! [`Population::snapshots`].

pub mod agent;
pub mod environment;
pub mod error;
pub mod ga;
pub mod policy;
pub mod rng;
pub mod vector;

pub use agent::{Finder, FitnessConfig, Outcome};
pub use environment::Environment;
pub use error::{Error, Result};
pub use ga::{Population, PopulationConfig};
pub use policy::{Policy, PolicyKind};
pub use vector::Vector2D;
