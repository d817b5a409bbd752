//! Generational genetic algorithm over [`Finder`](crate::agent::Finder)s.
//!
//! Each generation is simulated to completion, scored, ranked, cut down to a
//! mating pool by truncation selection, and replaced by bred children.
//!
//! # Key Types
//!
//! - [`PopulationConfig`]: Sizes, rates, policy recipe and fitness weights
//! - [`Population`]: Owns the agents and runs the tick / generation loop
//! - [`GenerationStats`]: Per-generation summary
//! - [`MatingPool`]: Truncation-selected parents
//!
//! # Submodules
//!
//! - [`operators`]: Sequence crossover and mutation operators shared by the
//!   policy representations
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Montana & Davis (1989), "Training Feedforward Neural Networks Using
//!   Genetic Algorithms"

mod config;
pub mod operators;
mod population;
mod selection;

pub use config::PopulationConfig;
pub use population::{EvolutionResult, GenerationStats, Population, Tick};
pub use selection::MatingPool;
