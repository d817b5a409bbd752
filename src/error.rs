//! Error types.
//!
//! Every fallible construction or recombination step reports a typed error.
//! Collision, arrival and fitness queries are total and never fail.

use thiserror::Error;

/// Errors raised by vector arithmetic.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VectorError {
    #[error("cannot divide a vector by zero")]
    DivisionByZero,
}

/// Errors raised when building or recombining a policy.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolicyError {
    #[error("lifespan must be non-zero")]
    ZeroLifespan,
    #[error("gene table holds {actual} genes but the lifespan is {expected}")]
    LifespanMismatch { expected: usize, actual: usize },
    #[error("gene magnitude {0} must be positive and finite")]
    InvalidMagnitude(f64),
    #[error("gene {index} has magnitude {magnitude} above the cap {cap}")]
    GeneTooLong {
        index: usize,
        magnitude: f64,
        cap: f64,
    },
    #[error("matrix data holds {actual} values, shape {rows}x{cols} needs {expected}")]
    MatrixData {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },
    #[error("layer {layer} shape {actual:?} does not match {expected:?}")]
    ShapeMismatch {
        layer: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("network needs at least one sensor and non-empty hidden layers")]
    EmptyLayer,
    #[error("sensor ray length {0} must be positive and finite")]
    InvalidRayLength(f64),
    #[error("sensor layouts differ: {expected:?} vs {actual:?}")]
    SensorMismatch {
        expected: (usize, f64),
        actual: (usize, f64),
    },
    #[error("cannot recombine a gene table with a network controller")]
    VariantMismatch,
}

/// Errors raised by [`PopulationConfig::validate`](crate::ga::PopulationConfig::validate).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("population size must be at least 1")]
    EmptyPopulation,
    #[error("lifespan must be at least 1")]
    ZeroLifespan,
    #[error("mating fraction {0} must lie in (0, 1]")]
    InvalidMatingFraction(f64),
    #[error("mutation rate {0} must lie in [0, 1]")]
    InvalidMutationRate(f64),
    #[error("invalid policy layout: {0}")]
    Policy(#[from] PolicyError),
    #[error("fitness parameter `{name}` must be finite and non-negative, got {value}")]
    InvalidFitness { name: &'static str, value: f64 },
    #[error("start position {0} is not finite")]
    InvalidStart(crate::Vector2D),
    #[error("target radius {0} must be finite and non-negative")]
    InvalidTargetRadius(f64),
    #[error("mating pool is empty")]
    EmptyMatingPool,
}

/// Crate-wide error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Vector(#[from] VectorError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
