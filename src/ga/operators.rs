//! Generic sequence-level genetic operators.
//!
//! These operate on plain slices and always return a freshly allocated
//! child; parents are never modified. Policies build their crossover and
//! mutation out of them.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: split in `[1, n-1]`, head from the partner
//! - [`flat_crossover`]: split in `[0, n)`, head from the first parent
//!
//! # Mutation Operators
//!
//! - [`point_mutation`]: each element replaced independently with probability `rate`
//! - [`scaling_mutation`]: exactly `floor(rate * n)` distinct elements scaled by `U[-1, 1]`
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Montana & Davis (1989), "Training Feedforward Neural Networks Using Genetic Algorithms"

use rand::seq::index;
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover with the split drawn from `[1, n-1]`.
///
/// Elements at indices `<= split` come from `partner`, the remainder from
/// `own`. A one-element sequence copies the partner.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn single_point_crossover<T: Clone, R: Rng + ?Sized>(
    own: &[T],
    partner: &[T],
    rng: &mut R,
) -> Vec<T> {
    let n = own.len();
    assert_eq!(n, partner.len(), "parents must have equal length");

    let split = if n > 1 { rng.random_range(1..n) } else { 0 };
    own.iter()
        .zip(partner)
        .enumerate()
        .map(|(i, (mine, theirs))| {
            if i <= split {
                theirs.clone()
            } else {
                mine.clone()
            }
        })
        .collect()
}

/// Flat-split crossover: `first[..split] ++ second[split..]` with the split
/// drawn uniformly from `[0, n)`.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn flat_crossover<T: Clone, R: Rng + ?Sized>(
    first: &[T],
    second: &[T],
    rng: &mut R,
) -> Vec<T> {
    let n = first.len();
    assert_eq!(n, second.len(), "parents must have equal length");
    if n == 0 {
        return Vec::new();
    }

    let split = rng.random_range(0..n);
    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&first[..split]);
    child.extend_from_slice(&second[split..]);
    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Replaces each element with `mutate(element, rng)` with probability `rate`.
pub fn point_mutation<T, R, F>(values: &[T], rate: f64, rng: &mut R, mut mutate: F) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
    F: FnMut(&T, &mut R) -> T,
{
    let rate = rate.clamp(0.0, 1.0);
    values
        .iter()
        .map(|value| {
            if rng.random_bool(rate) {
                mutate(value, rng)
            } else {
                value.clone()
            }
        })
        .collect()
}

/// Picks `floor(rate * n)` distinct positions without replacement and
/// multiplies each by a factor drawn uniformly from `[-1, 1]`.
///
/// # Complexity
/// O(n) time
pub fn scaling_mutation<R: Rng + ?Sized>(values: &[f64], rate: f64, rng: &mut R) -> Vec<f64> {
    let n = values.len();
    let amount = mutation_count(n, rate);
    let mut child = values.to_vec();
    for i in index::sample(rng, n, amount) {
        child[i] *= rng.random_range(-1.0..=1.0);
    }
    child
}

/// Number of elements [`scaling_mutation`] touches.
pub fn mutation_count(n: usize, rate: f64) -> usize {
    ((n as f64 * rate.clamp(0.0, 1.0)).floor() as usize).min(n)
}

// ============================================================================
// Tests
// ============================================================================
