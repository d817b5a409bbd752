//! Truncation selection.
//!
//! A ranked generation is cut down to its best `k` agents; parents are then
//! drawn uniformly, with replacement, from that pool.
//!
//! # References
//!
//! - Mühlenbein & Schlierkamp-Voosen (1993), "Predictive Models for the
//!   Breeder Genetic Algorithm"

use rand::Rng;

use crate::agent::Finder;
use crate::error::{ConfigError, PolicyError};

/// The top-ranked agents of a generation.
#[derive(Debug)]
pub struct MatingPool<'a> {
    parents: &'a [Finder],
}

impl<'a> MatingPool<'a> {
    /// Takes the first `size` agents of `ranked` (best first).
    ///
    /// # Errors
    /// [`ConfigError::EmptyMatingPool`] if the resulting pool would be empty.
    pub fn from_ranked(ranked: &'a [Finder], size: usize) -> Result<Self, ConfigError> {
        let size = size.min(ranked.len());
        if size == 0 {
            return Err(ConfigError::EmptyMatingPool);
        }
        Ok(Self {
            parents: &ranked[..size],
        })
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn parents(&self) -> &[Finder] {
        self.parents
    }

    /// Picks one parent uniformly at random.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a Finder {
        let parents: &'a [Finder] = self.parents;
        &parents[rng.random_range(0..parents.len())]
    }

    /// Draws two parents (possibly the same one) and breeds one child.
    pub fn breed<R: Rng + ?Sized>(
        &self,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Result<Finder, PolicyError> {
        let first = self.draw(rng);
        let second = self.draw(rng);
        first.breed(second, mutation_rate, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyKind;
    use crate::rng::create_rng;
    use crate::vector::Vector2D;

    fn finders(n: usize) -> Vec<Finder> {
        let mut rng = create_rng(1);
        let kind = PolicyKind::GeneTable { magnitude: 1.0 };
        (0..n)
            .map(|i| Finder::random(&kind, 10, Vector2D::new(i as f64, 0.0), &mut rng).unwrap())
            .collect()
    }

    #[test]
    fn test_pool_takes_prefix() {
        let ranked = finders(10);
        let pool = MatingPool::from_ranked(&ranked, 3).unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.parents()[2].start(), Vector2D::new(2.0, 0.0));
    }

    #[test]
    fn test_pool_clamps_to_population() {
        let ranked = finders(4);
        assert_eq!(MatingPool::from_ranked(&ranked, 10).unwrap().len(), 4);
    }

    #[test]
    fn test_draw_uniform_within_pool() {
        let ranked = finders(10);
        let pool = MatingPool::from_ranked(&ranked, 4).unwrap();
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..8000 {
            let parent = pool.draw(&mut rng);
            counts[parent.start().x as usize] += 1;
        }
        for &c in &counts {
            assert!(c > 1600, "expected uniform draws, got {counts:?}");
        }
    }

    #[test]
    fn test_breed_child_from_pool() {
        let ranked = finders(5);
        let pool = MatingPool::from_ranked(&ranked, 2).unwrap();
        let mut rng = create_rng(42);
        let child = pool.breed(0.05, &mut rng).unwrap();
        assert!(child.start().x < 2.0);
        assert_eq!(child.lifespan(), 10);
    }

    #[test]
    fn test_empty_pool_rejected() {
        let ranked: Vec<Finder> = Vec::new();
        assert_eq!(
            MatingPool::from_ranked(&ranked, 3).unwrap_err(),
            ConfigError::EmptyMatingPool
        );
        let ranked = finders(4);
        assert_eq!(
            MatingPool::from_ranked(&ranked, 0).unwrap_err(),
            ConfigError::EmptyMatingPool
        );
    }
}
