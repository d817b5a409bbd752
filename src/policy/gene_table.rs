//! Directly evolved acceleration sequence.

use rand::Rng;

use crate::error::PolicyError;
use crate::ga::operators::{point_mutation, single_point_crossover};
use crate::vector::Vector2D;

/// One magnitude-capped acceleration per simulation step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneTable {
    genes: Vec<Vector2D>,
    magnitude: f64,
}

impl GeneTable {
    /// `lifespan` random genes, each of length `magnitude`.
    ///
    /// # Errors
    /// [`PolicyError::ZeroLifespan`] or [`PolicyError::InvalidMagnitude`].
    pub fn random<R: Rng + ?Sized>(
        lifespan: usize,
        magnitude: f64,
        rng: &mut R,
    ) -> Result<Self, PolicyError> {
        check_layout(lifespan, magnitude)?;
        let genes = (0..lifespan)
            .map(|_| Vector2D::random_unit(rng).scale(magnitude))
            .collect();
        Ok(Self { genes, magnitude })
    }

    /// Wraps explicit genes.
    ///
    /// # Errors
    /// Fails on an empty table, a non-positive magnitude, or any gene longer
    /// than `magnitude`.
    pub fn from_genes(genes: Vec<Vector2D>, magnitude: f64) -> Result<Self, PolicyError> {
        check_layout(genes.len(), magnitude)?;
        for (index, gene) in genes.iter().enumerate() {
            let m = gene.magnitude();
            if !gene.is_finite() || m > magnitude * (1.0 + 1e-9) {
                return Err(PolicyError::GeneTooLong {
                    index,
                    magnitude: m,
                    cap: magnitude,
                });
            }
        }
        Ok(Self { genes, magnitude })
    }

    pub fn genes(&self) -> &[Vector2D] {
        &self.genes
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Acceleration for `step`, or `None` past the end of the table.
    pub fn value_at(&self, step: usize) -> Option<Vector2D> {
        self.genes.get(step).copied()
    }

    /// Single-point crossover; genes up to the split come from `partner`.
    ///
    /// # Errors
    /// [`PolicyError::LifespanMismatch`] if the tables differ in length.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        partner: &GeneTable,
        rng: &mut R,
    ) -> Result<Self, PolicyError> {
        if self.len() != partner.len() {
            return Err(PolicyError::LifespanMismatch {
                expected: self.len(),
                actual: partner.len(),
            });
        }
        Ok(Self {
            genes: single_point_crossover(&self.genes, &partner.genes, rng),
            magnitude: self.magnitude,
        })
    }

    /// Each gene, with probability `rate`, becomes
    /// `magnitude * normalize(average(gene, random_unit))`.
    pub fn mutate<R: Rng + ?Sized>(&self, rate: f64, rng: &mut R) -> Self {
        let magnitude = self.magnitude;
        let genes = point_mutation(&self.genes, rate, rng, |gene, rng| {
            gene.average_with(Vector2D::random_unit(rng))
                .normalize()
                .scale(magnitude)
        });
        Self { genes, magnitude }
    }
}

fn check_layout(lifespan: usize, magnitude: f64) -> Result<(), PolicyError> {
    if lifespan == 0 {
        return Err(PolicyError::ZeroLifespan);
    }
    if !(magnitude.is_finite() && magnitude > 0.0) {
        return Err(PolicyError::InvalidMagnitude(magnitude));
    }
    Ok(())
}
