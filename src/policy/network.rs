//! Three-layer feed-forward network with evolved weights.
//!
//! There is no training: weights are drawn once from a truncated normal
//! distribution and then only change through crossover and mutation.
//!
//! Layout: `input → hidden A → hidden B → output`, logistic activation on
//! every layer, no biases:
//!
//! ```text
//! output = σ(W3 · σ(W2 · σ(W1 · x)))
//! ```

use rand::Rng;

use crate::error::PolicyError;
use crate::ga::operators::{flat_crossover, scaling_mutation};

/// Row-major dense matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// # Errors
    /// [`PolicyError::MatrixData`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, PolicyError> {
        if data.len() != rows * cols {
            return Err(PolicyError::MatrixData {
                rows,
                cols,
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Entries drawn from N(0, 1) truncated to `±1/sqrt(cols)`.
    pub fn truncated_normal<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let bound = 1.0 / (cols.max(1) as f64).sqrt();
        let data = (0..rows * cols)
            .map(|_| sample_truncated_normal(bound, rng))
            .collect();
        Self { rows, cols, data }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flattened row-major view.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// `self · input`.
    ///
    /// # Panics
    /// Panics if `input.len() != cols`.
    pub fn mul_vec(&self, input: &[f64]) -> Vec<f64> {
        assert_eq!(input.len(), self.cols, "input length must match column count");
        self.data
            .chunks_exact(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().zip(input).map(|(w, x)| w * x).sum())
            .collect()
    }
}

/// Standard normal via Box-Muller, rejected until it lands in `[-bound, bound]`.
fn sample_truncated_normal<R: Rng + ?Sized>(bound: f64, rng: &mut R) -> f64 {
    loop {
        let u1: f64 = rng.random_range(f64::EPSILON..1.0);
        let u2: f64 = rng.random_range(0.0..1.0);
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        if z.abs() <= bound {
            return z;
        }
    }
}

/// Logistic function.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Layer widths of a [`FeedForward`] network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    pub inputs: usize,
    pub hidden_a: usize,
    pub hidden_b: usize,
    pub outputs: usize,
}

impl Topology {
    /// Expected `(rows, cols)` of each weight matrix.
    pub fn shapes(&self) -> [(usize, usize); 3] {
        [
            (self.hidden_a, self.inputs),
            (self.hidden_b, self.hidden_a),
            (self.outputs, self.hidden_b),
        ]
    }

    /// # Errors
    /// [`PolicyError::EmptyLayer`] when any width is zero.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.inputs == 0 || self.hidden_a == 0 || self.hidden_b == 0 || self.outputs == 0 {
            return Err(PolicyError::EmptyLayer);
        }
        Ok(())
    }
}

/// Weights of a three-layer network.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedForward {
    layers: [Matrix; 3],
}

impl FeedForward {
    /// Randomly initialized weights for `topology`.
    pub fn random<R: Rng + ?Sized>(topology: Topology, rng: &mut R) -> Result<Self, PolicyError> {
        topology.validate()?;
        let [a, b, c] = topology.shapes();
        Ok(Self {
            layers: [
                Matrix::truncated_normal(a.0, a.1, rng),
                Matrix::truncated_normal(b.0, b.1, rng),
                Matrix::truncated_normal(c.0, c.1, rng),
            ],
        })
    }

    /// Wraps explicit weight matrices after checking they chain.
    ///
    /// # Errors
    /// [`PolicyError::ShapeMismatch`] if a layer's columns do not equal the
    /// previous layer's rows, or [`PolicyError::EmptyLayer`].
    pub fn from_layers(layers: [Matrix; 3]) -> Result<Self, PolicyError> {
        let topology = Topology {
            inputs: layers[0].cols,
            hidden_a: layers[0].rows,
            hidden_b: layers[1].rows,
            outputs: layers[2].rows,
        };
        topology.validate()?;
        for (layer, (matrix, expected)) in layers.iter().zip(topology.shapes()).enumerate() {
            if matrix.shape() != expected {
                return Err(PolicyError::ShapeMismatch {
                    layer,
                    expected,
                    actual: matrix.shape(),
                });
            }
        }
        Ok(Self { layers })
    }

    pub fn topology(&self) -> Topology {
        Topology {
            inputs: self.layers[0].cols,
            hidden_a: self.layers[0].rows,
            hidden_b: self.layers[1].rows,
            outputs: self.layers[2].rows,
        }
    }

    pub fn layers(&self) -> &[Matrix; 3] {
        &self.layers
    }

    /// Forward pass.
    ///
    /// # Panics
    /// Panics if `input.len()` differs from the input width.
    pub fn run(&self, input: &[f64]) -> Vec<f64> {
        self.layers.iter().fold(input.to_vec(), |signal, layer| {
            layer.mul_vec(&signal).into_iter().map(sigmoid).collect()
        })
    }

    /// Per-matrix flat crossover: each layer is flattened, split at an
    /// independent random index, and rebuilt as `self[..split] ++ partner[split..]`.
    ///
    /// # Errors
    /// [`PolicyError::ShapeMismatch`] if the parents' layers differ in shape.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        partner: &FeedForward,
        rng: &mut R,
    ) -> Result<Self, PolicyError> {
        self.check_same_shape(partner)?;
        let mut layers = self.layers.clone();
        for (child, (own, other)) in layers
            .iter_mut()
            .zip(self.layers.iter().zip(partner.layers.iter()))
        {
            child.data = flat_crossover(&own.data, &other.data, rng);
        }
        Ok(Self { layers })
    }

    /// Per-matrix sampled mutation: `floor(rate * len)` distinct weights are
    /// each multiplied by a factor from `U[-1, 1]`.
    pub fn mutate<R: Rng + ?Sized>(&self, rate: f64, rng: &mut R) -> Self {
        let mut layers = self.layers.clone();
        for layer in &mut layers {
            layer.data = scaling_mutation(&layer.data, rate, rng);
        }
        Self { layers }
    }

    fn check_same_shape(&self, other: &FeedForward) -> Result<(), PolicyError> {
        for (layer, (a, b)) in self.layers.iter().zip(other.layers.iter()).enumerate() {
            if a.shape() != b.shape() {
                return Err(PolicyError::ShapeMismatch {
                    layer,
                    expected: a.shape(),
                    actual: b.shape(),
                });
            }
        }
        Ok(())
    }
}
