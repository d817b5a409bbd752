//! Evolvable motion policies.
//!
//! A [`Policy`] decides an agent's acceleration each step. Two genetic
//! representations are supported, chosen when the agent is created:
//!
//! - [`GeneTable`]: one pre-evolved acceleration per step
//! - [`NetworkController`]: sensor rays fed through a [`FeedForward`] network
//!
//! Policies are immutable once assigned. [`Policy::crossover`] and
//! [`Policy::mutate`] always build a new policy and leave the parents as
//! they were.

mod gene_table;
mod network;
mod sensor;

pub use gene_table::GeneTable;
pub use network::{sigmoid, FeedForward, Matrix, Topology};
pub use sensor::{SensorArray, BLOCKED, CLEAR};

use rand::Rng;

use crate::environment::Environment;
use crate::error::PolicyError;
use crate::vector::Vector2D;

/// Ray sensors plus the network that weighs them.
///
/// The network has one input and one output per ray; the acceleration is
/// the sum of the unit ray directions weighted by the outputs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkController {
    sensors: SensorArray,
    network: FeedForward,
}

impl NetworkController {
    /// # Errors
    /// Fails if the network's input or output width differs from the ray count.
    pub fn new(sensors: SensorArray, network: FeedForward) -> Result<Self, PolicyError> {
        let topology = network.topology();
        let rays = sensors.count();
        if topology.inputs != rays || topology.outputs != rays {
            return Err(PolicyError::ShapeMismatch {
                layer: if topology.inputs != rays { 0 } else { 2 },
                expected: (rays, rays),
                actual: (topology.inputs, topology.outputs),
            });
        }
        Ok(Self { sensors, network })
    }

    pub fn random<R: Rng + ?Sized>(
        rays: usize,
        ray_length: f64,
        hidden_a: usize,
        hidden_b: usize,
        rng: &mut R,
    ) -> Result<Self, PolicyError> {
        let sensors = SensorArray::new(rays, ray_length)?;
        let network = FeedForward::random(
            Topology {
                inputs: rays,
                hidden_a,
                hidden_b,
                outputs: rays,
            },
            rng,
        )?;
        Ok(Self { sensors, network })
    }

    pub fn sensors(&self) -> &SensorArray {
        &self.sensors
    }

    pub fn network(&self) -> &FeedForward {
        &self.network
    }

    /// Senses the walls around `position` and turns the network's outputs
    /// into an acceleration.
    pub fn acceleration(&self, position: Vector2D, environment: &Environment) -> Vector2D {
        let readings = self.sensors.sense(position, environment);
        let outputs = self.network.run(&readings);
        self.sensors.combine(&outputs)
    }

    fn check_sensors(&self, other: &NetworkController) -> Result<(), PolicyError> {
        let mine = (self.sensors.count(), self.sensors.length());
        let theirs = (other.sensors.count(), other.sensors.length());
        if mine != theirs {
            return Err(PolicyError::SensorMismatch {
                expected: mine,
                actual: theirs,
            });
        }
        Ok(())
    }
}

/// The genetic material of one agent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Policy {
    GeneTable(GeneTable),
    Network(NetworkController),
}

impl Policy {
    /// Acceleration for the given step.
    ///
    /// Returns `None` when a gene table has no entry for `step`; agents stop
    /// before that happens.
    pub fn acceleration(
        &self,
        step: usize,
        position: Vector2D,
        environment: &Environment,
    ) -> Option<Vector2D> {
        match self {
            Policy::GeneTable(table) => table.value_at(step),
            Policy::Network(controller) => Some(controller.acceleration(position, environment)),
        }
    }

    /// Checks the policy can drive an agent for `lifespan` steps.
    ///
    /// # Errors
    /// [`PolicyError::ZeroLifespan`], or [`PolicyError::LifespanMismatch`]
    /// for a gene table of the wrong length.
    pub fn check_lifespan(&self, lifespan: usize) -> Result<(), PolicyError> {
        if lifespan == 0 {
            return Err(PolicyError::ZeroLifespan);
        }
        match self {
            Policy::GeneTable(table) if table.len() != lifespan => {
                Err(PolicyError::LifespanMismatch {
                    expected: lifespan,
                    actual: table.len(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Recombines two policies of the same representation.
    ///
    /// # Errors
    /// [`PolicyError::VariantMismatch`] when mixing representations, or the
    /// shape errors of the underlying crossover.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        partner: &Policy,
        rng: &mut R,
    ) -> Result<Policy, PolicyError> {
        match (self, partner) {
            (Policy::GeneTable(a), Policy::GeneTable(b)) => {
                Ok(Policy::GeneTable(a.crossover(b, rng)?))
            }
            (Policy::Network(a), Policy::Network(b)) => {
                a.check_sensors(b)?;
                Ok(Policy::Network(NetworkController {
                    sensors: a.sensors.clone(),
                    network: a.network.crossover(&b.network, rng)?,
                }))
            }
            _ => Err(PolicyError::VariantMismatch),
        }
    }

    /// A mutated copy.
    pub fn mutate<R: Rng + ?Sized>(&self, rate: f64, rng: &mut R) -> Policy {
        match self {
            Policy::GeneTable(table) => Policy::GeneTable(table.mutate(rate, rng)),
            Policy::Network(controller) => Policy::Network(NetworkController {
                sensors: controller.sensors.clone(),
                network: controller.network.mutate(rate, rng),
            }),
        }
    }
}

impl From<GeneTable> for Policy {
    fn from(table: GeneTable) -> Self {
        Policy::GeneTable(table)
    }
}

impl From<NetworkController> for Policy {
    fn from(controller: NetworkController) -> Self {
        Policy::Network(controller)
    }
}

/// Recipe for creating random policies of one representation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolicyKind {
    /// Gene table with genes of length `magnitude`.
    GeneTable { magnitude: f64 },
    /// Network controller with `rays` sensors and two hidden layers.
    Network {
        rays: usize,
        ray_length: f64,
        hidden_a: usize,
        hidden_b: usize,
    },
}

impl Default for PolicyKind {
    fn default() -> Self {
        PolicyKind::Network {
            rays: 8,
            ray_length: 30.0,
            hidden_a: 4,
            hidden_b: 4,
        }
    }
}

impl PolicyKind {
    /// A fresh random policy for an agent living `lifespan` steps.
    pub fn random<R: Rng + ?Sized>(&self, lifespan: usize, rng: &mut R) -> Result<Policy, PolicyError> {
        match *self {
            PolicyKind::GeneTable { magnitude } => {
                Ok(GeneTable::random(lifespan, magnitude, rng)?.into())
            }
            PolicyKind::Network {
                rays,
                ray_length,
                hidden_a,
                hidden_b,
            } => {
                if lifespan == 0 {
                    return Err(PolicyError::ZeroLifespan);
                }
                Ok(NetworkController::random(rays, ray_length, hidden_a, hidden_b, rng)?.into())
            }
        }
    }

    /// Checks the recipe without drawing any randomness.
    pub fn validate(&self) -> Result<(), PolicyError> {
        match *self {
            PolicyKind::GeneTable { magnitude } => {
                if magnitude.is_finite() && magnitude > 0.0 {
                    Ok(())
                } else {
                    Err(PolicyError::InvalidMagnitude(magnitude))
                }
            }
            PolicyKind::Network {
                rays,
                ray_length,
                hidden_a,
                hidden_b,
            } => {
                SensorArray::new(rays, ray_length)?;
                Topology {
                    inputs: rays,
                    hidden_a,
                    hidden_b,
                    outputs: rays,
                }
                .validate()
            }
        }
    }
}
