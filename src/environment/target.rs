//! Circular capture region agents try to reach.

use crate::error::ConfigError;
use crate::vector::Vector2D;

/// Radius used by [`Target::default_radius`].
pub const DEFAULT_TARGET_RADIUS: f64 = 20.0;

/// A target center plus capture radius.
///
/// A radius of zero gives exact-match semantics: only the center itself
/// counts as arrival.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    position: Vector2D,
    radius: f64,
}

impl Target {
    /// Target with an explicit radius.
    ///
    /// # Errors
    /// [`ConfigError::InvalidTargetRadius`] for a negative or non-finite
    /// radius.
    pub fn new(position: Vector2D, radius: f64) -> Result<Self, ConfigError> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(ConfigError::InvalidTargetRadius(radius));
        }
        Ok(Self { position, radius })
    }

    pub fn default_radius(position: Vector2D) -> Self {
        Self {
            position,
            radius: DEFAULT_TARGET_RADIUS,
        }
    }

    /// Exact-match target.
    pub fn point(position: Vector2D) -> Self {
        Self {
            position,
            radius: 0.0,
        }
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        if self.radius == 0.0 {
            return self.position.equals(point);
        }
        self.position.distance_from(point) <= self.radius
    }
}
