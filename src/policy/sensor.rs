//! Fixed-direction probe rays around an agent.

use std::f64::consts::TAU;

use crate::environment::Environment;
use crate::error::PolicyError;
use crate::vector::Vector2D;

/// Reading for a ray that hits a wall.
pub const BLOCKED: f64 = -1.0;
/// Reading for a clear ray.
pub const CLEAR: f64 = 1.0;

/// `count` rays of equal `length` at angles `2πk / count`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorArray {
    rays: Vec<Vector2D>,
    length: f64,
}

impl SensorArray {
    /// # Errors
    /// [`PolicyError::EmptyLayer`] for zero rays,
    /// [`PolicyError::InvalidRayLength`] for a non-positive length.
    pub fn new(count: usize, length: f64) -> Result<Self, PolicyError> {
        if count == 0 {
            return Err(PolicyError::EmptyLayer);
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(PolicyError::InvalidRayLength(length));
        }
        let rays = (0..count)
            .map(|k| Vector2D::from_angle(TAU * k as f64 / count as f64).scale(length))
            .collect();
        Ok(Self { rays, length })
    }

    pub fn count(&self) -> usize {
        self.rays.len()
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn rays(&self) -> &[Vector2D] {
        &self.rays
    }

    /// One reading per ray: [`BLOCKED`] if the ray from `position` crosses a
    /// wall, [`CLEAR`] otherwise.
    pub fn sense(&self, position: Vector2D, environment: &Environment) -> Vec<f64> {
        self.rays
            .iter()
            .map(|&ray| {
                if environment.test_collision(position, ray) {
                    BLOCKED
                } else {
                    CLEAR
                }
            })
            .collect()
    }

    /// `Σ normalize(ray_k) * weights[k]`.
    pub fn combine(&self, weights: &[f64]) -> Vector2D {
        self.rays
            .iter()
            .zip(weights)
            .fold(Vector2D::ZERO, |acc, (ray, &w)| {
                acc.add(ray.normalize().scale(w))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Border, Target};

    fn open_room() -> Environment {
        Environment::new(
            Border::new(Vector2D::new(0.0, 0.0), Vector2D::new(100.0, 100.0)),
            Target::default_radius(Vector2D::new(90.0, 50.0)),
            Vec::new(),
        )
    }

    #[test]
    fn test_ray_layout() {
        let sensors = SensorArray::new(4, 10.0).unwrap();
        let rays = sensors.rays();
        assert!((rays[0].x - 10.0).abs() < 1e-12 && rays[0].y.abs() < 1e-12);
        assert!(rays[1].x.abs() < 1e-12 && (rays[1].y - 10.0).abs() < 1e-12);
        assert!((rays[2].x + 10.0).abs() < 1e-12);
        assert!((rays[3].y + 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_layout() {
        assert_eq!(SensorArray::new(0, 1.0), Err(PolicyError::EmptyLayer));
        assert_eq!(
            SensorArray::new(4, -1.0),
            Err(PolicyError::InvalidRayLength(-1.0))
        );
    }

    #[test]
    fn test_sense_near_wall() {
        let env = open_room();
        let sensors = SensorArray::new(4, 10.0).unwrap();
        // 5 units from the right wall: only the +x ray is blocked.
        let readings = sensors.sense(Vector2D::new(95.0, 50.0), &env);
        assert_eq!(readings, vec![BLOCKED, CLEAR, CLEAR, CLEAR]);
        let center = sensors.sense(Vector2D::new(50.0, 50.0), &env);
        assert!(center.iter().all(|&r| r == CLEAR));
    }

    #[test]
    fn test_combine() {
        let sensors = SensorArray::new(4, 10.0).unwrap();
        let a = sensors.combine(&[1.0, 0.0, 0.0, 0.0]);
        assert!((a.x - 1.0).abs() < 1e-12 && a.y.abs() < 1e-12);
        let balanced = sensors.combine(&[0.5; 4]);
        assert!(balanced.magnitude() < 1e-12);
    }
}
