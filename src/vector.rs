//! Two-dimensional vector value type.
//!
//! [`Vector2D`] carries positions, velocities, accelerations, wall
//! displacements and gene values. All arithmetic goes through named methods
//! that return new values; operand types are fixed by the signatures, so a
//! vector can only ever be combined with another vector or an `f64` scalar.

use std::f64::consts::TAU;
use std::fmt;

use rand::Rng;

use crate::error::VectorError;

/// An immutable 2D vector of `f64` components.
///
/// # Examples
///
/// ```
/// use ga_pathfinder::Vector2D;
///
/// let a = Vector2D::new(3.0, 4.0);
/// assert_eq!(a.magnitude(), 5.0);
/// assert_eq!(a.scale(2.0), Vector2D::new(6.0, 8.0));
/// assert!(a.divide(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    /// The zero vector.
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians from the positive x axis.
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// A uniformly random direction of unit length.
    pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_angle(rng.random_range(0.0..TAU))
    }

    pub fn add(self, other: Vector2D) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(self, other: Vector2D) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    /// Divides both components by `k`.
    ///
    /// # Errors
    /// Returns [`VectorError::DivisionByZero`] when `k == 0`.
    pub fn divide(self, k: f64) -> Result<Self, VectorError> {
        if k == 0.0 {
            return Err(VectorError::DivisionByZero);
        }
        Ok(Self::new(self.x / k, self.y / k))
    }

    pub fn dot(self, other: Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar (z component of the) cross product `self × other`.
    pub fn cross(self, other: Vector2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns the unit vector in the same direction.
    ///
    /// The zero vector normalizes to itself.
    pub fn normalize(self) -> Self {
        let m = self.magnitude();
        if m == 0.0 {
            self
        } else {
            Self::new(self.x / m, self.y / m)
        }
    }

    /// Component-wise mean of two vectors.
    pub fn average_with(self, other: Vector2D) -> Self {
        self.add(other).scale(0.5)
    }

    /// Euclidean distance between two points.
    pub fn distance_from(self, other: Vector2D) -> f64 {
        self.subtract(other).magnitude()
    }

    /// Exact component equality.
    pub fn equals(self, other: Vector2D) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Shortens the vector to `max` if it is longer, keeping its direction.
    pub fn limit(self, max: f64) -> Self {
        let m = self.magnitude();
        if m > max && m > 0.0 {
            self.scale(max / m)
        } else {
            self
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x:{:.5} y:{:.5})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn test_arithmetic() {
        let a = Vector2D::new(1.0, 2.0);
        let b = Vector2D::new(3.0, -1.0);
        assert_eq!(a.add(b), Vector2D::new(4.0, 1.0));
        assert_eq!(a.subtract(b), Vector2D::new(-2.0, 3.0));
        assert_eq!(a.scale(-2.0), Vector2D::new(-2.0, -4.0));
        assert_eq!(b.divide(2.0), Ok(Vector2D::new(1.5, -0.5)));
        assert_eq!(a.dot(b), 1.0);
        assert_eq!(a.cross(b), -7.0);
    }

    #[test]
    fn test_divide_by_zero_rejected() {
        assert_eq!(
            Vector2D::new(1.0, 1.0).divide(0.0),
            Err(VectorError::DivisionByZero)
        );
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        assert_eq!(Vector2D::ZERO.normalize(), Vector2D::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = Vector2D::new(-7.0, 24.0).normalize();
        assert!((n.magnitude() - 1.0).abs() < 1e-12);
        assert!((n.x + 7.0 / 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_and_equality() {
        let a = Vector2D::new(50.0, 250.0);
        let b = Vector2D::new(450.0, 250.0);
        assert_eq!(a.distance_from(b), 400.0);
        assert!(a.equals(Vector2D::new(50.0, 250.0)));
        assert!(!a.equals(b));
    }

    #[test]
    fn test_limit() {
        let v = Vector2D::new(3.0, 4.0);
        assert!((v.limit(1.0).magnitude() - 1.0).abs() < 1e-12);
        assert_eq!(v.limit(10.0), v);
        assert_eq!(Vector2D::ZERO.limit(0.0), Vector2D::ZERO);
    }

    #[test]
    fn test_random_unit() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let v = Vector2D::random_unit(&mut rng);
            assert!((v.magnitude() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Vector2D::new(1.0, -0.5).to_string(),
            "(x:1.00000 y:-0.50000)"
        );
    }
}
