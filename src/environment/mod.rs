//! Static scene: a rectangular border, a target, and interior walls.
//!
//! The [`Environment`] is built once by the caller and only read afterwards.
//! It answers two questions for moving agents:
//!
//! - [`test_collision`](Environment::test_collision): does a movement segment
//!   cross any wall or border wall?
//! - [`test_finish`](Environment::test_finish): is a point inside the
//!   target's capture region?
//!
//! It also enumerates its geometry as plain segments so a drawing layer can
//! render it without this crate depending on any graphics library.

mod geometry;
mod target;

pub use geometry::{segments_intersect, Border, Wall};
pub use target::{Target, DEFAULT_TARGET_RADIUS};

use crate::vector::Vector2D;

/// Which part of the scene a segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    Border,
    Wall,
}

/// A wall segment as a start/end pair, for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallSegment {
    pub start: Vector2D,
    pub end: Vector2D,
    pub kind: SegmentKind,
}

/// The immutable scene agents move through.
///
/// # Examples
///
/// ```
/// use ga_pathfinder::environment::{Border, Environment, Target, Wall};
/// use ga_pathfinder::Vector2D;
///
/// let env = Environment::new(
///     Border::new(Vector2D::new(20.0, 20.0), Vector2D::new(480.0, 480.0)),
///     Target::new(Vector2D::new(450.0, 250.0), 20.0).unwrap(),
///     vec![Wall::new(Vector2D::new(230.0, 20.0), Vector2D::new(0.0, 460.0))],
/// );
///
/// assert!(env.test_collision(Vector2D::new(225.0, 250.0), Vector2D::new(10.0, 0.0)));
/// assert!(env.test_finish(Vector2D::new(445.0, 245.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Environment {
    border: Border,
    target: Target,
    walls: Vec<Wall>,
}

impl Environment {
    pub fn new(border: Border, target: Target, walls: Vec<Wall>) -> Self {
        Self {
            border,
            target,
            walls,
        }
    }

    /// True if the segment `[position, position + direction]` crosses any
    /// interior wall or any border wall.
    pub fn test_collision(&self, position: Vector2D, direction: Vector2D) -> bool {
        self.walls.iter().any(|w| w.intersects(position, direction))
            || self.border.intersects(position, direction)
    }

    /// True if `position` lies inside the target's capture region.
    pub fn test_finish(&self, position: Vector2D) -> bool {
        self.target.contains(position)
    }

    pub fn border(&self) -> &Border {
        &self.border
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Every border and interior wall as a drawable segment, border first.
    pub fn segments(&self) -> impl Iterator<Item = WallSegment> + '_ {
        let border = self.border.walls().iter().map(|w| WallSegment {
            start: w.origin(),
            end: w.end(),
            kind: SegmentKind::Border,
        });
        let walls = self.walls.iter().map(|w| WallSegment {
            start: w.origin(),
            end: w.end(),
            kind: SegmentKind::Wall,
        });
        border.chain(walls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector2D {
        Vector2D::new(x, y)
    }

    fn swerve() -> Environment {
        Environment::new(
            Border::new(v(20.0, 20.0), v(480.0, 480.0)),
            Target::default_radius(v(450.0, 250.0)),
            vec![
                Wall::new(v(150.0, 20.0), v(0.0, 230.0)),
                Wall::new(v(230.0, 480.0), v(0.0, -230.0)),
                Wall::new(v(310.0, 20.0), v(0.0, 230.0)),
            ],
        )
    }

    #[test]
    fn test_collision_with_interior_wall() {
        let env = swerve();
        assert!(env.test_collision(v(140.0, 100.0), v(20.0, 0.0)));
        // Below the first wall's lower end
        assert!(!env.test_collision(v(140.0, 300.0), v(20.0, 0.0)));
    }

    #[test]
    fn test_collision_with_border_only() {
        let env = Environment::new(
            Border::new(v(20.0, 20.0), v(480.0, 480.0)),
            Target::default_radius(v(450.0, 250.0)),
            Vec::new(),
        );
        assert!(env.test_collision(v(30.0, 250.0), v(-15.0, 0.0)));
        assert!(!env.test_collision(v(30.0, 250.0), v(5.0, 0.0)));
    }

    #[test]
    fn test_stationary_point_never_collides() {
        let env = swerve();
        assert!(!env.test_collision(v(150.0, 100.0), Vector2D::ZERO));
    }

    #[test]
    fn test_finish() {
        let env = swerve();
        assert!(env.test_finish(v(450.0, 265.0)));
        assert!(!env.test_finish(v(50.0, 250.0)));
    }

    #[test]
    fn test_segments_enumerates_everything() {
        let env = swerve();
        let segments: Vec<WallSegment> = env.segments().collect();
        assert_eq!(segments.len(), 7);
        assert_eq!(
            segments
                .iter()
                .filter(|s| s.kind == SegmentKind::Border)
                .count(),
            4
        );
        assert_eq!(segments[4].start, v(150.0, 20.0));
        assert_eq!(segments[4].end, v(150.0, 250.0));
    }
}
