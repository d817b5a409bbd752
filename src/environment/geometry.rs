//! Line-segment geometry: walls, the rectangular border, and the
//! intersection test they share.

use crate::vector::Vector2D;

/// Parametric segment intersection test.
///
/// Segment one runs from `p` to `p + r`, segment two from `q` to `q + s`.
/// With `t = (q - p) × s / (r × s)` and `u = (q - p) × r / (r × s)` the
/// segments meet iff `r × s != 0`, `0 <= t <= 1` and `0 <= u <= 1`.
/// Parallel and degenerate segments never intersect.
///
/// # Examples
///
/// ```
/// use ga_pathfinder::environment::segments_intersect;
/// use ga_pathfinder::Vector2D;
///
/// let crossing = segments_intersect(
///     Vector2D::new(0.0, 0.0), Vector2D::new(2.0, 2.0),
///     Vector2D::new(0.0, 2.0), Vector2D::new(2.0, -2.0),
/// );
/// assert!(crossing);
/// ```
pub fn segments_intersect(p: Vector2D, r: Vector2D, q: Vector2D, s: Vector2D) -> bool {
    let denom = r.cross(s);
    if denom == 0.0 {
        return false;
    }
    let qp = q.subtract(p);
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// A wall segment `[origin, origin + displacement]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wall {
    origin: Vector2D,
    displacement: Vector2D,
}

impl Wall {
    pub fn new(origin: Vector2D, displacement: Vector2D) -> Self {
        Self {
            origin,
            displacement,
        }
    }

    /// Wall between two endpoints.
    pub fn between(start: Vector2D, end: Vector2D) -> Self {
        Self::new(start, end.subtract(start))
    }

    pub fn origin(&self) -> Vector2D {
        self.origin
    }

    pub fn displacement(&self) -> Vector2D {
        self.displacement
    }

    pub fn end(&self) -> Vector2D {
        self.origin.add(self.displacement)
    }

    /// Whether the segment from `position` to `position + direction`
    /// crosses this wall.
    pub fn intersects(&self, position: Vector2D, direction: Vector2D) -> bool {
        segments_intersect(position, direction, self.origin, self.displacement)
    }
}

/// A closed rectangle of four walls spanned by two opposite corners.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Border {
    top_left: Vector2D,
    bottom_right: Vector2D,
    walls: [Wall; 4],
}

impl Border {
    /// Builds the border. The top and left walls start at `top_left`, the
    /// bottom and right walls start at `bottom_right`.
    pub fn new(top_left: Vector2D, bottom_right: Vector2D) -> Self {
        let width = bottom_right.x - top_left.x;
        let height = bottom_right.y - top_left.y;
        let walls = [
            Wall::new(top_left, Vector2D::new(width, 0.0)),
            Wall::new(bottom_right, Vector2D::new(-width, 0.0)),
            Wall::new(top_left, Vector2D::new(0.0, height)),
            Wall::new(bottom_right, Vector2D::new(0.0, -height)),
        ];
        Self {
            top_left,
            bottom_right,
            walls,
        }
    }

    /// The corners the border was built from.
    pub fn corners(&self) -> (Vector2D, Vector2D) {
        (self.top_left, self.bottom_right)
    }

    /// Top, bottom, left, right.
    pub fn walls(&self) -> &[Wall; 4] {
        &self.walls
    }

    pub fn intersects(&self, position: Vector2D, direction: Vector2D) -> bool {
        self.walls.iter().any(|w| w.intersects(position, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector2D {
        Vector2D::new(x, y)
    }

    #[test]
    fn test_interior_crossing() {
        assert!(segments_intersect(
            v(0.0, 0.0),
            v(10.0, 10.0),
            v(0.0, 10.0),
            v(10.0, -10.0)
        ));
    }

    #[test]
    fn test_disjoint_segments() {
        assert!(!segments_intersect(
            v(0.0, 0.0),
            v(1.0, 1.0),
            v(5.0, 0.0),
            v(0.0, 3.0)
        ));
    }

    #[test]
    fn test_parallel_never_collide() {
        // Parallel offset
        assert!(!segments_intersect(
            v(0.0, 0.0),
            v(10.0, 0.0),
            v(0.0, 1.0),
            v(10.0, 0.0)
        ));
        // Collinear overlap is still parallel
        assert!(!segments_intersect(
            v(0.0, 0.0),
            v(10.0, 0.0),
            v(5.0, 0.0),
            v(10.0, 0.0)
        ));
    }

    #[test]
    fn test_degenerate_segment() {
        assert!(!segments_intersect(
            v(5.0, 5.0),
            Vector2D::ZERO,
            v(0.0, 5.0),
            v(10.0, 0.0)
        ));
    }

    #[test]
    fn test_touching_endpoint_counts() {
        assert!(segments_intersect(
            v(0.0, 0.0),
            v(5.0, 0.0),
            v(5.0, -5.0),
            v(0.0, 10.0)
        ));
    }

    #[test]
    fn test_wall_between() {
        let w = Wall::between(v(230.0, 20.0), v(230.0, 480.0));
        assert_eq!(w.displacement(), v(0.0, 460.0));
        assert_eq!(w.end(), v(230.0, 480.0));
        assert!(w.intersects(v(220.0, 250.0), v(20.0, 0.0)));
        assert!(!w.intersects(v(200.0, 250.0), v(20.0, 0.0)));
    }

    #[test]
    fn test_border_walls_close_rectangle() {
        let b = Border::new(v(20.0, 20.0), v(480.0, 480.0));
        let ends: Vec<(Vector2D, Vector2D)> =
            b.walls().iter().map(|w| (w.origin(), w.end())).collect();
        assert!(ends.contains(&(v(20.0, 20.0), v(480.0, 20.0))));
        assert!(ends.contains(&(v(480.0, 480.0), v(20.0, 480.0))));
        assert!(ends.contains(&(v(20.0, 20.0), v(20.0, 480.0))));
        assert!(ends.contains(&(v(480.0, 480.0), v(480.0, 20.0))));
        assert_eq!(b.corners(), (v(20.0, 20.0), v(480.0, 480.0)));
    }

    #[test]
    fn test_border_collision() {
        let b = Border::new(v(20.0, 20.0), v(480.0, 480.0));
        assert!(b.intersects(v(470.0, 250.0), v(20.0, 0.0)));
        assert!(b.intersects(v(250.0, 25.0), v(0.0, -10.0)));
        assert!(!b.intersects(v(250.0, 250.0), v(10.0, 10.0)));
    }
}
