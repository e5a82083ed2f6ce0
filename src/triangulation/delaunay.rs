//! Delaunay triangulation as the dual of the Voronoi sweep.
//!
//! Every circle event of the sweep joins three sites whose circumcircle is
//! empty, so the sweep yields the Delaunay triangles for free.
//!
//! # Example
//!
//! ```
//! use voronum::triangulation::compute_delaunay_triangulation;
//! use voronum::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.5, 1.0),
//!     Point2::new(0.5, 0.3),
//! ];
//!
//! let triangles = compute_delaunay_triangulation(&points);
//! assert_eq!(triangles.len(), 3);
//! for tri in &triangles {
//!     assert!(tri.contains_vertex(3));
//! }
//! ```

use super::fortune::compute_voronoi_diagram;
use crate::primitives::{Circle2, Point2};
use num_traits::Float;

/// A triangle represented by indices into a point array.
///
/// Vertex order is the order the sweep reports; it is not normalized to
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// First vertex index
    pub a: usize,
    /// Second vertex index
    pub b: usize,
    /// Third vertex index
    pub c: usize,
}

impl Triangle {
    /// Creates a new triangle from vertex indices.
    #[inline]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    /// Returns the three edges of this triangle as pairs of indices.
    #[inline]
    pub fn edges(&self) -> [(usize, usize); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    /// Checks if the triangle contains a specific vertex index.
    #[inline]
    pub fn contains_vertex(&self, v: usize) -> bool {
        self.a == v || self.b == v || self.c == v
    }

    /// Circumscribed circle of the triangle over `points`.
    ///
    /// Returns `None` for collinear vertices.
    pub fn circumcircle<F: Float>(&self, points: &[Point2<F>]) -> Option<Circle2<F>> {
        let (a, b, c) = (points[self.a], points[self.b], points[self.c]);
        let two = F::one() + F::one();
        let d = two * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d == F::zero() {
            return None;
        }
        let aa = a.to_vec().magnitude_squared();
        let bb = b.to_vec().magnitude_squared();
        let cc = c.to_vec().magnitude_squared();
        let ux = (aa * (b.y - c.y) + bb * (c.y - a.y) + cc * (a.y - b.y)) / d;
        let uy = (aa * (c.x - b.x) + bb * (a.x - c.x) + cc * (b.x - a.x)) / d;
        let center = Point2::new(ux, uy);
        Some(Circle2::new(center, center.distance(a)))
    }
}

/// Computes the Delaunay triangulation of `points`.
///
/// Degenerate input is tolerated: it is logged and yields no triangles.
/// Indices refer to `points`.
pub fn compute_delaunay_triangulation<F: Float>(points: &[Point2<F>]) -> Vec<Triangle> {
    match compute_voronoi_diagram(points, false) {
        Ok(diagram) => diagram.triangles,
        Err(_) => Vec::new(),
    }
}

/// Tests if a point lies strictly inside the circumcircle of a triangle.
///
/// Works for either vertex orientation.
///
/// # Example
///
/// ```
/// use voronum::triangulation::in_circumcircle;
/// use voronum::Point2;
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// let c = Point2::new(0.5, 0.866);
///
/// assert!(in_circumcircle(Point2::new(0.5, 0.29), a, b, c));
/// assert!(in_circumcircle(Point2::new(0.5, 0.29), a, c, b));
/// assert!(!in_circumcircle(Point2::new(10.0, 10.0), a, b, c));
/// ```
pub fn in_circumcircle<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    let ax = a.x - p.x;
    let ay = a.y - p.y;
    let bx = b.x - p.x;
    let by = b.y - p.y;
    let cx = c.x - p.x;
    let cy = c.y - p.y;

    let aa = ax * ax + ay * ay;
    let bb = bx * bx + by * by;
    let cc = cx * cx + cy * cy;

    let det = ax * (by * cc - cy * bb) - ay * (bx * cc - cx * bb) + aa * (bx * cy - cx * by);
    let orientation = (b - a).cross(c - a);

    if orientation > F::zero() {
        det > F::zero()
    } else {
        det < F::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_too_few_points() {
        assert!(compute_delaunay_triangulation::<f64>(&[]).is_empty());
        assert!(compute_delaunay_triangulation(&[Point2::new(0.0_f64, 0.0)]).is_empty());
        let two = [Point2::new(0.0_f64, 0.0), Point2::new(1.0, 0.0)];
        assert!(compute_delaunay_triangulation(&two).is_empty());
    }

    #[test]
    fn test_empty_circumcircles() {
        let points: Vec<Point2<f64>> = vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.1, 0.4),
            Point2::new(6.0, -0.2),
            Point2::new(1.2, 2.9),
            Point2::new(4.4, 3.3),
            Point2::new(2.5, 5.8),
            Point2::new(-1.5, 4.1),
        ];
        let triangles = compute_delaunay_triangulation(&points);
        assert!(!triangles.is_empty());
        for tri in &triangles {
            let (a, b, c) = (points[tri.a], points[tri.b], points[tri.c]);
            for (i, &p) in points.iter().enumerate() {
                if tri.contains_vertex(i) {
                    continue;
                }
                assert!(!in_circumcircle(p, a, b, c), "{:?} contains site {}", tri, i);
            }
        }
    }

    #[test]
    fn test_circumcircle() {
        let points = [
            Point2::new(0.0_f64, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        ];
        let circle = Triangle::new(0, 1, 2).circumcircle(&points).unwrap();
        assert_relative_eq!(circle.center.x, 2.0);
        assert_relative_eq!(circle.center.y, 2.0);
        assert_relative_eq!(circle.radius, 8.0_f64.sqrt());

        let collinear = [
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert!(Triangle::new(0, 1, 2).circumcircle(&collinear).is_none());
    }

    #[test]
    fn test_triangle_edges() {
        let t = Triangle::new(4, 1, 7);
        assert_eq!(t.edges(), [(4, 1), (1, 7), (7, 4)]);
        assert!(t.contains_vertex(7));
        assert!(!t.contains_vertex(0));
    }
}
