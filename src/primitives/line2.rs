//! 2D infinite line in implicit form.

use super::{Circle2, Point2, Segment2, Vec2};
use crate::tolerance::{cast, RELATIVE_EPSILON};
use num_traits::Float;

/// A 2D infinite line `a·x + b·y = c`.
///
/// Bisectors produced by the sweep are normalized so that either `a` or `b`
/// is exactly one; other lines may carry any non-zero normal.
///
/// # Example
///
/// ```
/// use voronum::primitives::{LineEquation2, Point2};
///
/// // The vertical line x = 5
/// let line: LineEquation2<f64> = LineEquation2::new(1.0, 0.0, 5.0);
/// assert_eq!(line.evaluate(Point2::new(7.0, 3.0)), 2.0);
/// assert_eq!(line.closest_point(Point2::new(7.0, 3.0)), Point2::new(5.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEquation2<F> {
    pub a: F,
    pub b: F,
    pub c: F,
}

impl<F: Float> LineEquation2<F> {
    /// Creates the line `a·x + b·y = c`.
    #[inline]
    pub fn new(a: F, b: F, c: F) -> Self {
        Self { a, b, c }
    }

    /// The line through `p` and `q`. Degenerate (all zero) when `p == q`.
    pub fn from_two_points(p: Point2<F>, q: Point2<F>) -> Self {
        let a = p.y - q.y;
        let b = q.x - p.x;
        Self::new(a, b, a * p.x + b * p.y)
    }

    /// Residual `a·x + b·y - c`; zero on the line, signed by side.
    #[inline]
    pub fn evaluate(&self, p: Point2<F>) -> F {
        self.a * p.x + self.b * p.y - self.c
    }

    /// Normal vector `(a, b)`, not normalized.
    #[inline]
    pub fn normal(&self) -> Vec2<F> {
        Vec2::new(self.a, self.b)
    }

    /// Direction vector `(b, -a)`, not normalized.
    #[inline]
    pub fn direction(&self) -> Vec2<F> {
        Vec2::new(self.b, -self.a)
    }

    /// Euclidean signed distance from `p`, positive on the side the normal points to.
    #[inline]
    pub fn signed_distance(&self, p: Point2<F>) -> F {
        self.evaluate(p) / self.normal().magnitude()
    }

    /// Orthogonal projection of `p` onto the line.
    pub fn closest_point(&self, p: Point2<F>) -> Point2<F> {
        let n = self.normal();
        let k = self.evaluate(p) / n.magnitude_squared();
        p - n * k
    }

    /// Intersection with another line, or `None` when the two are parallel.
    ///
    /// The determinant is compared against the product of the normal
    /// lengths, so the test does not depend on how either line is scaled.
    pub fn intersect_line(&self, other: &Self) -> Option<Point2<F>> {
        let d = self.a * other.b - self.b * other.a;
        let scale = self.normal().magnitude() * other.normal().magnitude();
        if d.abs() <= cast::<F>(RELATIVE_EPSILON) * scale {
            return None;
        }
        let x = (self.c * other.b - other.c * self.b) / d;
        let y = (other.c * self.a - self.c * other.a) / d;
        Some(Point2::new(x, y))
    }

    /// Intersection with a segment, endpoints included.
    ///
    /// Returns `None` when the segment lies strictly on one side or runs
    /// parallel to the line.
    pub fn intersect_segment(&self, segment: &Segment2<F>) -> Option<Point2<F>> {
        let e0 = self.evaluate(segment.start);
        let e1 = self.evaluate(segment.end);
        if (e0 > F::zero() && e1 > F::zero()) || (e0 < F::zero() && e1 < F::zero()) {
            return None;
        }
        let denom = e0 - e1;
        if denom == F::zero() {
            // Both endpoints lie on the line.
            return if e0 == F::zero() {
                Some(segment.start)
            } else {
                None
            };
        }
        Some(segment.point_at(e0 / denom))
    }

    /// Intersections with a circle, ordered along [`direction`](Self::direction).
    ///
    /// Returns one point for a tangent line and none when the line misses.
    pub fn intersect_circle(&self, circle: &Circle2<F>) -> Vec<Point2<F>> {
        let foot = self.closest_point(circle.center);
        let d_sq = foot.distance_squared(circle.center);
        let r_sq = circle.radius * circle.radius;
        let band = cast::<F>(RELATIVE_EPSILON) * r_sq;

        if d_sq > r_sq + band {
            return Vec::new();
        }
        let h_sq = r_sq - d_sq;
        if h_sq <= band {
            return vec![foot];
        }
        match self.direction().normalize() {
            Some(dir) => {
                let h = h_sq.sqrt();
                vec![foot - dir * h, foot + dir * h]
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_two_points() {
        let line: LineEquation2<f64> =
            LineEquation2::from_two_points(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
        assert_relative_eq!(line.evaluate(Point2::new(3.0, 3.0)), 0.0);
        assert!(line.evaluate(Point2::new(0.0, 1.0)) != 0.0);
    }

    #[test]
    fn test_signed_distance() {
        let line: LineEquation2<f64> = LineEquation2::new(0.0, 2.0, 2.0); // y = 1
        assert_relative_eq!(line.signed_distance(Point2::new(4.0, 3.0)), 2.0);
        assert_relative_eq!(line.signed_distance(Point2::new(4.0, -1.0)), -2.0);
    }

    #[test]
    fn test_intersect_line() {
        let vertical: LineEquation2<f64> = LineEquation2::new(1.0, 0.0, 5.0);
        let horizontal = LineEquation2::new(0.0, 1.0, 2.0);
        let p = vertical.intersect_line(&horizontal).unwrap();
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 2.0);
    }

    #[test]
    fn test_parallel_lines() {
        let l1: LineEquation2<f64> = LineEquation2::new(1.0, 0.5, 1.0);
        let l2 = LineEquation2::new(1.0, 0.5, 3.0);
        assert!(l1.intersect_line(&l2).is_none());
    }

    #[test]
    fn test_intersect_segment() {
        let line: LineEquation2<f64> = LineEquation2::new(1.0, 0.0, 5.0);
        let crossing = Segment2::new(Point2::new(0.0, 1.0), Point2::new(10.0, 1.0));
        let p = line.intersect_segment(&crossing).unwrap();
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 1.0);

        let short = Segment2::new(Point2::new(0.0, 1.0), Point2::new(4.0, 1.0));
        assert!(line.intersect_segment(&short).is_none());

        let touching = Segment2::new(Point2::new(5.0, 0.0), Point2::new(9.0, 1.0));
        assert_eq!(line.intersect_segment(&touching), Some(Point2::new(5.0, 0.0)));
    }

    #[test]
    fn test_intersect_circle() {
        let circle: Circle2<f64> = Circle2::new(Point2::new(0.0, 0.0), 2.0);

        let through = LineEquation2::new(0.0, 1.0, 0.0);
        let hits = through.intersect_circle(&circle);
        assert_eq!(hits.len(), 2);
        for p in &hits {
            assert_relative_eq!(p.distance(circle.center), 2.0, epsilon = 1e-12);
        }

        let tangent = LineEquation2::new(0.0, 1.0, 2.0);
        assert_eq!(tangent.intersect_circle(&circle).len(), 1);

        let miss = LineEquation2::new(0.0, 1.0, 3.0);
        assert!(miss.intersect_circle(&circle).is_empty());
    }
}
