//! 2D line segment type.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Segment2<F> {
    /// Creates a new segment.
    #[inline]
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        Self { start, end }
    }

    /// Vector from start to end.
    #[inline]
    pub fn direction(self) -> Vec2<F> {
        self.end - self.start
    }

    #[inline]
    pub fn length(self) -> F {
        self.direction().magnitude()
    }

    /// Point at parameter `t`, where `t = 0` is `start` and `t = 1` is `end`.
    #[inline]
    pub fn point_at(self, t: F) -> Point2<F> {
        self.start.lerp(self.end, t)
    }

    /// Parameter of the orthogonal projection of `p` onto the supporting line.
    ///
    /// Not clamped. Returns zero for degenerate segments.
    pub fn parameter_of(self, p: Point2<F>) -> F {
        let v = self.direction();
        let len_sq = v.magnitude_squared();
        if len_sq == F::zero() {
            return F::zero();
        }
        (p - self.start).dot(v) / len_sq
    }

    /// Closest point on the segment to `p`, with its clamped parameter.
    pub fn closest_point(self, p: Point2<F>) -> (Point2<F>, F) {
        let t = self.parameter_of(p).max(F::zero()).min(F::one());
        (self.point_at(t), t)
    }

    /// Distance from `p` to the segment.
    #[inline]
    pub fn distance_to_point(self, p: Point2<F>) -> F {
        let (closest, _) = self.closest_point(p);
        p.distance(closest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closest_point_clamps() {
        let s: Segment2<f64> = Segment2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let (p, t) = s.closest_point(Point2::new(4.0, 3.0));
        assert_eq!(p, Point2::new(4.0, 0.0));
        assert_relative_eq!(t, 0.4);

        let (p, t) = s.closest_point(Point2::new(-5.0, 1.0));
        assert_eq!(p, s.start);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_distance_to_point() {
        let s: Segment2<f64> = Segment2::new(Point2::new(0.0, 0.0), Point2::new(0.0, 2.0));
        assert_relative_eq!(s.distance_to_point(Point2::new(3.0, 1.0)), 3.0);
        assert_relative_eq!(s.distance_to_point(Point2::new(0.0, 6.0)), 4.0);
    }

    #[test]
    fn test_degenerate_parameter() {
        let p = Point2::new(1.0_f64, 1.0);
        let s = Segment2::new(p, p);
        assert_eq!(s.parameter_of(Point2::new(5.0, 5.0)), 0.0);
        assert_relative_eq!(s.length(), 0.0);
    }
}
