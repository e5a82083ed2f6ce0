//! Axis-aligned bounding box.

use crate::primitives::{LineEquation2, Point2, Segment2};
use crate::tolerance::{cast, scaled_tolerance, BOUNDARY_EPSILON};
use num_traits::Float;

/// A 2D axis-aligned bounding box.
///
/// Defined by minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Point2<F>,
    /// Maximum corner (largest x and y values).
    pub max: Point2<F>,
}

impl<F: Float> Aabb2<F> {
    /// Creates a new AABB from min and max corners.
    ///
    /// Does not validate that min <= max.
    #[inline]
    pub fn new(min: Point2<F>, max: Point2<F>) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from an iterator of points.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<F>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |aabb, p| {
            Self::new(
                Point2::new(aabb.min.x.min(p.x), aabb.min.y.min(p.y)),
                Point2::new(aabb.max.x.max(p.x), aabb.max.y.max(p.y)),
            )
        }))
    }

    /// Returns a copy grown by `margin` on every side.
    #[inline]
    pub fn expanded(self, margin: F) -> Self {
        Self::new(
            Point2::new(self.min.x - margin, self.min.y - margin),
            Point2::new(self.max.x + margin, self.max.y + margin),
        )
    }

    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(self) -> F {
        self.width() * self.height()
    }

    /// Returns the center point of the AABB.
    #[inline]
    pub fn center(self) -> Point2<F> {
        self.min.midpoint(self.max)
    }

    /// Tests whether `p` lies in the box, optionally counting the sides as inside.
    pub fn contains_point(self, p: Point2<F>, include_boundary: bool) -> bool {
        if include_boundary {
            p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
        } else {
            p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
        }
    }

    /// Corners in counter-clockwise order, starting at `min`.
    pub fn corners(self) -> [Point2<F>; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// Sides as segments, counter-clockwise.
    pub fn edges(self) -> [Segment2<F>; 4] {
        let c = self.corners();
        [
            Segment2::new(c[0], c[1]),
            Segment2::new(c[1], c[2]),
            Segment2::new(c[2], c[3]),
            Segment2::new(c[3], c[0]),
        ]
    }

    /// Clamps `p` into the box.
    #[inline]
    pub fn clamp(self, p: Point2<F>) -> Point2<F> {
        Point2::new(
            p.x.max(self.min.x).min(self.max.x),
            p.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Points where an infinite line meets the sides of the box.
    ///
    /// A line through a corner reports that corner once.
    pub fn intersect_line(self, line: &LineEquation2<F>) -> Vec<Point2<F>> {
        let mut hits: Vec<Point2<F>> = Vec::with_capacity(2);
        let tol = self.tolerance();
        for side in self.edges() {
            if let Some(p) = line.intersect_segment(&side) {
                if !hits.iter().any(|q| q.distance(p) <= tol) {
                    hits.push(p);
                }
            }
        }
        hits
    }

    /// Points where a segment crosses the sides of the box, ordered from `segment.start`.
    pub fn intersect_segment(self, segment: &Segment2<F>) -> Vec<Point2<F>> {
        let line = LineEquation2::from_two_points(segment.start, segment.end);
        if line.normal().magnitude_squared() == F::zero() {
            return Vec::new();
        }
        let eps = cast::<F>(BOUNDARY_EPSILON);
        let mut hits: Vec<(F, Point2<F>)> = self
            .intersect_line(&line)
            .into_iter()
            .map(|p| (segment.parameter_of(p), p))
            .filter(|&(t, _)| t >= -eps && t <= F::one() + eps)
            .collect();
        hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        hits.into_iter().map(|(_, p)| p).collect()
    }

    /// Mirror images of `p` across each of the four sides.
    pub fn reflect_point(self, p: Point2<F>) -> [Point2<F>; 4] {
        let two = F::one() + F::one();
        [
            Point2::new(two * self.min.x - p.x, p.y),
            Point2::new(two * self.max.x - p.x, p.y),
            Point2::new(p.x, two * self.min.y - p.y),
            Point2::new(p.x, two * self.max.y - p.y),
        ]
    }

    /// Distance below which two points on the sides are considered the same.
    pub(crate) fn tolerance(self) -> F {
        scaled_tolerance(self.width().max(self.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Aabb2<f64> {
        Aabb2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0))
    }

    #[test]
    fn test_from_points_with_margin() {
        let points = vec![Point2::new(1.0, 2.0), Point2::new(4.0, -1.0), Point2::new(3.0, 7.0)];
        let aabb: Aabb2<f64> = Aabb2::from_points(points).unwrap().expanded(1.0);
        assert_eq!(aabb.min, Point2::new(0.0, -2.0));
        assert_eq!(aabb.max, Point2::new(5.0, 8.0));
        assert!(Aabb2::<f64>::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_contains_boundary_flag() {
        let b = square();
        assert!(b.contains_point(Point2::new(0.0, 5.0), true));
        assert!(!b.contains_point(Point2::new(0.0, 5.0), false));
        assert!(b.contains_point(Point2::new(5.0, 5.0), false));
        assert!(!b.contains_point(Point2::new(11.0, 5.0), true));
    }

    #[test]
    fn test_intersect_line_through_corner() {
        let diagonal = LineEquation2::from_two_points(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let hits = square().intersect_line(&diagonal);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_intersect_segment_order() {
        let seg = Segment2::new(Point2::new(-5.0, 5.0), Point2::new(15.0, 5.0));
        let hits = square().intersect_segment(&seg);
        assert_eq!(hits.len(), 2);
        assert_relative_eq!(hits[0].x, 0.0);
        assert_relative_eq!(hits[1].x, 10.0);

        let outside = Segment2::new(Point2::new(-5.0, 5.0), Point2::new(-1.0, 5.0));
        assert!(square().intersect_segment(&outside).is_empty());
    }

    #[test]
    fn test_clamp_and_reflect() {
        let b = square();
        assert_eq!(b.clamp(Point2::new(-3.0, 12.0)), Point2::new(0.0, 10.0));
        let ghosts = b.reflect_point(Point2::new(2.0, 3.0));
        assert_eq!(ghosts[0], Point2::new(-2.0, 3.0));
        assert_eq!(ghosts[1], Point2::new(18.0, 3.0));
        assert_eq!(ghosts[2], Point2::new(2.0, -3.0));
        assert_eq!(ghosts[3], Point2::new(2.0, 17.0));
    }
}
