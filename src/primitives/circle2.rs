//! 2D circle type.

use super::{LineEquation2, Point2, Segment2};
use crate::tolerance::{cast, BOUNDARY_EPSILON};
use num_traits::Float;

/// A 2D circle defined by center and radius.
///
/// # Example
///
/// ```
/// use voronum::primitives::{Circle2, Point2};
///
/// let circle: Circle2<f64> = Circle2::new(Point2::new(0.0, 0.0), 1.0);
/// assert!(circle.contains(Point2::new(0.5, 0.0), false));
/// assert!(circle.contains(Point2::new(1.0, 0.0), true));
/// assert!(!circle.contains(Point2::new(1.0, 0.0), false));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle2<F> {
    /// Center point of the circle
    pub center: Point2<F>,
    /// Radius of the circle (must be non-negative)
    pub radius: F,
}

impl<F: Float> Circle2<F> {
    /// Creates a new circle from center and radius.
    #[inline]
    pub fn new(center: Point2<F>, radius: F) -> Self {
        Self { center, radius }
    }

    /// Returns the area of the circle.
    #[inline]
    pub fn area(self) -> F {
        cast::<F>(std::f64::consts::PI) * self.radius * self.radius
    }

    /// Tests whether `p` lies inside the circle.
    ///
    /// The boundary counts as inside when `include_boundary` is set; the
    /// boundary itself is a band of `BOUNDARY_EPSILON · r²` on the squared
    /// distance residual.
    pub fn contains(self, p: Point2<F>, include_boundary: bool) -> bool {
        let eps = cast::<F>(BOUNDARY_EPSILON) * self.radius * self.radius;
        let residual = p.distance_squared(self.center) - self.radius * self.radius;
        if include_boundary {
            residual <= eps
        } else {
            residual < -eps
        }
    }

    /// Nearest point on the circle to `p`.
    ///
    /// The center itself projects onto the point at angle zero.
    pub fn nearest_point(self, p: Point2<F>) -> Point2<F> {
        match (p - self.center).normalize() {
            Some(dir) => self.center + dir * self.radius,
            None => Point2::new(self.center.x + self.radius, self.center.y),
        }
    }

    /// Mirror image of `p` across the circle boundary, along the radius through `p`.
    pub fn reflect_point(self, p: Point2<F>) -> Point2<F> {
        let two = F::one() + F::one();
        p + (self.nearest_point(p) - p) * two
    }

    /// Intersections of the circle with an infinite line.
    #[inline]
    pub fn intersect_line(self, line: &LineEquation2<F>) -> Vec<Point2<F>> {
        line.intersect_circle(&self)
    }

    /// Intersections with a segment, ordered from `segment.start`.
    pub fn intersect_segment(self, segment: &Segment2<F>) -> Vec<Point2<F>> {
        let line = LineEquation2::from_two_points(segment.start, segment.end);
        if line.normal().magnitude_squared() == F::zero() {
            return Vec::new();
        }
        let eps = cast::<F>(BOUNDARY_EPSILON);
        let mut hits: Vec<(F, Point2<F>)> = line
            .intersect_circle(&self)
            .into_iter()
            .map(|p| (segment.parameter_of(p), p))
            .filter(|&(t, _)| t >= -eps && t <= F::one() + eps)
            .collect();
        hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        hits.into_iter().map(|(_, p)| p).collect()
    }
}
