//! 3D point type used for mesh output.

use super::Point2;
use num_traits::Float;

/// A 3D point with x, y, and z coordinates.
///
/// Planar results are lifted into 3D with `z = 0` so they can be handed to
/// mesh consumers unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3<F> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Point3<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F, z: F) -> Self {
        Self { x, y, z }
    }

    /// Lifts a planar point onto the `z = 0` plane.
    #[inline]
    pub fn from_xy(p: Point2<F>) -> Self {
        Self::new(p.x, p.y, F::zero())
    }

    /// Drops the z coordinate.
    #[inline]
    pub fn xy(self) -> Point2<F> {
        Point2::new(self.x, self.y)
    }

    /// Computes the squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx * dx + dy * dy + dz * dz
    }
}

impl<F: Float> From<Point2<F>> for Point3<F> {
    fn from(p: Point2<F>) -> Self {
        Self::from_xy(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_and_drop() {
        let p: Point3<f64> = Point2::new(1.5, -2.0).into();
        assert_eq!(p, Point3::new(1.5, -2.0, 0.0));
        assert_eq!(p.xy(), Point2::new(1.5, -2.0));
    }

    #[test]
    fn test_distance_squared() {
        let a: Point3<f64> = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 3.0, 6.0);
        assert_eq!(a.distance_squared(b), 49.0);
    }
}
