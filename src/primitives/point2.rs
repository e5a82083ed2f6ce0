//! 2D point type.

use super::Vec2;
use num_traits::Float;
use std::cmp::Ordering;
use std::ops::{Add, Sub};

/// A 2D point with x and y coordinates.
///
/// Generic over floating-point types (`f32` or `f64`).
///
/// # Example
///
/// ```
/// use voronum::primitives::Point2;
///
/// let a: Point2<f64> = Point2::new(0.0, 0.0);
/// let b = Point2::new(3.0, 4.0);
/// assert_eq!(a.distance(b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Point2<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Creates a point at the origin (0, 0).
    #[inline]
    pub fn origin() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
        }
    }

    /// Computes the squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Computes the Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> F {
        self.distance_squared(other).sqrt()
    }

    /// Linearly interpolates between `self` and `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: F) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Returns the midpoint between `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        let two = F::one() + F::one();
        Self {
            x: (self.x + other.x) / two,
            y: (self.y + other.y) / two,
        }
    }

    /// Converts this point to a vector from the origin.
    #[inline]
    pub fn to_vec(self) -> Vec2<F> {
        Vec2::new(self.x, self.y)
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Orders points the way a bottom-to-top sweep meets them: by `y`, then by `x`.
    ///
    /// NaN coordinates compare as equal.
    pub fn sweep_cmp(&self, other: &Self) -> Ordering {
        self.y
            .partial_cmp(&other.y)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.x.partial_cmp(&other.x).unwrap_or(Ordering::Equal))
    }
}

// Point - Point = Vec2
impl<F: Float> Sub for Point2<F> {
    type Output = Vec2<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec2<F> {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

// Point + Vec2 = Point
impl<F: Float> Add<Vec2<F>> for Point2<F> {
    type Output = Self;

    #[inline]
    fn add(self, v: Vec2<F>) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }
}

// Point - Vec2 = Point
impl<F: Float> Sub<Vec2<F>> for Point2<F> {
    type Output = Self;

    #[inline]
    fn sub(self, v: Vec2<F>) -> Self {
        Self::new(self.x - v.x, self.y - v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        let a: Point2<f64> = Point2::new(1.0, 1.0);
        let b = Point2::new(4.0, 5.0);
        assert_relative_eq!(a.distance(b), 5.0);
        assert_relative_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn test_midpoint_and_lerp() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 4.0);
        assert_eq!(a.midpoint(b), Point2::new(5.0, 2.0));
        assert_eq!(a.lerp(b, 0.25), Point2::new(2.5, 1.0));
    }

    #[test]
    fn test_sweep_order_is_y_then_x() {
        let low: Point2<f64> = Point2::new(9.0, 0.0);
        let high = Point2::new(0.0, 1.0);
        let right = Point2::new(10.0, 0.0);
        assert_eq!(low.sweep_cmp(&high), Ordering::Less);
        assert_eq!(low.sweep_cmp(&right), Ordering::Less);
        assert_eq!(right.sweep_cmp(&right), Ordering::Equal);
    }

    #[test]
    fn test_vector_arithmetic() {
        let p: Point2<f64> = Point2::new(1.0, 2.0);
        let q = p + Vec2::new(2.0, -1.0);
        assert_eq!(q, Point2::new(3.0, 1.0));
        assert_eq!(q - p, Vec2::new(2.0, -1.0));
        assert_eq!(q - Vec2::new(2.0, -1.0), p);
    }
}
