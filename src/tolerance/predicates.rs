//! Scalar tolerance predicates.

use crate::primitives::Point2;
use num_traits::Float;

/// Relative tolerance used by the sweep for parallelism and coincidence tests.
pub const RELATIVE_EPSILON: f64 = 1e-9;

/// Absolute band used for "on the boundary" decisions against bound regions.
pub const BOUNDARY_EPSILON: f64 = 1e-8;

/// Boundary tolerance for a region of the given extent.
///
/// Scales `BOUNDARY_EPSILON` by `extent`; a zero extent falls back to the
/// machine epsilon of `F`.
#[inline]
pub fn scaled_tolerance<F: Float>(extent: F) -> F {
    if extent > F::zero() {
        cast::<F>(BOUNDARY_EPSILON) * extent
    } else {
        F::epsilon()
    }
}

/// Converts an `f64` constant into `F`.
///
/// Every `Float` type can represent an `f64` approximately, so the NaN
/// fallback is never hit for the built-in float types.
#[inline]
pub fn cast<F: Float>(value: f64) -> F {
    F::from(value).unwrap_or_else(F::nan)
}

/// Returns true if `a` and `b` agree to within a relative error of `rel`.
///
/// Values whose magnitudes are both below `rel` are treated as equal, so
/// comparisons against zero behave.
///
/// # Example
///
/// ```
/// use voronum::tolerance::is_nearly_equal;
///
/// assert!(is_nearly_equal(1.0_f64, 1.0 + 1e-12, 1e-9));
/// assert!(!is_nearly_equal(1.0_f64, 1.001, 1e-9));
/// assert!(is_nearly_equal(0.0_f64, 1e-12, 1e-9));
/// ```
#[inline]
pub fn is_nearly_equal<F: Float>(a: F, b: F, rel: F) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    if scale < rel {
        return true;
    }
    (a - b).abs() < rel * scale
}

/// Coordinate-wise [`is_nearly_equal`].
#[inline]
pub fn points_nearly_equal<F: Float>(a: Point2<F>, b: Point2<F>, rel: F) -> bool {
    is_nearly_equal(a.x, b.x, rel) && is_nearly_equal(a.y, b.y, rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_scale() {
        let rel = cast::<f64>(RELATIVE_EPSILON);
        assert!(is_nearly_equal(1e12, 1e12 + 1.0, rel));
        assert!(!is_nearly_equal(1.0, 1.0 + 1e-6, rel));
    }

    #[test]
    fn test_near_zero() {
        assert!(is_nearly_equal(1e-12_f64, 0.0, 1e-9));
        assert!(!is_nearly_equal(1e-3_f64, 0.0, 1e-9));
    }

    #[test]
    fn test_points() {
        let a = Point2::new(5.0_f64, 5.0);
        let b = Point2::new(5.0 + 1e-12, 5.0 - 1e-12);
        assert!(points_nearly_equal(a, b, 1e-9));
        assert!(!points_nearly_equal(a, Point2::new(5.0, 5.1), 1e-9));
    }
}
