//! Tolerance-based point de-duplication.
//!
//! # Example
//!
//! ```
//! use voronum::tolerance::unique_points;
//! use voronum::Point2;
//!
//! let points = vec![
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(0.00001, 0.0), // lands on the first point
//!     Point2::new(1.0, 0.0),
//! ];
//!
//! let unique = unique_points(&points, 1e-4);
//! assert_eq!(unique.representatives, vec![0, 2]);
//! assert_eq!(unique.is_representative, vec![true, false, true]);
//! ```

use crate::primitives::Point2;
use num_traits::Float;

/// Result of [`unique_points`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniquePoints {
    /// Input indices that survive, in input order.
    pub representatives: Vec<usize>,
    /// One flag per input point; false for points absorbed by an earlier one.
    pub is_representative: Vec<bool>,
}

/// Marks the first point of every cluster of points within `epsilon`.
///
/// A point is absorbed when it lies within `epsilon` of an earlier
/// representative. Later cluster members are never representatives, so
/// exactly one point of each cluster survives and the input order of the
/// survivors is kept.
///
/// # Complexity
///
/// O(n·k) where k is the number of representatives.
pub fn unique_points<F: Float>(points: &[Point2<F>], epsilon: F) -> UniquePoints {
    let eps_sq = epsilon * epsilon;
    let mut representatives: Vec<usize> = Vec::new();
    let mut is_representative = vec![false; points.len()];

    for (i, &p) in points.iter().enumerate() {
        let absorbed = representatives
            .iter()
            .any(|&r| points[r].distance_squared(p) <= eps_sq);
        if !absorbed {
            representatives.push(i);
            is_representative[i] = true;
        }
    }

    UniquePoints {
        representatives,
        is_representative,
    }
}
