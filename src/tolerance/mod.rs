//! Tolerance-aware float comparisons and point de-duplication.
//!
//! Comparisons in the sweep are relative, so results do not depend on the
//! scale of the input. De-duplication takes an explicit absolute epsilon.

mod predicates;
mod weld;

pub use predicates::{
    cast, is_nearly_equal, points_nearly_equal, scaled_tolerance, BOUNDARY_EPSILON, RELATIVE_EPSILON,
};
pub use weld::{unique_points, UniquePoints};
