//! Bound regions for clipping and relaxation.

mod aabb;
mod region;

pub use aabb::Aabb2;
pub use region::{BoundKind, Bounds};
