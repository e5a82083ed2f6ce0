//! Centroidal Voronoi relaxation.
//!
//! Lloyd's method alternates between building the bounded diagram of the
//! sites and moving every site to the centroid of its cell. Sites are
//! mirrored across the region boundary first, so cells along the boundary
//! close on the boundary itself.

mod lloyd;

pub use lloyd::{lloyd2d, Lloyd, LloydStep, WeightField, DEFAULT_DEDUP_TOLERANCE};
