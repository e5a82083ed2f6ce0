//! Bounded Voronoi meshes.
//!
//! The sweep leaves rays and full lines unbounded. This module clips the
//! diagram to a [`Bounds`](crate::bounds::Bounds) region, optionally
//! stitches the region's contour into the mesh and extracts the closed
//! faces.
//!
//! # Example
//!
//! ```
//! use voronum::mesh::{voronoi_bounded, ClipOptions};
//! use voronum::bounds::BoundKind;
//! use voronum::Point2;
//!
//! let sites = [
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(4.0, 1.0),
//!     Point2::new(2.0, 3.0),
//! ];
//! let options = ClipOptions::default().with_faces(true).with_faces_by_site(true);
//! let mesh = voronoi_bounded(&sites, BoundKind::Box, 1.0, &options).unwrap();
//! assert_eq!(mesh.faces.len(), 3);
//! ```

mod clip;
mod faces;
mod graph;

pub use clip::{clip_diagram, clip_mesh, voronoi_bounded, BoundedDiagram, ClipOptions};
pub use faces::{polygon_boundary_distance, polygon_contains, polygon_signed_area};
