//! voronum - Voronoi diagrams by Fortune's sweep
//!
//! Builds the planar Voronoi diagram and its dual Delaunay triangulation of a
//! set of 2D points, clips the unbounded diagram into a finite mesh inside a
//! box or circle, and relaxes point sets towards a centroidal Voronoi
//! tessellation with Lloyd's method.
//!
//! # Example
//!
//! ```
//! use voronum::{compute_voronoi_diagram, Point2};
//!
//! let sites = vec![
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(0.0, 10.0),
//!     Point2::new(10.0, 10.0),
//! ];
//!
//! let diagram = compute_voronoi_diagram(&sites, true).unwrap();
//! assert_eq!(diagram.vertices.len(), 1);
//! assert!(diagram.edges.iter().all(|e| e.is_ray()));
//! ```

pub mod bounds;
pub mod error;
pub mod mesh;
pub mod primitives;
pub mod relax;
pub mod tolerance;
pub mod triangulation;

pub use bounds::{BoundKind, Bounds};
pub use error::{Result, VoronoiError};
pub use mesh::{clip_diagram, clip_mesh, voronoi_bounded, BoundedDiagram, ClipOptions};
pub use primitives::{Circle2, LineEquation2, Point2, Point3, Segment2, Vec2};
pub use relax::{lloyd2d, Lloyd, LloydStep};
pub use triangulation::{
    compute_delaunay_triangulation, compute_voronoi_diagram, Diagram, DiagramEdge, Triangle,
};
