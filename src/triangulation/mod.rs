//! Voronoi diagrams and Delaunay triangulations by Fortune's sweep.
//!
//! The sweep state (sorted sites, bisector arena, beach line, event queue)
//! is private to one computation; only the [`Diagram`] it produces escapes.

mod beach_line;
mod delaunay;
mod diagram;
mod edge;
mod event_queue;
mod fortune;
mod site;

pub(crate) use edge::{open_end_direction, Side};

pub use delaunay::{compute_delaunay_triangulation, in_circumcircle, Triangle};
pub use diagram::{Diagram, DiagramEdge};
pub use fortune::compute_voronoi_diagram;
