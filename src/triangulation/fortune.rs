//! Fortune's sweep-line algorithm.
//!
//! A horizontal line sweeps upward through the sites. Site events split an
//! arc of the beach line; circle events remove an arc and emit a Voronoi
//! vertex together with the Delaunay triangle of its three sites.
//!
//! # Complexity
//!
//! - Time: O(n log n) expected, with bucket hashing in place of balanced trees
//! - Space: O(n)
//!
//! # Example
//!
//! ```
//! use voronum::triangulation::compute_voronoi_diagram;
//! use voronum::Point2;
//!
//! let points = vec![
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(5.0, 8.0),
//! ];
//! let diagram = compute_voronoi_diagram(&points, true).unwrap();
//!
//! assert_eq!(diagram.vertices.len(), 1);
//! assert_eq!(diagram.edges.len(), 3);
//! assert_eq!(diagram.triangles.len(), 1);
//! ```

use super::beach_line::{ArcId, BeachLine};
use super::delaunay::Triangle;
use super::diagram::{Diagram, DiagramEdge};
use super::edge::{EdgeArena, Side};
use super::event_queue::EventQueue;
use super::site::{Site, SiteList};
use crate::error::{Result, VoronoiError};
use crate::primitives::Point2;
use crate::tolerance::{cast, RELATIVE_EPSILON};
use num_traits::Float;
use std::cmp::Ordering;

/// Computes the Voronoi diagram of `points`.
///
/// With `strict` set, degenerate input is reported as an error: fewer than
/// two sites, coincident sites, or non-finite coordinates. Otherwise the
/// failure is logged and an empty diagram is returned.
pub fn compute_voronoi_diagram<F: Float>(points: &[Point2<F>], strict: bool) -> Result<Diagram<F>> {
    match sweep(points) {
        Ok(diagram) => Ok(diagram),
        Err(err) if !strict => {
            log::warn!("voronoi sweep aborted, returning an empty diagram: {err}");
            Ok(Diagram::default())
        }
        Err(err) => Err(err),
    }
}

fn sweep<F: Float>(points: &[Point2<F>]) -> Result<Diagram<F>> {
    if points.len() < 2 {
        return Err(VoronoiError::TooFewSites {
            count: points.len(),
        });
    }
    let sites = SiteList::new(points)?;
    let diagram = Sweep::new(sites)?.run()?;
    log::debug!(
        "voronoi sweep: {} sites, {} vertices, {} edges, {} triangles",
        points.len(),
        diagram.vertices.len(),
        diagram.edges.len(),
        diagram.triangles.len()
    );
    Ok(diagram)
}

struct Sweep<F> {
    sites: SiteList<F>,
    edges: EdgeArena<F>,
    beach: BeachLine<F>,
    queue: EventQueue<F>,
    diagram: Diagram<F>,
    emitted: Vec<bool>,
    bottom: Site<F>,
    /// Event key at which each vertex was realized, indexed by vertex id.
    vertex_keys: Vec<F>,
    /// Distance below which two circle events share a vertex.
    merge_tolerance: F,
}

impl<F: Float> Sweep<F> {
    fn new(mut sites: SiteList<F>) -> Result<Self> {
        let bottom = sites
            .next_site()
            .ok_or(VoronoiError::TooFewSites { count: 0 })?;
        let n = sites.len();
        let (min, max) = (sites.min(), sites.max());
        let extent = (max.x - min.x).max(max.y - min.y);
        let merge_tolerance = if extent > F::zero() {
            cast::<F>(RELATIVE_EPSILON) * extent
        } else {
            F::epsilon()
        };
        Ok(Self {
            beach: BeachLine::new(min.x, max.x, n),
            queue: EventQueue::new(min.y, max.y, n),
            sites,
            edges: EdgeArena::new(),
            diagram: Diagram::default(),
            emitted: Vec::new(),
            bottom,
            vertex_keys: Vec::new(),
            merge_tolerance,
        })
    }

    fn run(mut self) -> Result<Diagram<F>> {
        let mut next = self.sites.next_site();
        loop {
            let min = self.queue.min_point();
            match (next, min) {
                (Some(site), None) => {
                    self.site_event(site)?;
                    next = self.sites.next_site();
                }
                (Some(site), Some(m)) if site.point.sweep_cmp(&m) == Ordering::Less => {
                    self.site_event(site)?;
                    next = self.sites.next_site();
                }
                (_, Some(_)) => self.circle_event()?,
                (None, None) => break,
            }
        }
        debug_assert!(self.queue.is_empty());
        self.finish();
        Ok(self.diagram)
    }

    fn site_event(&mut self, site: Site<F>) -> Result<()> {
        let lbnd = self.beach.locate(site.point, &self.edges);
        let rbnd = self.beach.right(lbnd);
        let bot = self.beach.right_site(lbnd, &self.edges, self.bottom);
        let edge = self.bisect(bot, site)?;

        let left_half = self.beach.create(edge, Side::Left);
        self.beach.insert_after(lbnd, left_half);
        if let Some(p) = self.beach.intersect(lbnd, left_half, &self.edges) {
            self.queue.delete(lbnd);
            self.queue.insert(lbnd, p, site.point.distance(p));
        }

        let right_half = self.beach.create(edge, Side::Right);
        self.beach.insert_after(left_half, right_half);
        if let Some(p) = self.beach.intersect(right_half, rbnd, &self.edges) {
            self.queue.insert(right_half, p, site.point.distance(p));
        }
        Ok(())
    }

    fn circle_event(&mut self) -> Result<()> {
        let Some((lbnd, vertex, ystar)) = self.queue.pop_min() else {
            return Ok(());
        };
        let llbnd = self.beach.left(lbnd);
        let rbnd = self.beach.right(lbnd);
        let rrbnd = self.beach.right(rbnd);

        let bot = self.beach.left_site(lbnd, &self.edges, self.bottom);
        let top = self.beach.right_site(rbnd, &self.edges, self.bottom);
        let mid = self.beach.right_site(lbnd, &self.edges, self.bottom);
        self.diagram.add_triangle(Triangle::new(bot.id, top.id, mid.id));

        let v = self.realize_vertex(vertex, ystar);
        self.close_at(lbnd, v);
        self.close_at(rbnd, v);
        self.beach.delete(lbnd);
        self.queue.delete(rbnd);
        self.beach.delete(rbnd);

        let (bot, top, side) = if bot.y() > top.y() {
            (top, bot, Side::Right)
        } else {
            (bot, top, Side::Left)
        };
        let edge = self.bisect(bot, top)?;
        let bisector = self.beach.create(edge, side);
        self.beach.insert_after(llbnd, bisector);
        self.close(edge, side.opposite(), v);

        if let Some(p) = self.beach.intersect(llbnd, bisector, &self.edges) {
            self.queue.delete(llbnd);
            self.queue.insert(llbnd, p, bot.point.distance(p));
        }
        if let Some(p) = self.beach.intersect(bisector, rrbnd, &self.edges) {
            self.queue.insert(bisector, p, bot.point.distance(p));
        }
        Ok(())
    }

    /// Emits every edge still open on the beach line.
    fn finish(&mut self) {
        log::trace!("sweep finished with {} bisectors", self.edges.len());
        let mut arc = self.beach.right(BeachLine::<F>::LEFT_END);
        while arc != BeachLine::<F>::RIGHT_END {
            if let Some(edge) = self.beach.edge(arc) {
                self.emit(edge);
            }
            arc = self.beach.right(arc);
        }
    }

    fn bisect(&mut self, left: Site<F>, right: Site<F>) -> Result<usize> {
        let id = self.edges.bisect(left, right)?;
        self.diagram.add_line(self.edges.get(id).line);
        self.emitted.push(false);
        Ok(id)
    }

    /// Returns the id for a vertex at `p` popped with key `ystar`.
    ///
    /// Cocircular sites raise one circle event per triple at the same point,
    /// and rounding may interleave other events between them. Every vertex
    /// realized within the tolerance band below `ystar` is a candidate.
    fn realize_vertex(&mut self, p: Point2<F>, ystar: F) -> usize {
        if let Some(id) = self.coincident_vertex(p, ystar) {
            log::trace!("circle event at vertex {} repeats", id);
            return id;
        }
        let id = self.sites.assign_vertex_id();
        let index = self.diagram.add_vertex(p);
        debug_assert_eq!(id, index);
        self.vertex_keys.push(ystar);
        id
    }

    fn coincident_vertex(&self, p: Point2<F>, ystar: F) -> Option<usize> {
        let tol = self.merge_tolerance;
        for (id, &key) in self.vertex_keys.iter().enumerate().rev() {
            if ystar - key > tol {
                break;
            }
            let q = self.diagram.vertices[id];
            if (q.x - p.x).abs() <= tol && (q.y - p.y).abs() <= tol {
                return Some(id);
            }
        }
        None
    }

    fn close_at(&mut self, arc: ArcId, vertex: usize) {
        if let Some(edge) = self.beach.edge(arc) {
            let side = self.beach.side(arc);
            self.close(edge, side, vertex);
        }
    }

    fn close(&mut self, edge: usize, side: Side, vertex: usize) {
        if self.edges.set_endpoint(edge, side, vertex) {
            self.emit(edge);
        }
    }

    fn emit(&mut self, id: usize) {
        if std::mem::replace(&mut self.emitted[id], true) {
            return;
        }
        let edge = self.edges.get(id);
        self.diagram.add_edge(
            DiagramEdge {
                id,
                left: edge.endpoints[0],
                right: edge.endpoints[1],
            },
            (edge.sites[0].id, edge.sites[1].id),
        );
    }
}
