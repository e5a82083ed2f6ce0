//! Clipping an unbounded Voronoi diagram to a bound region.

use super::faces::{extract_faces, faces_by_site};
use super::graph::PlanarGraph;
use crate::bounds::{BoundKind, Bounds};
use crate::error::{Result, VoronoiError};
use crate::primitives::{LineEquation2, Point2, Point3, Segment2};
use crate::tolerance::{cast, BOUNDARY_EPSILON};
use crate::triangulation::{compute_voronoi_diagram, open_end_direction, Diagram, Side};
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Options controlling what the clipping stage draws.
///
/// # Example
///
/// ```
/// use voronum::ClipOptions;
///
/// let options = ClipOptions::default().with_faces(true).with_max_face_sides(16);
/// assert!(options.draw_bounds);
/// assert!(options.make_faces);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipOptions {
    /// Stitch the bound contour into the mesh.
    pub draw_bounds: bool,
    /// Keep edges that run from the interior to the bound.
    pub draw_hanging_edges: bool,
    /// Extract bounded faces.
    pub make_faces: bool,
    /// Reorder faces so that face `i` belongs to site `i`.
    pub order_faces_by_site: bool,
    /// Faces with more sides than this are dropped.
    pub max_face_sides: usize,
}

impl Default for ClipOptions {
    fn default() -> Self {
        Self {
            draw_bounds: true,
            draw_hanging_edges: false,
            make_faces: false,
            order_faces_by_site: false,
            max_face_sides: 10,
        }
    }
}

impl ClipOptions {
    pub fn with_bounds(mut self, draw: bool) -> Self {
        self.draw_bounds = draw;
        self
    }

    pub fn with_hanging_edges(mut self, draw: bool) -> Self {
        self.draw_hanging_edges = draw;
        self
    }

    pub fn with_faces(mut self, make: bool) -> Self {
        self.make_faces = make;
        self
    }

    pub fn with_faces_by_site(mut self, ordered: bool) -> Self {
        self.order_faces_by_site = ordered;
        self
    }

    pub fn with_max_face_sides(mut self, sides: usize) -> Self {
        self.max_face_sides = sides;
        self
    }

    #[inline]
    fn draws_hangs(&self) -> bool {
        self.draw_hanging_edges || self.draw_bounds
    }
}

/// A Voronoi diagram cut down to a bound region.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedDiagram<F> {
    /// Mesh vertices, all with `z = 0`.
    pub vertices: Vec<Point3<F>>,
    pub edges: Vec<(usize, usize)>,
    /// CCW vertex cycles; one per site when ordered by site.
    pub faces: Vec<Vec<usize>>,
    /// Non-fatal problems met while clipping.
    pub diagnostics: Vec<VoronoiError>,
}

impl<F> Default for BoundedDiagram<F> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

/// Computes the Voronoi diagram of `points` and clips it to a region.
///
/// The region is derived from the sites and widened by `clip_margin`.
/// Degenerate input is an error.
///
/// # Example
///
/// ```
/// use voronum::{voronoi_bounded, BoundKind, ClipOptions, Point2};
///
/// let sites = [
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(0.0, 10.0),
///     Point2::new(10.0, 10.0),
/// ];
/// let options = ClipOptions::default().with_faces(true);
/// let mesh = voronoi_bounded(&sites, BoundKind::Box, 0.0, &options).unwrap();
/// assert_eq!(mesh.faces.len(), 4);
/// ```
pub fn voronoi_bounded<F: Float>(
    points: &[Point2<F>],
    kind: BoundKind,
    clip_margin: F,
    options: &ClipOptions,
) -> Result<BoundedDiagram<F>> {
    let diagram = compute_voronoi_diagram(points, true)?;
    let bounds = Bounds::from_sites(kind, points, clip_margin).ok_or(VoronoiError::TooFewSites {
        count: points.len(),
    })?;
    Ok(clip_diagram(&diagram, points, &bounds, options))
}

/// Clips a computed diagram of `sites` to `bounds`.
pub fn clip_diagram<F: Float>(
    diagram: &Diagram<F>,
    sites: &[Point2<F>],
    bounds: &Bounds<F>,
    options: &ClipOptions,
) -> BoundedDiagram<F> {
    let finite = diagram
        .edges
        .iter()
        .filter_map(|e| Some((e.left?, e.right?)));
    let mut clipper = Clipper::new(bounds, options, PlanarGraph::from_parts(&diagram.vertices, finite));
    clipper.clip_vertices();
    if options.draws_hangs() {
        clipper.clip_unbounded(diagram, sites);
    }
    clipper.finish(sites)
}

/// Clips an already finite mesh to `bounds`.
///
/// Clipping the output of [`clip_diagram`] again leaves it unchanged.
pub fn clip_mesh<F: Float>(
    vertices: &[Point2<F>],
    edges: &[(usize, usize)],
    sites: &[Point2<F>],
    bounds: &Bounds<F>,
    options: &ClipOptions,
) -> BoundedDiagram<F> {
    let graph = PlanarGraph::from_parts(vertices, edges.iter().copied());
    let mut clipper = Clipper::new(bounds, options, graph);
    clipper.clip_vertices();
    clipper.finish(sites)
}

struct Clipper<'a, F> {
    bounds: &'a Bounds<F>,
    options: &'a ClipOptions,
    graph: PlanarGraph<F>,
    /// Welded vertex ids, indexed by input vertex id.
    survivor: Vec<usize>,
    /// Vertices lying on the bound contour.
    boundary: Vec<usize>,
    doomed: BTreeSet<usize>,
    diagnostics: Vec<VoronoiError>,
}

impl<'a, F: Float> Clipper<'a, F> {
    fn new(bounds: &'a Bounds<F>, options: &'a ClipOptions, mut graph: PlanarGraph<F>) -> Self {
        let survivor = graph.weld(bounds.tolerance());
        Self {
            bounds,
            options,
            graph,
            survivor,
            boundary: Vec::new(),
            doomed: BTreeSet::new(),
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    fn tolerance(&self) -> F {
        self.bounds.tolerance()
    }

    fn is_kept(&self, p: Point2<F>) -> bool {
        self.bounds.contains(p, true) || self.bounds.boundary_distance(p) <= self.tolerance()
    }

    fn point(&self, v: usize) -> Point2<F> {
        self.graph.point(v).unwrap_or_else(|| Point2::new(F::nan(), F::nan()))
    }

    /// Boundary vertex at `p`, reusing one already within tolerance.
    fn boundary_vertex(&mut self, p: Point2<F>) -> usize {
        let tol = self.tolerance();
        if let Some(&v) = self
            .boundary
            .iter()
            .find(|&&v| self.graph.point(v).is_some_and(|q| q.distance(p) <= tol))
        {
            return v;
        }
        let v = self.graph.add_vertex(p);
        self.boundary.push(v);
        v
    }

    fn register_boundary(&mut self, v: usize) {
        if !self.boundary.contains(&v) {
            self.boundary.push(v);
        }
    }

    /// Cuts every edge leaving the region at the contour.
    fn clip_vertices(&mut self) {
        let tol = self.tolerance();
        for v in 0..self.graph.vertex_count() {
            let Some(p) = self.graph.point(v) else {
                continue;
            };
            if self.is_kept(p) {
                if self.bounds.boundary_distance(p) <= tol {
                    self.register_boundary(v);
                }
                continue;
            }
            self.doomed.insert(v);
            if !self.options.draws_hangs() {
                continue;
            }
            for u in self.graph.neighbors(v) {
                let q = self.point(u);
                if self.is_kept(q) {
                    self.cut_leaving_edge(u, q, p);
                } else if v < u {
                    self.cut_passing_edge(p, q);
                }
            }
        }
    }

    /// Edge from the kept vertex `u` at `inner` to `outer` outside the region.
    fn cut_leaving_edge(&mut self, u: usize, inner: Point2<F>, outer: Point2<F>) {
        let hits = self.bounds.intersect_segment(&Segment2::new(inner, outer));
        let tol = self.tolerance();
        match hits.iter().rev().find(|h| h.distance(inner) > tol) {
            Some(&hit) => {
                let b = self.boundary_vertex(hit);
                self.graph.add_edge(u, b);
            }
            None if !hits.is_empty() || self.bounds.boundary_distance(inner) <= tol => {
                self.register_boundary(u);
            }
            None => log::warn!("edge from vertex {} leaves the bound without crossing it", u),
        }
    }

    /// Edge with both endpoints outside; keeps the chord inside the region.
    fn cut_passing_edge(&mut self, p: Point2<F>, q: Point2<F>) {
        let hits = self.bounds.intersect_segment(&Segment2::new(p, q));
        if let (Some(&first), Some(&last)) = (hits.first(), hits.last()) {
            if hits.len() >= 2 {
                self.add_chord(first, last);
            }
        }
    }

    fn add_chord(&mut self, first: Point2<F>, last: Point2<F>) {
        let b1 = self.boundary_vertex(first);
        let b2 = self.boundary_vertex(last);
        self.graph.add_edge(b1, b2);
    }

    /// Closes rays and full lines of `diagram` against the contour.
    fn clip_unbounded(&mut self, diagram: &Diagram<F>, sites: &[Point2<F>]) {
        let separated = diagram.edge_sites();
        for edge in &diagram.edges {
            let Some(&line) = diagram.lines.get(edge.id) else {
                continue;
            };
            match (edge.left, edge.right) {
                (Some(_), Some(_)) => {}
                (None, None) => self.clip_line(edge.id, &line),
                (Some(v), None) | (None, Some(v)) => {
                    let v = self.survivor.get(v).copied().unwrap_or(v);
                    let open = if edge.left.is_none() {
                        Side::Left
                    } else {
                        Side::Right
                    };
                    let pair = separated
                        .get(&edge.id)
                        .and_then(|&(s, t)| Some((*sites.get(s)?, *sites.get(t)?)));
                    self.clip_ray(edge.id, &line, v, open, pair);
                }
            }
        }
    }

    fn clip_ray(
        &mut self,
        id: usize,
        line: &LineEquation2<F>,
        v: usize,
        open: Side,
        sites: Option<(Point2<F>, Point2<F>)>,
    ) {
        let origin = self.point(v);
        let crossings = self.bounds.ray_crossings(origin, open_end_direction(line, open));

        if !self.is_kept(origin) {
            if let (Some(&first), Some(&last)) = (crossings.first(), crossings.last()) {
                if crossings.len() >= 2 {
                    self.add_chord(first, last);
                }
            }
            return;
        }
        if let Some(&hit) = crossings.first() {
            let b = self.boundary_vertex(hit);
            self.graph.add_edge(v, b);
            return;
        }
        if self.bounds.boundary_distance(origin) <= self.tolerance() {
            self.register_boundary(v);
            return;
        }

        let Some((s, t)) = sites else {
            self.report(VoronoiError::IntersectionAmbiguity {
                line: id,
                reason: "ray has no forward crossing and its sites are unknown".to_string(),
            });
            return;
        };
        let middle = s.midpoint(t);
        let nearest = self
            .bounds
            .intersect_line(line)
            .into_iter()
            .min_by(|a, b| {
                a.distance_squared(middle)
                    .partial_cmp(&b.distance_squared(middle))
                    .unwrap_or(Ordering::Equal)
            });
        match nearest {
            Some(hit) => {
                let b = self.boundary_vertex(hit);
                self.graph.add_edge(v, b);
            }
            None => self.report_missing_line(id, line),
        }
    }

    fn clip_line(&mut self, id: usize, line: &LineEquation2<F>) {
        match self.bounds.intersect_line(line).as_slice() {
            [] => self.report_missing_line(id, line),
            [single] => {
                self.boundary_vertex(*single);
            }
            [first, .., last] => self.add_chord(*first, *last),
        }
    }

    fn report_missing_line(&mut self, id: usize, line: &LineEquation2<F>) {
        let v = |x: F| x.to_f64().unwrap_or(f64::NAN);
        self.report(VoronoiError::UnexpectedTopology {
            line: id,
            a: v(line.a),
            b: v(line.b),
            c: v(line.c),
            bounds: self.bounds.to_string(),
        });
    }

    fn report(&mut self, error: VoronoiError) {
        log::error!("{}", error);
        self.diagnostics.push(error);
    }

    /// Joins the boundary vertices into a closed contour.
    fn stitch_contour(&mut self) {
        for corner in self.bounds.corners() {
            self.boundary_vertex(corner);
        }
        let center = self.bounds.center();
        let mut ring: Vec<(F, usize)> = self
            .boundary
            .iter()
            .filter_map(|&v| Some(((self.graph.point(v)? - center).angle(), v)))
            .collect();
        ring.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        if ring.len() < 2 {
            return;
        }
        for k in 0..ring.len() {
            let (_, i) = ring[k];
            let (_, j) = ring[(k + 1) % ring.len()];
            self.graph.add_edge(i, j);
        }
    }

    fn finish(mut self, sites: &[Point2<F>]) -> BoundedDiagram<F> {
        if self.options.draw_bounds && !self.boundary.is_empty() {
            self.stitch_contour();
        }
        for &v in &self.doomed {
            self.graph.remove_vertex(v);
        }
        let (points, edges) = self.graph.compact();

        let mut faces = Vec::new();
        if self.options.make_faces {
            let min_area = self.bounds.area() * cast(BOUNDARY_EPSILON);
            faces = extract_faces(&points, &edges, min_area, self.options.max_face_sides);
            if self.options.order_faces_by_site {
                let ordered = faces_by_site(&points, &faces, sites, self.tolerance());
                for site in ordered.unmatched {
                    if sites.get(site).is_some_and(|&p| self.bounds.contains(p, false)) {
                        self.report(VoronoiError::UnassignedSite { site });
                    }
                }
                faces = ordered.faces;
            }
        }
        log::debug!(
            "clipped diagram: {} vertices, {} edges, {} faces",
            points.len(),
            edges.len(),
            faces.len()
        );

        BoundedDiagram {
            vertices: points.into_iter().map(Point3::from).collect(),
            edges,
            faces,
            diagnostics: self.diagnostics,
        }
    }
}
