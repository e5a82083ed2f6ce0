//! Result of a Voronoi sweep.

use super::delaunay::Triangle;
use crate::primitives::{LineEquation2, Point2};
use num_traits::Float;
use std::collections::BTreeMap;

/// A Voronoi edge: a piece of line `lines[id]` between two optional vertices.
///
/// A missing vertex means the edge runs to infinity on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagramEdge {
    /// Edge id; also the index of the edge's line in [`Diagram::lines`].
    pub id: usize,
    /// Vertex id in the left endpoint slot.
    pub left: Option<usize>,
    /// Vertex id in the right endpoint slot.
    pub right: Option<usize>,
}

impl DiagramEdge {
    /// Both endpoints are known.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Exactly one endpoint is known.
    #[inline]
    pub fn is_ray(&self) -> bool {
        self.left.is_some() != self.right.is_some()
    }

    /// Neither endpoint is known; the edge is a full line.
    #[inline]
    pub fn is_line(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Voronoi diagram and its Delaunay dual, as produced by the sweep.
///
/// Vertex ids index `vertices` in discovery order. Site ids are indices into
/// the input slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram<F> {
    pub vertices: Vec<Point2<F>>,
    /// Every bisector the sweep created, indexed by edge id.
    pub lines: Vec<LineEquation2<F>>,
    /// Emitted edges, in emission order.
    pub edges: Vec<DiagramEdge>,
    /// Delaunay triangles as triples of site ids.
    pub triangles: Vec<Triangle>,
    /// Edge ids bounding each site's cell.
    pub polygons: BTreeMap<usize, Vec<usize>>,
}

impl<F> Default for Diagram<F> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            lines: Vec::new(),
            edges: Vec::new(),
            triangles: Vec::new(),
            polygons: BTreeMap::new(),
        }
    }
}

impl<F: Float> Diagram<F> {
    /// True when the sweep produced nothing at all.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.lines.is_empty() && self.edges.is_empty()
    }

    /// Maps each emitted edge id to the two sites it separates.
    ///
    /// Recovered from the per-site edge lists in `polygons`.
    pub fn edge_sites(&self) -> BTreeMap<usize, (usize, usize)> {
        let mut partial: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (&site, edges) in &self.polygons {
            for &edge in edges {
                partial.entry(edge).or_default().push(site);
            }
        }
        partial
            .into_iter()
            .filter_map(|(edge, sites)| match sites.as_slice() {
                [a, b, ..] => Some((edge, (*a, *b))),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn add_line(&mut self, line: LineEquation2<F>) {
        self.lines.push(line);
    }

    pub(crate) fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub(crate) fn add_vertex(&mut self, p: Point2<F>) -> usize {
        self.vertices.push(p);
        self.vertices.len() - 1
    }

    /// Records an edge between the sites `sites`; zero-length edges are dropped.
    pub(crate) fn add_edge(&mut self, edge: DiagramEdge, sites: (usize, usize)) {
        if let (Some(l), Some(r)) = (edge.left, edge.right) {
            if l == r {
                log::trace!("dropping collapsed edge {} at vertex {}", edge.id, l);
                return;
            }
        }
        self.polygons.entry(sites.0).or_default().push(edge.id);
        self.polygons.entry(sites.1).or_default().push(edge.id);
        self.edges.push(edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_kinds() {
        let finite = DiagramEdge { id: 0, left: Some(0), right: Some(1) };
        let ray = DiagramEdge { id: 1, left: None, right: Some(1) };
        let line = DiagramEdge { id: 2, left: None, right: None };
        assert!(finite.is_finite() && !finite.is_ray() && !finite.is_line());
        assert!(ray.is_ray() && !ray.is_finite());
        assert!(line.is_line() && !line.is_ray());
    }

    #[test]
    fn test_collapsed_edge_is_dropped() {
        let mut d: Diagram<f64> = Diagram::default();
        d.add_edge(DiagramEdge { id: 0, left: Some(3), right: Some(3) }, (0, 1));
        assert!(d.edges.is_empty());
        assert!(d.polygons.is_empty());
    }

    #[test]
    fn test_edge_sites_from_polygons() {
        let mut d: Diagram<f64> = Diagram::default();
        d.add_edge(DiagramEdge { id: 0, left: None, right: None }, (2, 5));
        d.add_edge(DiagramEdge { id: 1, left: Some(0), right: None }, (5, 7));
        let sites = d.edge_sites();
        assert_eq!(sites.get(&0), Some(&(2, 5)));
        assert_eq!(sites.get(&1), Some(&(5, 7)));
    }
}
