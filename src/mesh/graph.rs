//! Scratch planar graph used while clipping.

use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Undirected graph over an arena of points.
///
/// Removed vertices leave a tombstone so indices stay stable until
/// [`compact`](Self::compact).
#[derive(Debug, Clone, Default)]
pub(crate) struct PlanarGraph<F> {
    vertices: Vec<Option<Point2<F>>>,
    adjacency: Vec<BTreeSet<usize>>,
    edges: BTreeSet<(usize, usize)>,
}

#[inline]
fn key(i: usize, j: usize) -> (usize, usize) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}

impl<F: Float> PlanarGraph<F> {
    /// Builds a graph from points and index pairs; invalid pairs are ignored.
    pub fn from_parts<I>(vertices: &[Point2<F>], edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self {
            vertices: vertices.iter().copied().map(Some).collect(),
            adjacency: vec![BTreeSet::new(); vertices.len()],
            edges: BTreeSet::new(),
        };
        for (i, j) in edges {
            graph.add_edge(i, j);
        }
        graph
    }

    pub fn add_vertex(&mut self, p: Point2<F>) -> usize {
        self.vertices.push(Some(p));
        self.adjacency.push(BTreeSet::new());
        self.vertices.len() - 1
    }

    /// Adds the edge `i`–`j`. Loops and edges to missing vertices are rejected.
    pub fn add_edge(&mut self, i: usize, j: usize) -> bool {
        if i == j || self.point(i).is_none() || self.point(j).is_none() {
            return false;
        }
        if !self.edges.insert(key(i, j)) {
            return false;
        }
        self.adjacency[i].insert(j);
        self.adjacency[j].insert(i);
        true
    }

    pub fn remove_edge(&mut self, i: usize, j: usize) {
        if self.edges.remove(&key(i, j)) {
            self.adjacency[i].remove(&j);
            self.adjacency[j].remove(&i);
        }
    }

    /// Tombstones `v` and drops its incident edges.
    pub fn remove_vertex(&mut self, v: usize) {
        let Some(slot) = self.vertices.get_mut(v) else {
            return;
        };
        *slot = None;
        let neighbors: Vec<usize> = self.adjacency[v].iter().copied().collect();
        for u in neighbors {
            self.remove_edge(v, u);
        }
    }

    #[inline]
    pub fn point(&self, v: usize) -> Option<Point2<F>> {
        self.vertices.get(v).copied().flatten()
    }

    pub fn neighbors(&self, v: usize) -> Vec<usize> {
        self.adjacency
            .get(v)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Size of the vertex arena, tombstones included.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Merges vertices closer than `tol` on both axes.
    ///
    /// The survivor of a cluster is its leftmost vertex. Edges of merged
    /// vertices move to the survivor and loops are dropped. Returns the
    /// survivor of every vertex index.
    pub fn weld(&mut self, tol: F) -> Vec<usize> {
        let mut survivor: Vec<usize> = (0..self.vertices.len()).collect();
        let mut order: Vec<(usize, Point2<F>)> = self
            .vertices
            .iter()
            .enumerate()
            .filter_map(|(i, p)| Some((i, (*p)?)))
            .collect();
        order.sort_by(|a, b| a.1.x.partial_cmp(&b.1.x).unwrap_or(Ordering::Equal));

        let mut merged = 0;
        for (k, &(i, p)) in order.iter().enumerate() {
            if self.point(i).is_none() {
                continue;
            }
            for &(j, q) in &order[k + 1..] {
                if q.x - p.x > tol {
                    break;
                }
                if (q.y - p.y).abs() > tol || self.point(j).is_none() {
                    continue;
                }
                let moved = self.neighbors(j);
                self.remove_vertex(j);
                for u in moved {
                    self.add_edge(i, u);
                }
                survivor[j] = i;
                merged += 1;
            }
        }
        if merged > 0 {
            log::debug!("welded {} coincident vertices", merged);
        }
        survivor
    }

    /// Drops tombstones and returns points with edges renumbered to match.
    pub fn compact(&self) -> (Vec<Point2<F>>, Vec<(usize, usize)>) {
        let mut remap = vec![usize::MAX; self.vertices.len()];
        let mut points = Vec::with_capacity(self.vertices.len());
        for (old, p) in self.vertices.iter().enumerate() {
            if let Some(p) = p {
                remap[old] = points.len();
                points.push(*p);
            }
        }
        let edges = self
            .edges
            .iter()
            .map(|&(i, j)| (remap[i], remap[j]))
            .collect();
        (points, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> PlanarGraph<f64> {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        PlanarGraph::from_parts(&points, [(0, 1), (1, 2), (2, 0)])
    }

    #[test]
    fn test_rejects_loops_and_duplicates() {
        let mut g = triangle();
        assert!(!g.add_edge(1, 1));
        assert!(!g.add_edge(1, 0));
        assert!(!g.add_edge(0, 9));
        assert_eq!(g.compact().1.len(), 3);
    }

    #[test]
    fn test_remove_vertex_drops_incident_edges() {
        let mut g = triangle();
        g.remove_vertex(0);
        assert!(g.point(0).is_none());
        assert_eq!(g.compact().1.len(), 1);
        assert_eq!(g.neighbors(1), vec![2]);
        assert!(!g.add_edge(0, 1));
    }

    #[test]
    fn test_weld_merges_coincident_vertices() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0 + 1e-12, 1e-12),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 1.0),
        ];
        // 1 and 2 coincide and are joined by a zero-length edge.
        let mut g = PlanarGraph::from_parts(&points, [(0, 1), (1, 2), (2, 3), (2, 4)]);
        assert_eq!(g.weld(1e-9), vec![0, 1, 1, 3, 4]);
        assert!(g.point(2).is_none());
        assert_eq!(g.neighbors(1), vec![0, 3, 4]);
        let (points, edges) = g.compact();
        assert_eq!(points.len(), 4);
        assert_eq!(edges.len(), 3);
        assert_eq!(g.weld(1e-9), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_compact_renumbers() {
        let mut g = triangle();
        let extra = g.add_vertex(Point2::new(5.0, 5.0));
        g.add_edge(2, extra);
        g.remove_vertex(1);
        let (points, edges) = g.compact();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], Point2::new(5.0, 5.0));
        assert_eq!(edges, vec![(0, 1), (1, 2)]);
        assert_eq!(g.vertex_count(), 4);
    }
}
