//! Face extraction from a clipped planar edge graph.

use crate::primitives::{Point2, Segment2};
use crate::tolerance::cast;
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Signed area of a closed polygon (shoelace formula); positive when CCW.
pub fn polygon_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    if vertices.len() < 3 {
        return F::zero();
    }
    let n = vertices.len();
    let mut area = F::zero();
    for i in 0..n {
        let j = (i + 1) % n;
        area = area + vertices[i].x * vertices[j].y - vertices[j].x * vertices[i].y;
    }
    area * cast(0.5)
}

/// Ray-casting point-in-polygon test. Boundary points may go either way.
pub fn polygon_contains<F: Float>(vertices: &[Point2<F>], point: Point2<F>) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Distance from `point` to the nearest edge of a closed polygon.
pub fn polygon_boundary_distance<F: Float>(vertices: &[Point2<F>], point: Point2<F>) -> F {
    let n = vertices.len();
    (0..n)
        .map(|i| Segment2::new(vertices[i], vertices[(i + 1) % n]).distance_to_point(point))
        .fold(F::infinity(), F::min)
}

/// Bounded faces of the planar graph `(points, edges)`.
///
/// Hanging chains are ignored. Each face is a CCW cycle of vertex indices;
/// faces with area at most `min_area` or more than `max_sides` sides are dropped.
pub(crate) fn extract_faces<F: Float>(
    points: &[Point2<F>],
    edges: &[(usize, usize)],
    min_area: F,
    max_sides: usize,
) -> Vec<Vec<usize>> {
    let mut adjacency: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for &(i, j) in edges {
        if i == j || i >= points.len() || j >= points.len() {
            continue;
        }
        adjacency.entry(i).or_default().insert(j);
        adjacency.entry(j).or_default().insert(i);
    }
    prune_dangling(&mut adjacency);

    let rotation: BTreeMap<usize, Vec<usize>> = adjacency
        .iter()
        .map(|(&v, neighbors)| {
            let origin = points[v];
            let mut ring: Vec<usize> = neighbors.iter().copied().collect();
            ring.sort_by(|&a, &b| {
                let ta = (points[a] - origin).angle();
                let tb = (points[b] - origin).angle();
                ta.partial_cmp(&tb).unwrap_or(Ordering::Equal)
            });
            (v, ring)
        })
        .collect();

    let next = |u: usize, v: usize| -> Option<usize> {
        let ring = rotation.get(&v)?;
        let k = ring.iter().position(|&w| w == u)?;
        Some(ring[(k + ring.len() - 1) % ring.len()])
    };

    let mut visited: BTreeSet<(usize, usize)> = BTreeSet::new();
    let mut faces = Vec::new();
    for (&u0, ring) in &rotation {
        for &v0 in ring {
            if visited.contains(&(u0, v0)) {
                continue;
            }
            let mut cycle = Vec::new();
            let (mut u, mut v) = (u0, v0);
            let closed = loop {
                if !visited.insert((u, v)) {
                    break (u, v) == (u0, v0);
                }
                cycle.push(u);
                match next(u, v) {
                    Some(w) => (u, v) = (v, w),
                    None => break false,
                }
            };
            if !closed || cycle.len() < 3 || cycle.len() > max_sides {
                continue;
            }
            let polygon: Vec<Point2<F>> = cycle.iter().map(|&i| points[i]).collect();
            if polygon_signed_area(&polygon) > min_area {
                faces.push(cycle);
            }
        }
    }
    faces
}

/// Repeatedly strips vertices of degree one.
fn prune_dangling(adjacency: &mut BTreeMap<usize, BTreeSet<usize>>) {
    let mut stack: Vec<usize> = adjacency
        .iter()
        .filter(|(_, n)| n.len() < 2)
        .map(|(&v, _)| v)
        .collect();
    while let Some(v) = stack.pop() {
        let Some(neighbors) = adjacency.remove(&v) else {
            continue;
        };
        for u in neighbors {
            if let Some(set) = adjacency.get_mut(&u) {
                set.remove(&v);
                if set.len() < 2 {
                    stack.push(u);
                }
            }
        }
    }
}

/// Faces reordered so that entry `i` belongs to `sites[i]`.
///
/// A site takes the face containing it or else the nearest face. Sites
/// farther than `tol` from every face are listed in `unmatched`.
pub(crate) struct SiteFaces {
    pub faces: Vec<Vec<usize>>,
    pub unmatched: Vec<usize>,
}

/// Picks, for every site, the face containing it or else the nearest face.
///
/// With no faces at all, `faces` is empty and every site is unmatched.
pub(crate) fn faces_by_site<F: Float>(
    points: &[Point2<F>],
    faces: &[Vec<usize>],
    sites: &[Point2<F>],
    tol: F,
) -> SiteFaces {
    if faces.is_empty() {
        return SiteFaces {
            faces: Vec::new(),
            unmatched: (0..sites.len()).collect(),
        };
    }
    let polygons: Vec<Vec<Point2<F>>> = faces
        .iter()
        .map(|face| face.iter().map(|&i| points[i]).collect())
        .collect();

    let mut unmatched = Vec::new();
    let ordered = sites
        .iter()
        .enumerate()
        .map(|(s, &site)| {
            if let Some(index) = polygons.iter().position(|polygon| polygon_contains(polygon, site)) {
                return faces[index].clone();
            }
            let mut best = (0, F::infinity());
            for (i, polygon) in polygons.iter().enumerate() {
                let d = polygon_boundary_distance(polygon, site);
                if d < best.1 {
                    best = (i, d);
                }
            }
            if best.1 > tol {
                unmatched.push(s);
            }
            faces[best.0].clone()
        })
        .collect();
    SiteFaces {
        faces: ordered,
        unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 2x1 rectangle split into two unit squares, plus a dangling spur.
    fn two_squares() -> (Vec<Point2<f64>>, Vec<(usize, usize)>) {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.5, 0.5),
        ];
        let edges = vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (1, 4), (3, 6)];
        (points, edges)
    }

    #[test]
    fn test_signed_area() {
        let ccw = [
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_relative_eq!(polygon_signed_area(&ccw), 4.0);
        let mut cw = ccw;
        cw.reverse();
        assert_relative_eq!(polygon_signed_area(&cw), -4.0);
    }

    #[test]
    fn test_extract_faces_skips_outer_and_spur() {
        let (points, edges) = two_squares();
        let faces = extract_faces(&points, &edges, 1e-9, 10);
        assert_eq!(faces.len(), 2);
        for face in &faces {
            assert_eq!(face.len(), 4);
            assert!(!face.contains(&6));
            let polygon: Vec<_> = face.iter().map(|&i| points[i]).collect();
            assert_relative_eq!(polygon_signed_area(&polygon), 1.0);
        }
    }

    #[test]
    fn test_max_sides() {
        let (points, edges) = two_squares();
        assert!(extract_faces(&points, &edges, 1e-9, 3).is_empty());
    }

    #[test]
    fn test_open_chain_has_no_faces() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ];
        assert!(extract_faces(&points, &[(0, 1), (1, 2)], 1e-9, 10).is_empty());
    }

    #[test]
    fn test_faces_by_site() {
        let (points, edges) = two_squares();
        let faces = extract_faces(&points, &edges, 1e-9, 10);
        let sites = [
            Point2::new(1.5, 0.25),
            Point2::new(0.5, 0.5),
            Point2::new(-3.0, 0.5),
        ];
        let ordered = faces_by_site(&points, &faces, &sites, 1e-9);
        assert_eq!(ordered.faces.len(), 3);
        assert!(ordered.faces[0].contains(&2));
        assert!(ordered.faces[1].contains(&0));
        assert!(ordered.faces[2].contains(&0));
        assert_eq!(ordered.unmatched, vec![2]);

        // On the outline counts as matched within tolerance.
        let edge = faces_by_site(&points, &faces, &[Point2::new(-1e-12, 0.5)], 1e-9);
        assert!(edge.unmatched.is_empty());

        let none = faces_by_site(&points, &[], &sites, 1e-9);
        assert!(none.faces.is_empty());
        assert_eq!(none.unmatched, vec![0, 1, 2]);
    }
}
