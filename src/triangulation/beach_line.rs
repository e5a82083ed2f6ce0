//! Beach line of the sweep: an ordered list of bisector halves.
//!
//! Half-edges live in an arena and are linked by index. Two sentinels that
//! carry no edge bracket the list, and a coarse hash over x gives `locate`
//! a starting point close to the answer.

use super::edge::{EdgeArena, Side};
use super::site::Site;
use crate::primitives::Point2;
use crate::tolerance::{cast, is_nearly_equal, RELATIVE_EPSILON};
use num_traits::Float;
use std::cmp::Ordering;

/// Index of a half-edge in the beach line arena.
pub(crate) type ArcId = usize;

#[derive(Debug, Clone)]
struct HalfEdge {
    edge: Option<usize>,
    side: Side,
    left: ArcId,
    right: ArcId,
    deleted: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct BeachLine<F> {
    arcs: Vec<HalfEdge>,
    hash: Vec<Option<ArcId>>,
    xmin: F,
    deltax: F,
}

impl<F: Float> BeachLine<F> {
    pub const LEFT_END: ArcId = 0;
    pub const RIGHT_END: ArcId = 1;

    /// Creates an empty beach line hashed over `[xmin, xmax]` for `site_count` sites.
    pub fn new(xmin: F, xmax: F, site_count: usize) -> Self {
        let (xmin, xmax) = if xmin > xmax { (xmax, xmin) } else { (xmin, xmax) };
        let size = ((2.0 * ((site_count + 4) as f64).sqrt()) as usize).max(2);

        let sentinel = |left, right| HalfEdge {
            edge: None,
            side: Side::Left,
            left,
            right,
            deleted: false,
        };
        let arcs = vec![
            sentinel(Self::LEFT_END, Self::RIGHT_END),
            sentinel(Self::LEFT_END, Self::RIGHT_END),
        ];

        let mut hash = vec![None; size];
        hash[0] = Some(Self::LEFT_END);
        hash[size - 1] = Some(Self::RIGHT_END);

        Self {
            arcs,
            hash,
            xmin,
            deltax: xmax - xmin,
        }
    }

    /// Allocates an unlinked half-edge of `edge`.
    pub fn create(&mut self, edge: usize, side: Side) -> ArcId {
        self.arcs.push(HalfEdge {
            edge: Some(edge),
            side,
            left: Self::LEFT_END,
            right: Self::RIGHT_END,
            deleted: false,
        });
        self.arcs.len() - 1
    }

    /// Links `arc` immediately to the right of `anchor`.
    pub fn insert_after(&mut self, anchor: ArcId, arc: ArcId) {
        let next = self.arcs[anchor].right;
        self.arcs[arc].left = anchor;
        self.arcs[arc].right = next;
        self.arcs[next].left = arc;
        self.arcs[anchor].right = arc;
    }

    /// Unlinks `arc` and marks it deleted so stale hash entries can be pruned.
    pub fn delete(&mut self, arc: ArcId) {
        let HalfEdge { left, right, .. } = self.arcs[arc];
        self.arcs[left].right = right;
        self.arcs[right].left = left;
        self.arcs[arc].deleted = true;
    }

    #[inline]
    pub fn left(&self, arc: ArcId) -> ArcId {
        self.arcs[arc].left
    }

    #[inline]
    pub fn right(&self, arc: ArcId) -> ArcId {
        self.arcs[arc].right
    }

    #[inline]
    pub fn edge(&self, arc: ArcId) -> Option<usize> {
        self.arcs[arc].edge
    }

    #[inline]
    pub fn side(&self, arc: ArcId) -> Side {
        self.arcs[arc].side
    }

    /// Site on the left of the boundary `arc`; sentinels report `bottom`.
    pub fn left_site(&self, arc: ArcId, edges: &EdgeArena<F>, bottom: Site<F>) -> Site<F> {
        match self.arcs[arc].edge {
            None => bottom,
            Some(e) => edges.get(e).site(self.arcs[arc].side),
        }
    }

    /// Site on the right of the boundary `arc`; sentinels report `bottom`.
    pub fn right_site(&self, arc: ArcId, edges: &EdgeArena<F>, bottom: Site<F>) -> Site<F> {
        match self.arcs[arc].edge {
            None => bottom,
            Some(e) => edges.get(e).site(self.arcs[arc].side.opposite()),
        }
    }

    /// Finds the half-edge immediately to the left of `p` on the beach line.
    pub fn locate(&mut self, p: Point2<F>, edges: &EdgeArena<F>) -> ArcId {
        let size = self.hash.len();
        let bucket = self.bucket_of(p.x);

        let mut arc = self.get_hash(bucket as isize);
        let mut i: isize = 1;
        while arc.is_none() {
            arc = self
                .get_hash(bucket as isize - i)
                .or_else(|| self.get_hash(bucket as isize + i));
            i += 1;
        }
        let mut he = arc.unwrap_or(Self::LEFT_END);

        if he == Self::LEFT_END || (he != Self::RIGHT_END && self.is_point_right_of(he, p, edges)) {
            he = self.right(he);
            while he != Self::RIGHT_END && self.is_point_right_of(he, p, edges) {
                he = self.right(he);
            }
            he = self.left(he);
        } else {
            he = self.left(he);
            while he != Self::LEFT_END && !self.is_point_right_of(he, p, edges) {
                he = self.left(he);
            }
        }

        if bucket > 0 && bucket < size - 1 {
            self.hash[bucket] = Some(he);
        }
        he
    }

    /// Tests whether `p` lies to the right of the boundary `arc`.
    ///
    /// `arc` must carry an edge.
    pub fn is_point_right_of(&self, arc: ArcId, p: Point2<F>, edges: &EdgeArena<F>) -> bool {
        let HalfEdge { edge, side, .. } = self.arcs[arc];
        let Some(e) = edge.map(|id| edges.get(id)) else {
            return false;
        };
        let top = e.sites[1].point;
        let (a, b, c) = (e.line.a, e.line.b, e.line.c);
        let zero = F::zero();
        let one = F::one();

        let right_of_site = p.x > top.x;
        if right_of_site && side == Side::Left {
            return true;
        }
        if !right_of_site && side == Side::Right {
            return false;
        }

        let above = if e.is_x_unit() {
            let dyp = p.y - top.y;
            let dxp = p.x - top.x;
            let mut fast = false;
            let mut above;
            if (!right_of_site && b < zero) || (right_of_site && b >= zero) {
                above = dyp >= b * dxp;
                fast = above;
            } else {
                above = p.x + p.y * b > c;
                if b < zero {
                    above = !above;
                }
                if !above {
                    fast = true;
                }
            }
            if !fast {
                let two = one + one;
                let dxs = top.x - e.sites[0].x();
                above = b * (dxp * dxp - dyp * dyp) < dxs * dyp * (one + two * dxp / dxs + b * b);
                if b < zero {
                    above = !above;
                }
            }
            above
        } else {
            let yl = c - a * p.x;
            let t1 = p.y - yl;
            let t2 = p.x - top.x;
            let t3 = yl - top.y;
            t1 * t1 > t2 * t2 + t3 * t3
        };

        match side {
            Side::Left => above,
            Side::Right => !above,
        }
    }

    /// Point where the bisectors of two neighbouring half-edges meet, if they
    /// meet on the side both half-edges face.
    pub fn intersect(&self, first: ArcId, second: ArcId, edges: &EdgeArena<F>) -> Option<Point2<F>> {
        let (id1, id2) = (self.arcs[first].edge?, self.arcs[second].edge?);
        let (e1, e2) = (edges.get(id1), edges.get(id2));
        if e1.sites[1].id == e2.sites[1].id {
            return None;
        }

        let d = e1.line.a * e2.line.b - e1.line.b * e2.line.a;
        if is_nearly_equal(d, F::zero(), cast(RELATIVE_EPSILON)) {
            return None;
        }
        let x = (e1.line.c * e2.line.b - e2.line.c * e1.line.b) / d;
        let y = (e2.line.c * e1.line.a - e1.line.c * e2.line.a) / d;

        let (he, e) = if e1.sites[1].sweep_cmp(&e2.sites[1]) == Ordering::Less {
            (first, e1)
        } else {
            (second, e2)
        };
        let right_of_site = x >= e.sites[1].x();
        match (right_of_site, self.arcs[he].side) {
            (true, Side::Left) | (false, Side::Right) => None,
            _ => Some(Point2::new(x, y)),
        }
    }

    fn bucket_of(&self, x: F) -> usize {
        let size = self.hash.len();
        if self.deltax <= F::zero() {
            return 0;
        }
        let raw = ((x - self.xmin) / self.deltax * cast(size as f64))
            .to_isize()
            .unwrap_or(0);
        raw.clamp(0, size as isize - 1) as usize
    }

    /// Hash lookup that drops entries pointing at deleted half-edges.
    fn get_hash(&mut self, bucket: isize) -> Option<ArcId> {
        if bucket < 0 || bucket as usize >= self.hash.len() {
            return None;
        }
        let slot = bucket as usize;
        match self.hash[slot] {
            Some(arc) if self.arcs[arc].deleted => {
                self.hash[slot] = None;
                None
            }
            entry => entry,
        }
    }
}
