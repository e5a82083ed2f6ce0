//! Perpendicular bisectors between pairs of sites.

use super::site::Site;
use crate::error::{Result, VoronoiError};
use crate::primitives::{LineEquation2, Vec2};
use num_traits::Float;

/// Which endpoint slot of an edge, or which half of a bisector, is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Bisector of `sites[0]` and `sites[1]`, stored as `a·x + b·y = c`.
///
/// Either `a` or `b` is exactly one. Endpoint slots hold vertex ids and are
/// filled at most once each.
#[derive(Debug, Clone)]
pub(crate) struct Edge<F> {
    pub line: LineEquation2<F>,
    pub sites: [Site<F>; 2],
    pub endpoints: [Option<usize>; 2],
}

impl<F: Float> Edge<F> {
    /// True when the equation was normalized with `a = 1`.
    #[inline]
    pub fn is_x_unit(&self) -> bool {
        self.line.a == F::one()
    }

    #[inline]
    pub fn site(&self, side: Side) -> Site<F> {
        self.sites[side.index()]
    }
}

/// Per-computation store of edges; an edge's id is its index.
#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeArena<F> {
    edges: Vec<Edge<F>>,
}

impl<F: Float> EdgeArena<F> {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    #[inline]
    pub fn get(&self, id: usize) -> &Edge<F> {
        &self.edges[id]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Creates the bisector of `left` and `right` and returns its id.
    ///
    /// Fails when the two sites share both coordinates.
    pub fn bisect(&mut self, left: Site<F>, right: Site<F>) -> Result<usize> {
        let dx = right.x() - left.x();
        let dy = right.y() - left.y();
        if dx == F::zero() && dy == F::zero() {
            return Err(VoronoiError::DegenerateInput {
                first: left.id,
                second: right.id,
            });
        }

        let half = (F::one() + F::one()).recip();
        let c = left.x() * dx + left.y() * dy + (dx * dx + dy * dy) * half;
        let line = if dx.abs() > dy.abs() {
            LineEquation2::new(F::one(), dy / dx, c / dx)
        } else {
            LineEquation2::new(dx / dy, F::one(), c / dy)
        };

        self.edges.push(Edge {
            line,
            sites: [left, right],
            endpoints: [None, None],
        });
        Ok(self.edges.len() - 1)
    }

    /// Fills one endpoint slot; returns true when both slots are now filled.
    pub fn set_endpoint(&mut self, id: usize, side: Side, vertex: usize) -> bool {
        let edge = &mut self.edges[id];
        edge.endpoints[side.index()] = Some(vertex);
        edge.endpoints[side.opposite().index()].is_some()
    }
}

/// Direction in which the `open` endpoint slot of a bisector runs off to infinity.
///
/// For `a = 1` lines the `Right` slot is the low-y end when `b ≥ 0` and the
/// high-y end otherwise; for `b = 1` lines the `Left` slot is the low-x end.
pub(crate) fn open_end_direction<F: Float>(line: &LineEquation2<F>, open: Side) -> Vec2<F> {
    let (low, high) = if line.a == F::one() {
        (Vec2::new(line.b, -F::one()), Vec2::new(-line.b, F::one()))
    } else {
        (Vec2::new(-F::one(), line.a), Vec2::new(F::one(), -line.a))
    };
    let open_is_low = if line.a == F::one() {
        if line.b >= F::zero() {
            open == Side::Right
        } else {
            open == Side::Left
        }
    } else {
        open == Side::Left
    };
    if open_is_low {
        low
    } else {
        high
    }
}
