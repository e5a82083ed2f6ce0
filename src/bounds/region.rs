//! Bound regions used to close an unbounded diagram.

use super::Aabb2;
use crate::primitives::{Circle2, LineEquation2, Point2, Segment2, Vec2};
use crate::tolerance::{cast, scaled_tolerance};
use num_traits::Float;
use std::fmt;

/// Shape of the region an unbounded diagram is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundKind {
    /// Axis-aligned box around the sites.
    #[default]
    Box,
    /// Circle around the centroid of the sites.
    Circle,
}

/// A convex region used to clip Voronoi diagrams.
///
/// # Example
///
/// ```
/// use voronum::bounds::{BoundKind, Bounds};
/// use voronum::Point2;
///
/// let sites = [Point2::new(0.0_f64, 0.0), Point2::new(10.0, 4.0)];
/// let bounds = Bounds::from_sites(BoundKind::Box, &sites, 1.0).unwrap();
/// assert!(bounds.contains(Point2::new(-1.0, 2.0), true));
/// assert!(!bounds.contains(Point2::new(-1.5, 2.0), true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds<F> {
    Box(Aabb2<F>),
    Circle(Circle2<F>),
}

impl<F: Float> Bounds<F> {
    /// Derives a region from the extent of `sites`, widened by `margin`.
    ///
    /// A box spans the min/max coordinates of the sites. A circle is
    /// centered on their mean and reaches the farthest site. Returns `None`
    /// for an empty slice.
    pub fn from_sites(kind: BoundKind, sites: &[Point2<F>], margin: F) -> Option<Self> {
        match kind {
            BoundKind::Box => {
                Aabb2::from_points(sites.iter().copied()).map(|aabb| Self::Box(aabb.expanded(margin)))
            }
            BoundKind::Circle => {
                if sites.is_empty() {
                    return None;
                }
                let n = cast::<F>(sites.len() as f64);
                let (sx, sy) = sites
                    .iter()
                    .fold((F::zero(), F::zero()), |(sx, sy), p| (sx + p.x, sy + p.y));
                let center = Point2::new(sx / n, sy / n);
                let radius = sites
                    .iter()
                    .map(|p| p.distance(center))
                    .fold(F::zero(), F::max);
                Some(Self::Circle(Circle2::new(center, radius + margin)))
            }
        }
    }

    pub fn kind(&self) -> BoundKind {
        match self {
            Self::Box(_) => BoundKind::Box,
            Self::Circle(_) => BoundKind::Circle,
        }
    }

    /// Point the boundary contour is ordered around.
    pub fn center(&self) -> Point2<F> {
        match self {
            Self::Box(aabb) => aabb.center(),
            Self::Circle(circle) => circle.center,
        }
    }

    /// Area enclosed by the region.
    pub fn area(&self) -> F {
        match self {
            Self::Box(aabb) => aabb.area(),
            Self::Circle(circle) => circle.area(),
        }
    }

    /// Tests whether `p` lies in the region.
    pub fn contains(&self, p: Point2<F>, include_boundary: bool) -> bool {
        match self {
            Self::Box(aabb) => aabb.contains_point(p, include_boundary),
            Self::Circle(circle) => circle.contains(p, include_boundary),
        }
    }

    /// Unsigned distance from `p` to the region boundary.
    pub fn boundary_distance(&self, p: Point2<F>) -> F {
        match self {
            Self::Box(aabb) => {
                if aabb.contains_point(p, true) {
                    (p.x - aabb.min.x)
                        .min(aabb.max.x - p.x)
                        .min(p.y - aabb.min.y)
                        .min(aabb.max.y - p.y)
                } else {
                    p.distance(aabb.clamp(p))
                }
            }
            Self::Circle(circle) => (p.distance(circle.center) - circle.radius).abs(),
        }
    }

    /// Moves `p` into the region: clamped into a box, projected onto a circle.
    ///
    /// Points already inside are returned unchanged.
    pub fn restrict(&self, p: Point2<F>) -> Point2<F> {
        match self {
            Self::Box(aabb) => aabb.clamp(p),
            Self::Circle(circle) => {
                if circle.contains(p, true) {
                    p
                } else {
                    circle.nearest_point(p)
                }
            }
        }
    }

    /// Points where an infinite line meets the region boundary.
    pub fn intersect_line(&self, line: &LineEquation2<F>) -> Vec<Point2<F>> {
        match self {
            Self::Box(aabb) => aabb.intersect_line(line),
            Self::Circle(circle) => circle.intersect_line(line),
        }
    }

    /// Points where a segment crosses the region boundary, ordered from its start.
    pub fn intersect_segment(&self, segment: &Segment2<F>) -> Vec<Point2<F>> {
        match self {
            Self::Box(aabb) => aabb.intersect_segment(segment),
            Self::Circle(circle) => circle.intersect_segment(segment),
        }
    }

    /// Boundary crossings of the ray `origin + t·direction` for `t > 0`, nearest first.
    ///
    /// Crossings within the boundary tolerance of `origin` are ignored.
    pub fn ray_crossings(&self, origin: Point2<F>, direction: Vec2<F>) -> Vec<Point2<F>> {
        let Some(dir) = direction.normalize() else {
            return Vec::new();
        };
        let line = LineEquation2::from_two_points(origin, origin + dir);
        let tol = self.tolerance();
        let mut hits: Vec<(F, Point2<F>)> = self
            .intersect_line(&line)
            .into_iter()
            .map(|p| ((p - origin).dot(dir), p))
            .filter(|&(t, _)| t > tol)
            .collect();
        hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        hits.into_iter().map(|(_, p)| p).collect()
    }

    /// Corners of the boundary contour; empty for a circle.
    pub fn corners(&self) -> Vec<Point2<F>> {
        match self {
            Self::Box(aabb) => aabb.corners().to_vec(),
            Self::Circle(_) => Vec::new(),
        }
    }

    /// Ghost images of an interior point mirrored across the boundary.
    ///
    /// A box yields one image per side and a circle yields one radial image.
    /// Points not strictly inside the region have no ghosts.
    pub fn mirror(&self, p: Point2<F>) -> Vec<Point2<F>> {
        if !self.contains(p, false) {
            return Vec::new();
        }
        match self {
            Self::Box(aabb) => aabb.reflect_point(p).to_vec(),
            Self::Circle(circle) => {
                let ghost = circle.reflect_point(p);
                if ghost.distance(p) > self.tolerance() {
                    vec![ghost]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Distance below which two boundary points are considered the same.
    pub fn tolerance(&self) -> F {
        match self {
            Self::Box(aabb) => aabb.tolerance(),
            Self::Circle(circle) => scaled_tolerance(circle.radius),
        }
    }
}

impl<F: Float> fmt::Display for Bounds<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = |x: F| x.to_f64().unwrap_or(f64::NAN);
        match self {
            Self::Box(aabb) => write!(
                f,
                "box [{}, {}] x [{}, {}]",
                v(aabb.min.x),
                v(aabb.max.x),
                v(aabb.min.y),
                v(aabb.max.y)
            ),
            Self::Circle(circle) => write!(
                f,
                "circle center ({}, {}) radius {}",
                v(circle.center.x),
                v(circle.center.y),
                v(circle.radius)
            ),
        }
    }
}
