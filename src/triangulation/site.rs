//! Sorted site registry consumed by the sweep.

use crate::error::{Result, VoronoiError};
use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// An input point tagged with its index in the caller's slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Site<F> {
    pub point: Point2<F>,
    pub id: usize,
}

impl<F: Float> Site<F> {
    #[inline]
    pub fn sweep_cmp(&self, other: &Self) -> Ordering {
        self.point.sweep_cmp(&other.point)
    }

    #[inline]
    pub fn x(&self) -> F {
        self.point.x
    }

    #[inline]
    pub fn y(&self) -> F {
        self.point.y
    }
}

/// Input sites sorted by `(y, x)` with a forward-only cursor.
///
/// The registry also issues vertex ids, in the order circle events are
/// realized.
#[derive(Debug, Clone)]
pub(crate) struct SiteList<F> {
    sites: Vec<Site<F>>,
    cursor: usize,
    next_vertex_id: usize,
    min: Point2<F>,
    max: Point2<F>,
}

impl<F: Float> SiteList<F> {
    /// Copies and sorts the points; fails on the first non-finite coordinate.
    pub fn new(points: &[Point2<F>]) -> Result<Self> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(VoronoiError::NonFiniteSite { index });
        }

        let origin = points.first().copied().unwrap_or_else(Point2::origin);
        let (min, max) = points.iter().fold((origin, origin), |(lo, hi), p| {
            (
                Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });

        let mut sites: Vec<Site<F>> = points
            .iter()
            .enumerate()
            .map(|(id, &point)| Site { point, id })
            .collect();
        // Stable, so coincident points keep input order.
        sites.sort_by(|a, b| a.sweep_cmp(b));

        Ok(Self {
            sites,
            cursor: 0,
            next_vertex_id: 0,
            min,
            max,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Returns the next unprocessed site in sweep order.
    pub fn next_site(&mut self) -> Option<Site<F>> {
        let site = self.sites.get(self.cursor).copied();
        if site.is_some() {
            self.cursor += 1;
        }
        site
    }

    /// Issues the next sequential vertex id.
    pub fn assign_vertex_id(&mut self) -> usize {
        let id = self.next_vertex_id;
        self.next_vertex_id += 1;
        id
    }

    #[inline]
    pub fn min(&self) -> Point2<F> {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point2<F> {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_by_y_then_x() {
        let points = [
            Point2::new(3.0_f64, 1.0),
            Point2::new(0.0, 2.0),
            Point2::new(1.0, 1.0),
            Point2::new(-4.0, 0.0),
        ];
        let mut list = SiteList::new(&points).unwrap();
        let order: Vec<usize> = std::iter::from_fn(|| list.next_site()).map(|s| s.id).collect();
        assert_eq!(order, vec![3, 2, 0, 1]);
        assert!(list.next_site().is_none());
    }

    #[test]
    fn test_extents() {
        let points = [Point2::new(3.0_f64, 1.0), Point2::new(-1.0, 5.0)];
        let list = SiteList::new(&points).unwrap();
        assert_eq!(list.min(), Point2::new(-1.0, 1.0));
        assert_eq!(list.max(), Point2::new(3.0, 5.0));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_vertex_ids_are_sequential() {
        let mut list = SiteList::new(&[Point2::new(0.0_f64, 0.0)]).unwrap();
        assert_eq!(list.assign_vertex_id(), 0);
        assert_eq!(list.assign_vertex_id(), 1);
        assert_eq!(list.assign_vertex_id(), 2);
    }

    #[test]
    fn test_rejects_non_finite() {
        let points = [Point2::new(0.0_f64, 0.0), Point2::new(f64::NAN, 1.0)];
        assert_eq!(
            SiteList::new(&points).unwrap_err(),
            VoronoiError::NonFiniteSite { index: 1 }
        );
    }
}
