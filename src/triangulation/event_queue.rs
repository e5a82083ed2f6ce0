//! Circle-event priority queue.
//!
//! Events are bucketed by `ystar` and each bucket is a singly linked list
//! sorted by `(ystar, x)`. A half-edge has at most one pending event, so
//! entries are stored in a slot indexed by the half-edge id.

use super::beach_line::ArcId;
use crate::primitives::Point2;
use crate::tolerance::cast;
use num_traits::Float;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
struct Entry<F> {
    vertex: Point2<F>,
    ystar: F,
    next: Option<ArcId>,
}

#[derive(Debug, Clone)]
pub(crate) struct EventQueue<F> {
    ymin: F,
    deltay: F,
    buckets: Vec<Option<ArcId>>,
    entries: Vec<Option<Entry<F>>>,
    count: usize,
    min_bucket: usize,
}

impl<F: Float> EventQueue<F> {
    /// Creates an empty queue hashed over `[ymin, ymax]` for `site_count` sites.
    pub fn new(ymin: F, ymax: F, site_count: usize) -> Self {
        let size = ((4.0 * (site_count as f64).sqrt()) as usize).max(1);
        Self {
            ymin,
            deltay: ymax - ymin,
            buckets: vec![None; size],
            entries: Vec::new(),
            count: 0,
            min_bucket: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Schedules the circle event of `arc` at `vertex`, keyed by `vertex.y + offset`.
    pub fn insert(&mut self, arc: ArcId, vertex: Point2<F>, offset: F) {
        if self.entries.len() <= arc {
            self.entries.resize(arc + 1, None);
        }
        self.delete(arc);
        let ystar = vertex.y + offset;
        let bucket = self.bucket_of(ystar);

        let mut prev: Option<ArcId> = None;
        let mut next = self.buckets[bucket];
        while let Some(candidate) = next {
            let Some(entry) = self.entries[candidate] else {
                break;
            };
            if Self::key_cmp((ystar, vertex.x), (entry.ystar, entry.vertex.x)) != Ordering::Greater {
                break;
            }
            prev = Some(candidate);
            next = entry.next;
        }

        self.entries[arc] = Some(Entry { vertex, ystar, next });
        match prev {
            Some(p) => {
                if let Some(entry) = self.entries[p].as_mut() {
                    entry.next = Some(arc);
                }
            }
            None => self.buckets[bucket] = Some(arc),
        }
        self.count += 1;
    }

    /// Removes the pending event of `arc`, if it has one.
    pub fn delete(&mut self, arc: ArcId) {
        let Some(entry) = self.entries.get(arc).copied().flatten() else {
            return;
        };
        let bucket = self.bucket_of(entry.ystar);

        if self.buckets[bucket] == Some(arc) {
            self.buckets[bucket] = entry.next;
        } else {
            let mut cursor = self.buckets[bucket];
            while let Some(c) = cursor {
                let Some(current) = self.entries[c].as_mut() else {
                    break;
                };
                if current.next == Some(arc) {
                    current.next = entry.next;
                    break;
                }
                cursor = current.next;
            }
        }
        self.entries[arc] = None;
        self.count -= 1;
    }

    /// Returns `(x, ystar)` of the earliest event.
    pub fn min_point(&mut self) -> Option<Point2<F>> {
        if self.count == 0 {
            return None;
        }
        while self.min_bucket < self.buckets.len() && self.buckets[self.min_bucket].is_none() {
            self.min_bucket += 1;
        }
        let head = self.buckets.get(self.min_bucket).copied().flatten()?;
        let entry = self.entries[head]?;
        Some(Point2::new(entry.vertex.x, entry.ystar))
    }

    /// Removes the earliest event and returns its half-edge, vertex and key.
    pub fn pop_min(&mut self) -> Option<(ArcId, Point2<F>, F)> {
        self.min_point()?;
        let head = self.buckets[self.min_bucket]?;
        let entry = self.entries[head].take()?;
        self.buckets[self.min_bucket] = entry.next;
        self.count -= 1;
        Some((head, entry.vertex, entry.ystar))
    }

    fn key_cmp(a: (F, F), b: (F, F)) -> Ordering {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
    }

    fn bucket_of(&mut self, ystar: F) -> usize {
        let size = self.buckets.len();
        let bucket = if self.deltay <= F::zero() {
            0
        } else {
            ((ystar - self.ymin) / self.deltay * cast(size as f64))
                .to_isize()
                .unwrap_or(0)
                .clamp(0, size as isize - 1) as usize
        };
        if bucket < self.min_bucket {
            self.min_bucket = bucket;
        }
        bucket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_key_order() {
        let mut q: EventQueue<f64> = EventQueue::new(0.0, 10.0, 9);
        q.insert(3, Point2::new(1.0, 7.0), 1.0);
        q.insert(5, Point2::new(4.0, 1.0), 0.5);
        q.insert(2, Point2::new(2.0, 1.0), 0.5);
        assert!(!q.is_empty());

        assert_eq!(q.min_point(), Some(Point2::new(2.0, 1.5)));
        assert_eq!(q.pop_min(), Some((2, Point2::new(2.0, 1.0), 1.5)));
        assert_eq!(q.pop_min(), Some((5, Point2::new(4.0, 1.0), 1.5)));
        assert_eq!(q.pop_min(), Some((3, Point2::new(1.0, 7.0), 8.0)));
        assert!(q.is_empty());
        assert_eq!(q.pop_min(), None);
    }

    #[test]
    fn test_delete_unlinks_entry() {
        let mut q: EventQueue<f64> = EventQueue::new(0.0, 10.0, 4);
        q.insert(0, Point2::new(1.0, 2.0), 0.0);
        q.insert(1, Point2::new(2.0, 2.0), 0.0);
        q.insert(4, Point2::new(3.0, 2.0), 0.0);
        q.delete(1);
        q.delete(1);
        assert_eq!(q.pop_min().map(|(arc, _, _)| arc), Some(0));
        assert_eq!(q.pop_min().map(|(arc, _, _)| arc), Some(4));
        assert!(q.is_empty());
    }

    #[test]
    fn test_equal_keys_insert_before_existing() {
        let mut q: EventQueue<f64> = EventQueue::new(0.0, 1.0, 1);
        q.insert(0, Point2::new(5.0, 5.0), 0.0);
        q.insert(1, Point2::new(5.0, 5.0), 0.0);
        assert_eq!(q.pop_min().map(|(arc, _, _)| arc), Some(1));
        assert_eq!(q.pop_min().map(|(arc, _, _)| arc), Some(0));
    }

    #[test]
    fn test_flat_range_uses_one_bucket() {
        let mut q: EventQueue<f64> = EventQueue::new(3.0, 3.0, 16);
        q.insert(0, Point2::new(0.0, 9.0), 0.0);
        q.insert(1, Point2::new(0.0, -9.0), 0.0);
        assert_eq!(q.pop_min().map(|(arc, _, _)| arc), Some(1));
    }
}
