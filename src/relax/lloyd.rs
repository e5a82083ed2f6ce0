//! Lloyd relaxation in a bound region.

use crate::bounds::{BoundKind, Bounds};
use crate::error::{Result, VoronoiError};
use crate::mesh::{clip_diagram, ClipOptions};
use crate::primitives::{Point2, Point3};
use crate::tolerance::{cast, unique_points};
use crate::triangulation::compute_voronoi_diagram;
use num_traits::Float;

/// Cells with more sides are not recognized as faces.
const MAX_CELL_SIDES: usize = 20;

/// Sites closer than this are relaxed as one.
pub const DEFAULT_DEDUP_TOLERANCE: f64 = 1e-4;

/// Scalar density sampled over the region.
pub type WeightField<'w, F> = &'w dyn Fn(Point2<F>) -> F;

/// Measurements of one relaxation step, taken before the sites move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydStep<F> {
    /// Sum of squared distances from each site to its cell's centroid.
    pub displacement: F,
    /// Centroidal Voronoi energy: the sum over cells of `∫ |x - site|²`.
    pub energy: F,
}

/// Stepwise Lloyd relaxation driver.
///
/// # Example
///
/// ```
/// use voronum::relax::Lloyd;
/// use voronum::{BoundKind, Point2};
///
/// let points = vec![
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(1.0, 0.2),
///     Point2::new(0.4, 0.9),
///     Point2::new(0.5, 0.5),
/// ];
/// let mut lloyd = Lloyd::new(BoundKind::Box, points, 0.5).unwrap();
/// let first = lloyd.step().unwrap();
/// let second = lloyd.step().unwrap();
/// assert!(second.energy <= first.energy);
/// ```
pub struct Lloyd<'w, F> {
    bounds: Bounds<F>,
    points: Vec<Point2<F>>,
    weight_field: Option<WeightField<'w, F>>,
    dedup_tolerance: F,
}

impl<'w, F: Float> Lloyd<'w, F> {
    /// Starts a relaxation of `points` inside the region around them,
    /// widened by `clip_margin`.
    pub fn new(kind: BoundKind, points: Vec<Point2<F>>, clip_margin: F) -> Result<Self> {
        if points.len() < 2 {
            return Err(VoronoiError::TooFewSites {
                count: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(VoronoiError::NonFiniteSite { index });
        }
        let bounds = Bounds::from_sites(kind, &points, clip_margin).ok_or(VoronoiError::TooFewSites {
            count: points.len(),
        })?;
        let points = points.into_iter().map(|p| bounds.restrict(p)).collect();
        Ok(Self {
            bounds,
            points,
            weight_field: None,
            dedup_tolerance: cast(DEFAULT_DEDUP_TOLERANCE),
        })
    }

    /// Weights centroids by `field`.
    pub fn with_weight_field(mut self, field: WeightField<'w, F>) -> Self {
        self.weight_field = Some(field);
        self
    }

    pub fn with_dedup_tolerance(mut self, tolerance: F) -> Self {
        self.dedup_tolerance = tolerance;
        self
    }

    #[inline]
    pub fn points(&self) -> &[Point2<F>] {
        &self.points
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds<F> {
        &self.bounds
    }

    pub fn into_points(self) -> Vec<Point2<F>> {
        self.points
    }

    /// Moves every distinct site to the centroid of its cell.
    ///
    /// Sites within the de-duplication tolerance of an earlier site stay
    /// where they are.
    pub fn step(&mut self) -> Result<LloydStep<F>> {
        let unique = unique_points(&self.points, self.dedup_tolerance);
        let real: Vec<Point2<F>> = unique
            .representatives
            .iter()
            .map(|&i| self.points[i])
            .collect();

        let mut sites = real.clone();
        for &p in &real {
            sites.extend(self.bounds.mirror(p));
        }
        let diagram = compute_voronoi_diagram(&sites, true)?;
        let options = ClipOptions::default()
            .with_hanging_edges(true)
            .with_faces(true)
            .with_faces_by_site(true)
            .with_max_face_sides(MAX_CELL_SIDES);
        let mesh = clip_diagram(&diagram, &sites, &self.bounds, &options);
        let vertices: Vec<Point2<F>> = mesh.vertices.iter().map(|v| v.xy()).collect();

        let mut stats = LloydStep {
            displacement: F::zero(),
            energy: F::zero(),
        };
        for (k, &i) in unique.representatives.iter().enumerate() {
            let site = real[k];
            let Some(face) = mesh.faces.get(k) else {
                log::warn!("site {} has no cell; left in place", i);
                continue;
            };
            let polygon: Vec<Point2<F>> = face.iter().map(|&v| vertices[v]).collect();
            let cell = cell_moments(&polygon, site, self.weight_field);
            stats.displacement = stats.displacement + site.distance_squared(cell.centroid);
            stats.energy = stats.energy + cell.energy;
            self.points[i] = self.bounds.restrict(cell.centroid);
        }

        log::debug!(
            "lloyd step: {} sites ({} ghosts), displacement {:e}, energy {:e}",
            real.len(),
            sites.len() - real.len(),
            stats.displacement.to_f64().unwrap_or(f64::NAN),
            stats.energy.to_f64().unwrap_or(f64::NAN)
        );
        Ok(stats)
    }
}

struct CellMoments<F> {
    centroid: Point2<F>,
    energy: F,
}

/// Centroid of a CCW cell and its second moment about `site`.
///
/// The cell is fanned into triangles from its first vertex; each triangle
/// is weighted by its area times `field` at its centroid.
fn cell_moments<F: Float>(
    polygon: &[Point2<F>],
    site: Point2<F>,
    field: Option<WeightField<'_, F>>,
) -> CellMoments<F> {
    let third = cast::<F>(1.0 / 3.0);
    let twelfth = cast::<F>(1.0 / 12.0);
    let half = cast::<F>(0.5);

    let mut energy = F::zero();
    let mut total = F::zero();
    let (mut sx, mut sy) = (F::zero(), F::zero());
    if let Some((&v0, rest)) = polygon.split_first() {
        for pair in rest.windows(2) {
            let (v1, v2) = (pair[0], pair[1]);
            let area = (v1 - v0).cross(v2 - v0) * half;
            let g = Point2::new((v0.x + v1.x + v2.x) * third, (v0.y + v1.y + v2.y) * third);
            let spread = g.distance_squared(v0) + g.distance_squared(v1) + g.distance_squared(v2);
            energy = energy + area * (g.distance_squared(site) + spread * twelfth);

            let w = match field {
                Some(f) => area * f(g),
                None => area,
            };
            sx = sx + g.x * w;
            sy = sy + g.y * w;
            total = total + w;
        }
    }

    let centroid = if total.abs() > F::min_positive_value() {
        Point2::new(sx / total, sy / total)
    } else if polygon.is_empty() {
        site
    } else {
        let n = cast::<F>(polygon.len() as f64);
        let (x, y) = polygon
            .iter()
            .fold((F::zero(), F::zero()), |(x, y), p| (x + p.x, y + p.y));
        Point2::new(x / n, y / n)
    };
    CellMoments { centroid, energy }
}

/// Relaxes `points` for `iterations` steps and returns them with `z = 0`.
///
/// # Example
///
/// ```
/// use voronum::{lloyd2d, BoundKind, Point2};
///
/// let points = vec![
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(0.1, 0.1),
///     Point2::new(2.0, 2.0),
/// ];
/// let relaxed = lloyd2d(BoundKind::Box, &points, 5, 0.0, None).unwrap();
/// assert_eq!(relaxed.len(), 3);
/// assert!(relaxed.iter().all(|p| p.z == 0.0));
/// ```
pub fn lloyd2d<F: Float>(
    kind: BoundKind,
    points: &[Point2<F>],
    iterations: usize,
    clip_margin: F,
    weight_field: Option<WeightField<'_, F>>,
) -> Result<Vec<Point3<F>>> {
    let mut lloyd = Lloyd::new(kind, points.to_vec(), clip_margin)?;
    if let Some(field) = weight_field {
        lloyd = lloyd.with_weight_field(field);
    }
    for _ in 0..iterations {
        lloyd.step()?;
    }
    Ok(lloyd.into_points().into_iter().map(Point3::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn jittered_grid() -> Vec<Point2<f64>> {
        let mut points = Vec::new();
        for j in 0..3 {
            for i in 0..4 {
                let k = (j * 4 + i) as f64;
                points.push(Point2::new(
                    i as f64 * 2.5 + 0.7 * k.sin(),
                    j as f64 * 2.5 + 0.6 * (3.0 * k).cos(),
                ));
            }
        }
        points
    }

    #[test]
    fn test_cell_moments_of_square() {
        let square = [
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let cell = cell_moments(&square, Point2::new(1.0, 1.0), None);
        assert_relative_eq!(cell.centroid.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(cell.centroid.y, 1.0, epsilon = 1e-12);
        // Polar moment of a 2x2 square about its centre.
        assert_relative_eq!(cell.energy, 8.0 / 3.0, epsilon = 1e-12);

        let off = cell_moments(&square, Point2::new(0.0, 0.0), None);
        assert_relative_eq!(off.energy, 8.0 / 3.0 + 4.0 * 2.0, epsilon = 1e-12);
    }

    /// Energy must not rise between steps. The site-to-centroid displacement
    /// sum is not strictly monotone for Lloyd iteration, so each step may
    /// exceed the previous one by a bounded slack while the sum still falls
    /// overall.
    #[test]
    fn test_energy_is_non_increasing() {
        let mut lloyd = Lloyd::new(BoundKind::Box, jittered_grid(), 0.5).unwrap();
        let steps: Vec<LloydStep<f64>> = (0..8).map(|_| lloyd.step().unwrap()).collect();
        for pair in steps.windows(2) {
            assert!(
                pair[1].energy <= pair[0].energy * (1.0 + 1e-9),
                "energy rose: {} -> {}",
                pair[0].energy,
                pair[1].energy
            );
            assert!(
                pair[1].displacement <= pair[0].displacement * 1.25 + 1e-18,
                "displacement jumped: {} -> {}",
                pair[0].displacement,
                pair[1].displacement
            );
        }
        assert!(steps[7].displacement < 0.5 * steps[0].displacement);
    }

    #[test]
    fn test_sites_stay_in_bounds() {
        let mut lloyd = Lloyd::new(BoundKind::Box, jittered_grid(), 0.5).unwrap();
        for _ in 0..4 {
            lloyd.step().unwrap();
        }
        let bounds = *lloyd.bounds();
        assert!(lloyd.points().iter().all(|&p| bounds.contains(p, true)));
    }

    #[test]
    fn test_duplicates_are_carried() {
        let mut points = jittered_grid();
        let twin = points[5];
        points.push(twin);
        let mut lloyd = Lloyd::new(BoundKind::Box, points, 0.5).unwrap();
        lloyd.step().unwrap();
        assert_eq!(lloyd.points()[12], twin);
        assert!(lloyd.points()[5].distance(twin) > 1e-6);
    }

    #[test]
    fn test_circle_region() {
        let relaxed = lloyd2d(BoundKind::Circle, &jittered_grid(), 3, 0.5, None).unwrap();
        let bounds = Bounds::from_sites(BoundKind::Circle, &jittered_grid(), 0.5).unwrap();
        assert_eq!(relaxed.len(), 12);
        for p in &relaxed {
            assert!(bounds.contains(p.xy(), true) || bounds.boundary_distance(p.xy()) < 1e-9);
        }
    }

    #[test]
    fn test_weight_field_pulls_centroids() {
        let flat = lloyd2d(BoundKind::Box, &jittered_grid(), 1, 0.5, None).unwrap();
        let constant: WeightField<'_, f64> = &|_| 3.0;
        let same = lloyd2d(BoundKind::Box, &jittered_grid(), 1, 0.5, Some(constant)).unwrap();
        for (a, b) in flat.iter().zip(&same) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        }

        let ramp: WeightField<'_, f64> = &|p| 1.0 + p.x;
        let pulled = lloyd2d(BoundKind::Box, &jittered_grid(), 1, 0.5, Some(ramp)).unwrap();
        let sum_x = |points: &[Point3<f64>]| points.iter().map(|p| p.x).sum::<f64>();
        assert!(sum_x(&pulled) > sum_x(&flat));
    }

    #[test]
    fn test_too_few_sites() {
        let err = Lloyd::new(BoundKind::Box, vec![Point2::new(1.0_f64, 1.0)], 0.0)
            .err()
            .unwrap();
        assert_eq!(err, VoronoiError::TooFewSites { count: 1 });
        assert!(lloyd2d::<f64>(BoundKind::Box, &[], 3, 0.0, None).is_err());
    }
}
