//! Benchmarks for the sweep, bounded clipping and Lloyd relaxation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use voronum::{
    compute_delaunay_triangulation, compute_voronoi_diagram, voronoi_bounded, BoundKind,
    ClipOptions, Lloyd, Point2,
};

/// Generates random points in a 100x100 square.
fn generate_random_points(count: usize, seed: u64) -> Vec<Point2<f64>> {
    let mut points = Vec::with_capacity(count);
    let mut state = seed;

    for _ in 0..count {
        // xorshift for deterministic random
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let x = (state as f64 / u64::MAX as f64) * 100.0;

        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let y = (state as f64 / u64::MAX as f64) * 100.0;

        points.push(Point2::new(x, y));
    }

    points
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("fortune_sweep");

    for count in [100, 1000, 10000] {
        let points = generate_random_points(count, 12345);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("voronoi", count), &points, |b, pts| {
            b.iter(|| compute_voronoi_diagram(black_box(pts), false))
        });

        group.bench_with_input(BenchmarkId::new("delaunay", count), &points, |b, pts| {
            b.iter(|| compute_delaunay_triangulation(black_box(pts)))
        });
    }

    group.finish();
}

fn bench_bounded(c: &mut Criterion) {
    let mut group = c.benchmark_group("voronoi_bounded");
    let options = ClipOptions::default().with_faces(true).with_faces_by_site(true);

    for count in [100, 1000] {
        let points = generate_random_points(count, 67890);
        group.throughput(Throughput::Elements(count as u64));

        for (name, kind) in [("box", BoundKind::Box), ("circle", BoundKind::Circle)] {
            group.bench_with_input(BenchmarkId::new(name, count), &points, |b, pts| {
                b.iter(|| voronoi_bounded(black_box(pts), kind, 1.0, &options))
            });
        }
    }

    group.finish();
}

fn bench_lloyd(c: &mut Criterion) {
    let mut group = c.benchmark_group("lloyd_step");

    for count in [50, 200] {
        let points = generate_random_points(count, 424242);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("box", count), &points, |b, pts| {
            b.iter(|| {
                let mut lloyd = Lloyd::new(BoundKind::Box, pts.clone(), 1.0).ok()?;
                lloyd.step().ok()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sweep, bench_bounded, bench_lloyd);
criterion_main!(benches);
