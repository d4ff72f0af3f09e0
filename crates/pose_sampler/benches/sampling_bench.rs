//! Benchmarks for viewpoint generation and pose tree construction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pose_sampler::pose_tree::store;
use pose_sampler::{geodesic, sphere_grid, PoseTree};

// ============================================================================
// Sample generators
// ============================================================================

/// Icosphere creation per subdivision level.
fn bench_geodesic_levels(c: &mut Criterion) {
  let mut group = c.benchmark_group("geodesic_create");

  for level in 0..=4u32 {
    let points = 10 * 4u64.pow(level) + 2;
    group.throughput(Throughput::Elements(points));
    group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
      b.iter(|| black_box(geodesic::create(black_box(level))))
    });
  }

  group.finish();
}

/// All levels at once versus one call per level.
fn bench_geodesic_incremental(c: &mut Criterion) {
  let mut group = c.benchmark_group("geodesic_levels_0_to_4");

  group.bench_function("create_levels", |b| {
    b.iter(|| black_box(geodesic::create_levels(black_box(4))))
  });
  group.bench_function("create_each", |b| {
    b.iter(|| {
      let levels: Vec<_> = (0..=4).map(geodesic::create).collect();
      black_box(levels)
    })
  });

  group.finish();
}

fn bench_sphere_grid(c: &mut Criterion) {
  c.bench_function("sphere_grid_30x45", |b| {
    b.iter(|| black_box(sphere_grid::create(black_box(30), black_box(45))))
  });
}

// ============================================================================
// Pose tree
// ============================================================================

fn bench_tree_build(c: &mut Criterion) {
  let mut group = c.benchmark_group("pose_tree_build");

  for max_level in 0..=3i32 {
    group.bench_with_input(
      BenchmarkId::from_parameter(max_level),
      &max_level,
      |b, &max_level| b.iter(|| black_box(PoseTree::build(black_box(max_level)))),
    );
  }

  group.finish();
}

fn bench_tree_encode(c: &mut Criterion) {
  let tree = PoseTree::build(3);
  let mut buffer = Vec::with_capacity(256 * 1024);

  c.bench_function("pose_tree_encode_level_3", |b| {
    b.iter(|| {
      buffer.clear();
      black_box(store::encode(&tree, &mut buffer).ok())
    })
  });
}

criterion_group!(
  benches,
  bench_geodesic_levels,
  bench_geodesic_incremental,
  bench_sphere_grid,
  bench_tree_build,
  bench_tree_encode,
);
criterion_main!(benches);
