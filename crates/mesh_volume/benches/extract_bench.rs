//! Benchmark comparing block-parallel marching cubes against the
//! fast_surface_nets crate on the same sphere field.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fast_surface_nets::ndshape::{ConstShape, ConstShape3u32};
use fast_surface_nets::{surface_nets, SurfaceNetsBuffer};
use glam::DVec3;
use mesh_volume::shapes::sphere_distance;
use mesh_volume::{
  Bounds, ChannelKind, ExtractParams, Grid, GridShape, InterpolationMode, IsosurfaceExtractor,
  WorkPartitioner,
};

/// Grid shape for fast_surface_nets (32³).
type SampleShape = ConstShape3u32<32, 32, 32>;

const SIZE: usize = 32;

/// Sphere distance grid, one voxel per unit, centered in a 32³ lattice.
fn sphere_grid(radius: f64) -> Grid<u16> {
  let shape = GridShape::new(
    Bounds::new(DVec3::ZERO, DVec3::splat(SIZE as f64)),
    1.0,
    u64::MAX,
  )
  .unwrap();
  let mut grid = Grid::<u16>::with_distance(shape, 16, 4.0, 4.0).unwrap();
  let ch = *grid.channel(ChannelKind::Distance).unwrap();
  let center = DVec3::splat(SIZE as f64 / 2.0);
  for z in 0..SIZE {
    for y in 0..SIZE {
      for x in 0..SIZE {
        let p = shape.grid_to_world(x, y, z);
        grid.set_value(&ch, x, y, z, sphere_distance(p, center, radius));
      }
    }
  }
  grid
}

/// Same sphere sampled for fast_surface_nets (f32).
fn sphere_sdf_f32(radius: f32) -> [f32; SampleShape::USIZE] {
  let mut sdf = [1.0f32; SampleShape::USIZE];
  let c = SIZE as f32 / 2.0;
  for i in 0u32..SampleShape::SIZE {
    let [x, y, z] = SampleShape::delinearize(i);
    let d = [x as f32 + 0.5 - c, y as f32 + 0.5 - c, z as f32 + 0.5 - c];
    sdf[i as usize] = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt() - radius;
  }
  sdf
}

fn bench_comparison(c: &mut Criterion) {
  let mut group = c.benchmark_group("extract_comparison");
  let partitioner = WorkPartitioner::new(0).unwrap();

  for radius in [8.0, 12.0, 14.0] {
    let grid = sphere_grid(radius);
    let sdf = sphere_sdf_f32(radius as f32);
    let extractor = IsosurfaceExtractor::new(ExtractParams::default());

    group.bench_with_input(
      BenchmarkId::new("marching_cubes", format!("r={}", radius)),
      &radius,
      |b, _| b.iter(|| extractor.extract(black_box(&grid), &partitioner).unwrap()),
    );

    group.bench_with_input(
      BenchmarkId::new("fast_surface_nets", format!("r={}", radius)),
      &radius,
      |b, _| {
        b.iter(|| {
          let mut buffer = SurfaceNetsBuffer::default();
          surface_nets(
            black_box(&sdf),
            &SampleShape {},
            [0; 3],
            [31; 3],
            &mut buffer,
          );
          black_box(buffer)
        })
      },
    );
  }

  group.finish();
}

/// Block size and interpolation mode on a 32³ sphere.
fn bench_block_sizes(c: &mut Criterion) {
  let mut group = c.benchmark_group("extract_block_size");
  let partitioner = WorkPartitioner::new(0).unwrap();
  let grid = sphere_grid(12.0);

  for block in [4, 8, 16, 32] {
    let extractor = IsosurfaceExtractor::new(ExtractParams::default().with_block_size(block));
    group.bench_with_input(BenchmarkId::from_parameter(block), &block, |b, _| {
      b.iter(|| extractor.extract(black_box(&grid), &partitioner).unwrap())
    });
  }

  let indicator = IsosurfaceExtractor::new(
    ExtractParams::default().with_interpolation(InterpolationMode::Indicator),
  );
  group.bench_function("indicator", |b| {
    b.iter(|| indicator.extract(black_box(&grid), &partitioner).unwrap())
  });

  group.finish();
}

criterion_group!(benches, bench_comparison, bench_block_sizes);
criterion_main!(benches);
