//! Benchmarks for the conversion phases.
//!
//! `isolated` measures each phase on a prepared input; `pipeline` measures
//! full jobs at a few voxel sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use mesh_volume::mesh::laplacian_smooth;
use mesh_volume::shapes::icosphere;
use mesh_volume::{
  BoundsCollector, ConversionConfig, Converter, DecimateParams, Decimator, DistanceRasterizer,
  GridShape, RasterParams, SignParams, SignResolver, SmoothParams, Triangle, WorkPartitioner,
};

const RADIUS: f64 = 0.05;

fn sphere() -> Vec<Triangle> {
  icosphere(DVec3::ZERO, RADIUS, 3).triangles().collect()
}

fn config(voxel: f64) -> ConversionConfig {
  ConversionConfig::default()
    .with_voxel_size(voxel)
    .with_max_distance(voxel * 3.0, voxel * 3.0)
}

fn bench_rasterize(c: &mut Criterion) {
  let triangles = sphere();
  let partitioner = WorkPartitioner::new(0).unwrap();
  let bounds = BoundsCollector::collect(triangles.iter().copied()).bounds().unwrap();
  let shape = GridShape::for_mesh(bounds, 0.002, 0.0, u64::MAX).unwrap();
  let rasterizer = DistanceRasterizer::new(shape, RasterParams::new(0.006, 0.006));

  c.bench_function("rasterize (1280 tris, 52³)", |b| {
    b.iter(|| rasterizer.rasterize(black_box(triangles.iter().copied()), &partitioner))
  });
}

fn bench_resolve_signs(c: &mut Criterion) {
  let triangles = sphere();
  let partitioner = WorkPartitioner::new(0).unwrap();
  let bounds = BoundsCollector::collect(triangles.iter().copied()).bounds().unwrap();
  let shape = GridShape::for_mesh(bounds, 0.002, 0.0, u64::MAX).unwrap();
  let field = DistanceRasterizer::new(shape, RasterParams::new(0.006, 0.006))
    .rasterize(triangles, &partitioner);
  let resolver = SignResolver::new(SignParams::from_config(&config(0.002)));

  c.bench_function("resolve_signs (52³)", |b| {
    b.iter(|| resolver.resolve(black_box(&field), &partitioner))
  });
}

fn bench_simplify(c: &mut Criterion) {
  let converter = Converter::new(config(0.002).with_decimation(0.0, 0)).unwrap();
  let raster = converter.mesh_to_grid::<u16, _>(sphere()).unwrap();
  let extracted = converter.grid_to_mesh(&raster.grid).unwrap().mesh;

  c.bench_function("smooth (2 iterations)", |b| {
    b.iter(|| {
      let mut mesh = extracted.clone();
      converter
        .partitioner()
        .install(|| laplacian_smooth(&mut mesh, &SmoothParams::for_width(1.0, 0.002)));
      black_box(mesh)
    })
  });

  let decimator = Decimator::new(DecimateParams {
    max_error: 1e-8,
    ..Default::default()
  });
  c.bench_function("decimate (7 passes)", |b| {
    b.iter(|| {
      let mut mesh = extracted.clone();
      black_box(decimator.run(&mut mesh))
    })
  });
}

fn bench_round_trip(c: &mut Criterion) {
  let mut group = c.benchmark_group("round_trip");
  group.sample_size(10);
  let triangles = sphere();

  for voxel in [0.004, 0.002, 0.001] {
    let converter = Converter::new(config(voxel)).unwrap();
    group.bench_with_input(
      BenchmarkId::from_parameter(format!("{}mm", voxel * 1000.0)),
      &voxel,
      |b, _| {
        b.iter(|| {
          converter
            .convert::<u16, _>(black_box(triangles.iter().copied()))
            .unwrap()
        })
      },
    );
  }

  group.finish();
}

criterion_group!(isolated, bench_rasterize, bench_resolve_signs, bench_simplify);
criterion_group!(pipeline, bench_round_trip);
criterion_main!(isolated, pipeline);
