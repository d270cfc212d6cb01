use glam::DVec3;

use super::*;
use crate::bounds::Bounds;
use crate::shapes;

fn sphere_setup(voxel: f64) -> (GridShape, Vec<Triangle>) {
  let mesh = shapes::icosphere(DVec3::ZERO, 1.0, 2);
  let shape = GridShape::for_mesh(mesh.bounds().unwrap(), voxel, 0.0, u64::MAX).unwrap();
  (shape, mesh.triangles().collect())
}

/// Closest-wins over every triangle, no pruning.
fn brute_force(shape: &GridShape, params: &RasterParams, tris: &[Triangle]) -> Vec<Option<Contribution>> {
  let mut out = vec![None; shape.cell_count()];
  for (index, slot) in out.iter_mut().enumerate() {
    let [x, y, z] = shape.coords(index);
    let p = shape.grid_to_world(x, y, z);
    for (i, tri) in tris.iter().enumerate() {
      let d = tri.signed_distance(p);
      if d < -params.max_in || d > params.max_out {
        continue;
      }
      let c = Contribution {
        distance: d,
        triangle: i as u32,
      };
      if slot.map_or(true, |cur: Contribution| c.beats(&cur)) {
        *slot = Some(c);
      }
    }
  }
  out
}

#[test]
fn test_matches_brute_force() {
  let (shape, tris) = sphere_setup(0.125);
  let params = RasterParams::new(0.3, 0.2);
  let field = DistanceRasterizer::new(shape, params)
    .rasterize(tris.iter().copied(), &WorkPartitioner::new(2).unwrap());
  assert_eq!(field.contributions(), &brute_force(&shape, &params, &tris)[..]);
}

#[test]
fn test_leaf_size_does_not_change_result() {
  let (shape, tris) = sphere_setup(0.1);
  let pool = WorkPartitioner::new(2).unwrap();
  let a = DistanceRasterizer::new(shape, RasterParams::new(0.2, 0.2))
    .rasterize(tris.iter().copied(), &pool);
  let b = DistanceRasterizer::new(shape, RasterParams::new(0.2, 0.2).with_leaf_size(8))
    .rasterize(tris.iter().copied(), &pool);
  assert_eq!(a.contributions(), b.contributions());
}

#[test]
fn test_thread_count_does_not_change_result() {
  let (shape, tris) = sphere_setup(0.05);
  let rasterizer = DistanceRasterizer::new(shape, RasterParams::new(0.15, 0.15));
  let one = rasterizer.rasterize(tris.iter().copied(), &WorkPartitioner::new(1).unwrap());
  let many = rasterizer.rasterize(tris.iter().copied(), &WorkPartitioner::new(4).unwrap());
  assert_eq!(one, many);
}

#[test]
fn test_band_and_sign() {
  let (shape, tris) = sphere_setup(0.1);
  let field = DistanceRasterizer::new(shape, RasterParams::new(0.25, 0.15))
    .rasterize(tris, &WorkPartitioner::new(2).unwrap());

  assert!(field.stats().touched > 0);
  for index in 0..shape.cell_count() {
    let Some(d) = field.distance(index) else {
      continue;
    };
    assert!((-0.25..=0.15).contains(&d));
    let [x, y, z] = shape.coords(index);
    let r = shape.grid_to_world(x, y, z).length();
    // Inscribed polyhedron: the mesh lies inside the unit sphere.
    if r < 0.85 {
      assert!(d < 0.0, "voxel at r = {r} has d = {d}");
    }
    if r > 1.0 {
      assert!(d > 0.0, "voxel at r = {r} has d = {d}");
    }
  }
}

#[test]
fn test_degenerate_triangles_counted() {
  let shape = GridShape::new(Bounds::new(DVec3::ZERO, DVec3::splat(4.0)), 1.0, u64::MAX).unwrap();
  let p = DVec3::splat(2.0);
  let tris = vec![
    Triangle::new(p, p, p),
    Triangle::new(DVec3::ZERO, DVec3::X, DVec3::X * 2.0),
    Triangle::new(DVec3::new(0.0, 0.0, 2.0), DVec3::new(4.0, 0.0, 2.0), DVec3::new(0.0, 4.0, 2.0)),
  ];
  let field = DistanceRasterizer::new(shape, RasterParams::new(1.0, 1.0))
    .rasterize(tris, &WorkPartitioner::new(1).unwrap());
  assert_eq!(field.stats().triangles, 3);
  assert_eq!(field.stats().degenerate, 2);
  assert!(matches!(
    field.stats().diagnostic(),
    Some(Diagnostic::DegenerateInput { skipped: 2 })
  ));
  // Only the plane triangle contributed.
  assert!(field.contributions().iter().flatten().all(|c| c.triangle == 2));
}

#[test]
fn test_triangle_outside_grid_is_ignored() {
  let shape = GridShape::new(Bounds::new(DVec3::ZERO, DVec3::splat(4.0)), 1.0, u64::MAX).unwrap();
  let far = DVec3::splat(100.0);
  let tris = vec![Triangle::new(far, far + DVec3::X, far + DVec3::Y)];
  let field = DistanceRasterizer::new(shape, RasterParams::new(1.0, 1.0))
    .rasterize(tris, &WorkPartitioner::new(1).unwrap());
  assert_eq!(field.stats().touched, 0);
  assert_eq!(field.stats().offers, 0);
}
