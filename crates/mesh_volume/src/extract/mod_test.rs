use std::collections::HashSet;

use glam::DVec3;

use super::*;
use crate::bounds::{Bounds, GridShape};
use crate::shapes::sphere_distance;
use crate::sign::density_from_distance;

const RADIUS: f64 = 5.0;

fn lattice(n: usize) -> GridShape {
  let h = n as f64 / 2.0;
  GridShape::new(Bounds::new(DVec3::splat(-h), DVec3::splat(h)), 1.0, u64::MAX).unwrap()
}

fn sphere_grid(n: usize) -> Grid<u16> {
  let mut grid = Grid::<u16>::with_distance(lattice(n), 16, 3.0, 3.0).unwrap();
  let ch = *grid.channel(ChannelKind::Distance).unwrap();
  let [nx, ny, nz] = grid.shape().dims();
  for z in 0..nz {
    for y in 0..ny {
      for x in 0..nx {
        let p = grid.shape().grid_to_world(x, y, z);
        grid.set_value(&ch, x, y, z, sphere_distance(p, DVec3::ZERO, RADIUS));
      }
    }
  }
  grid
}

fn pool(threads: usize) -> WorkPartitioner {
  WorkPartitioner::new(threads).unwrap()
}

fn sorted_positions(mesh: &IndexedMesh) -> Vec<[u64; 3]> {
  let mut out: Vec<[u64; 3]> = mesh
    .vertices
    .iter()
    .map(|v| v.to_array().map(f64::to_bits))
    .collect();
  out.sort_unstable();
  out
}

fn assert_no_duplicate_faces(mesh: &IndexedMesh) {
  let mut seen = HashSet::new();
  for f in &mesh.faces {
    let mut key = *f;
    key.sort_unstable();
    assert!(seen.insert(key), "duplicate face {f:?}");
  }
}

#[test]
fn test_untouched_grid_is_empty() {
  let grid = Grid::<u16>::with_distance(lattice(8), 16, 1.0, 1.0).unwrap();
  let (mesh, stats) = IsosurfaceExtractor::new(ExtractParams::default())
    .extract_with_stats(&grid, &pool(2))
    .unwrap();
  assert!(mesh.is_empty());
  assert_eq!(stats, ExtractStats::default());
}

#[test]
fn test_sphere_is_closed_and_outward() {
  let grid = sphere_grid(16);
  let mesh = IsosurfaceExtractor::new(ExtractParams::default())
    .extract(&grid, &pool(2))
    .unwrap();

  assert!(mesh.triangle_count() > 100);
  assert_eq!(mesh.boundary_edge_count(), 0);
  assert_eq!(mesh.orientation_defects(), 0);
  assert_no_duplicate_faces(&mesh);

  let exact = 4.0 / 3.0 * std::f64::consts::PI * RADIUS.powi(3);
  let volume = mesh.signed_volume();
  assert!((volume - exact).abs() < exact * 0.05, "volume {volume} vs {exact}");
  for v in &mesh.vertices {
    assert!((v.length() - RADIUS).abs() < 0.25, "vertex at r = {}", v.length());
  }
}

#[test]
fn test_blocks_do_not_change_surface() {
  let grid = sphere_grid(16);
  let single = IsosurfaceExtractor::new(ExtractParams::default().with_block_size(100))
    .extract_with_stats(&grid, &pool(1))
    .unwrap();
  let multi = IsosurfaceExtractor::new(ExtractParams::default().with_block_size(4))
    .extract_with_stats(&grid, &pool(3))
    .unwrap();

  assert_eq!(single.1.blocks, 1);
  assert_eq!(multi.1.blocks, 64);
  assert_eq!(single.1.active_cells, multi.1.active_cells);
  assert_eq!(single.0.vertex_count(), multi.0.vertex_count());
  assert_eq!(single.0.triangle_count(), multi.0.triangle_count());
  assert_eq!(sorted_positions(&single.0), sorted_positions(&multi.0));
  assert_no_duplicate_faces(&multi.0);
  assert_eq!(multi.0.boundary_edge_count(), 0);
}

#[test]
fn test_thread_count_does_not_change_mesh() {
  let grid = sphere_grid(16);
  let extractor = IsosurfaceExtractor::new(ExtractParams::default().with_block_size(5));
  let a = extractor.extract(&grid, &pool(1)).unwrap();
  let b = extractor.extract(&grid, &pool(4)).unwrap();
  assert_eq!(a, b);
}

#[test]
fn test_indicator_interpolation() {
  let grid = sphere_grid(16);
  let linear = IsosurfaceExtractor::new(ExtractParams::default())
    .extract(&grid, &pool(2))
    .unwrap();
  let indicator = IsosurfaceExtractor::new(
    ExtractParams::default().with_interpolation(InterpolationMode::Indicator),
  )
  .extract(&grid, &pool(2))
  .unwrap();

  assert_eq!(indicator.triangle_count(), linear.triangle_count());
  assert_eq!(indicator.boundary_edge_count(), 0);
  assert_ne!(indicator.vertices, linear.vertices);
  for v in &indicator.vertices {
    assert!((v.length() - RADIUS).abs() < 0.6);
  }
}

#[test]
fn test_density_channel() {
  let shape = lattice(16);
  let ch = GridDataChannel::density(8).unwrap();
  let mut grid = Grid::<u8>::new(shape, vec![ch]).unwrap();
  let [nx, ny, nz] = shape.dims();
  for z in 0..nz {
    for y in 0..ny {
      for x in 0..nx {
        let d = sphere_distance(shape.grid_to_world(x, y, z), DVec3::ZERO, RADIUS);
        grid.set_value(&ch, x, y, z, density_from_distance(d, 1.0));
      }
    }
  }

  let mesh = IsosurfaceExtractor::new(ExtractParams::default())
    .extract(&grid, &pool(2))
    .unwrap();
  assert_eq!(mesh.boundary_edge_count(), 0);
  assert!(mesh.signed_volume() > 0.0);
  for v in &mesh.vertices {
    assert!((v.length() - RADIUS).abs() < 0.5);
  }
}

#[test]
fn test_prefilter_keeps_surface_closed() {
  let grid = sphere_grid(16);
  let mesh = IsosurfaceExtractor::new(ExtractParams::default().with_prefilter_width(0.8))
    .extract(&grid, &pool(2))
    .unwrap();
  assert!(!mesh.is_empty());
  assert_eq!(mesh.boundary_edge_count(), 0);
  assert_eq!(mesh.orientation_defects(), 0);
}
