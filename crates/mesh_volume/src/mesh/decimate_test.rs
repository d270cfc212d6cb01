use glam::DVec3;

use super::*;
use crate::shapes;

/// Flat `n × n` quad patch in the z = 0 plane.
fn plane(n: usize) -> IndexedMesh {
  let mut vertices = Vec::new();
  for y in 0..=n {
    for x in 0..=n {
      vertices.push(DVec3::new(x as f64, y as f64, 0.0));
    }
  }
  let id = |x: usize, y: usize| (x + y * (n + 1)) as u32;
  let mut faces = Vec::new();
  for y in 0..n {
    for x in 0..n {
      faces.push([id(x, y), id(x + 1, y), id(x + 1, y + 1)]);
      faces.push([id(x, y), id(x + 1, y + 1), id(x, y + 1)]);
    }
  }
  IndexedMesh::from_parts(vertices, faces)
}

#[test]
fn test_sphere_respects_error_bound() {
  let mut mesh = shapes::icosphere(DVec3::ZERO, 1.0, 3);
  let start = mesh.triangle_count();
  let params = DecimateParams {
    max_error: 1e-3,
    max_passes: 7,
    max_triangles: None,
  };
  let report = Decimator::new(params).run(&mut mesh);

  assert!(report.collapses > 0);
  assert!(report.max_error <= params.max_error);
  assert!(mesh.triangle_count() < start);
  assert!(mesh.triangle_count() >= MIN_FACE_COUNT);
  assert_eq!(mesh.boundary_edge_count(), 0);
  assert_eq!(mesh.orientation_defects(), 0);
  assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn test_original_vertices_stay_within_error_bound() {
  let original = shapes::icosphere(DVec3::ZERO, 1.0, 3);
  let mut mesh = original.clone();
  let params = DecimateParams {
    max_error: 1e-3,
    max_passes: 7,
    max_triangles: None,
  };
  let report = Decimator::new(params).run(&mut mesh);
  assert!(report.collapses > 0);

  let faces: Vec<_> = mesh.triangles().collect();
  for v in &original.vertices {
    let d2 = faces
      .iter()
      .map(|t| t.closest_point(*v).0.distance_squared(*v))
      .fold(f64::INFINITY, f64::min);
    assert!(d2 <= params.max_error, "vertex {v}: squared distance {d2}");
  }
}

#[test]
fn test_face_counts_non_increasing() {
  let mut mesh = shapes::icosphere(DVec3::ZERO, 1.0, 3);
  let report = Decimator::new(DecimateParams {
    max_error: 1.0,
    max_passes: 7,
    max_triangles: None,
  })
  .run(&mut mesh);

  assert!(!report.face_counts.is_empty());
  let mut prev = 1280;
  for count in &report.face_counts {
    assert!(*count <= prev);
    assert!(*count >= MIN_FACE_COUNT);
    prev = *count;
  }
  assert_eq!(*report.face_counts.last().unwrap(), mesh.triangle_count());
}

#[test]
fn test_zero_error_on_box_stalls() {
  let mut mesh = shapes::axis_box(DVec3::ZERO, DVec3::ONE);
  let before = mesh.clone();
  let report = Decimator::new(DecimateParams {
    max_error: 0.0,
    max_passes: 3,
    max_triangles: None,
  })
  .run(&mut mesh);

  assert_eq!(report.collapses, 0);
  assert_eq!(report.stalled, Some((1, 12)));
  assert!(matches!(
    report.diagnostic(),
    Some(Diagnostic::DecimationStalled { pass: 1, faces: 12 })
  ));
  assert_eq!(mesh.triangle_count(), before.triangle_count());
}

#[test]
fn test_flat_patch_keeps_boundary() {
  let mut mesh = plane(5);
  let boundary = mesh.boundary_edge_count();
  let report = Decimator::new(DecimateParams {
    max_error: 1e-12,
    max_passes: 4,
    max_triangles: None,
  })
  .run(&mut mesh);

  assert!(report.collapses > 0);
  assert!(mesh.triangle_count() < 50);
  assert_eq!(mesh.boundary_edge_count(), boundary);
  assert_eq!(mesh.non_manifold_edge_count(), 0);
  for t in mesh.triangles() {
    assert!(t.cross().z > 0.0, "face flipped or degenerate");
  }
  // Corners never move.
  for corner in [DVec3::ZERO, DVec3::new(5.0, 0.0, 0.0), DVec3::new(5.0, 5.0, 0.0)] {
    assert!(mesh.vertices.contains(&corner));
  }
}

#[test]
fn test_relaxation_raises_bound() {
  let mut mesh = shapes::icosphere(DVec3::ZERO, 1.0, 2);
  let report = Decimator::new(DecimateParams {
    max_error: 1e-14,
    max_passes: 2,
    max_triangles: Some(10),
  })
  .run(&mut mesh);

  assert_eq!(report.relaxations, MAX_DECIMATION_RELAXATIONS);
  let expected = 1e-14 * DECIMATION_RELAX_FACTOR.powi(MAX_DECIMATION_RELAXATIONS as i32);
  assert!((report.error_bound - expected).abs() <= expected * 1e-9);
  assert!(report.max_error <= report.error_bound);
}

#[test]
fn test_tiny_mesh_untouched() {
  let mut mesh = shapes::icosphere(DVec3::ZERO, 1.0, 0);
  let mut tetra = IndexedMesh::from_parts(
    vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z],
    vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
  );
  let report = Decimator::new(DecimateParams::default()).run(&mut tetra);
  assert_eq!(report.passes, 0);
  assert_eq!(tetra.triangle_count(), 4);

  let report = Decimator::new(DecimateParams {
    max_passes: 0,
    ..Default::default()
  })
  .run(&mut mesh);
  assert_eq!(report.passes, 0);
  assert_eq!(mesh.triangle_count(), 20);
}
