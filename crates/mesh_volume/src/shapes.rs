//! Closed test shapes with known distance fields.
//!
//! Deterministic meshes for tests, benches and callers that want a
//! watertight input without a file reader.

use std::collections::HashMap;

use glam::DVec3;

use crate::mesh::IndexedMesh;

/// Golden ratio; icosahedron vertices sit at `(0, ±1, ±φ)` and rotations.
const PHI: f64 = 1.618_033_988_749_895;

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
  [0, 11, 5],
  [0, 5, 1],
  [0, 1, 7],
  [0, 7, 10],
  [0, 10, 11],
  [1, 5, 9],
  [5, 11, 4],
  [11, 10, 2],
  [10, 7, 6],
  [7, 1, 8],
  [3, 9, 4],
  [3, 4, 2],
  [3, 2, 6],
  [3, 6, 8],
  [3, 8, 9],
  [4, 9, 5],
  [2, 4, 11],
  [6, 2, 10],
  [8, 6, 7],
  [9, 8, 1],
];

/// Sphere approximated by a subdivided icosahedron, outward winding.
///
/// Face count is `20 * 4^subdivisions`; every vertex lies on the sphere.
pub fn icosphere(center: DVec3, radius: f64, subdivisions: u32) -> IndexedMesh {
  let mut unit: Vec<DVec3> = [
    (-1.0, PHI, 0.0),
    (1.0, PHI, 0.0),
    (-1.0, -PHI, 0.0),
    (1.0, -PHI, 0.0),
    (0.0, -1.0, PHI),
    (0.0, 1.0, PHI),
    (0.0, -1.0, -PHI),
    (0.0, 1.0, -PHI),
    (PHI, 0.0, -1.0),
    (PHI, 0.0, 1.0),
    (-PHI, 0.0, -1.0),
    (-PHI, 0.0, 1.0),
  ]
  .iter()
  .map(|(x, y, z)| DVec3::new(*x, *y, *z).normalize())
  .collect();
  let mut faces = ICOSAHEDRON_FACES.to_vec();

  for _ in 0..subdivisions {
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::with_capacity(faces.len() * 3 / 2);
    let mut next = Vec::with_capacity(faces.len() * 4);
    for [a, b, c] in faces {
      let ab = midpoint(&mut unit, &mut midpoints, a, b);
      let bc = midpoint(&mut unit, &mut midpoints, b, c);
      let ca = midpoint(&mut unit, &mut midpoints, c, a);
      next.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
    }
    faces = next;
  }

  let vertices = unit.into_iter().map(|v| center + v * radius).collect();
  IndexedMesh::from_parts(vertices, faces)
}

fn midpoint(
  vertices: &mut Vec<DVec3>,
  cache: &mut HashMap<(u32, u32), u32>,
  a: u32,
  b: u32,
) -> u32 {
  let key = if a < b { (a, b) } else { (b, a) };
  *cache.entry(key).or_insert_with(|| {
    let p = (vertices[a as usize] + vertices[b as usize]).normalize();
    vertices.push(p);
    (vertices.len() - 1) as u32
  })
}

/// Axis-aligned box with two triangles per side, outward winding.
pub fn axis_box(min: DVec3, max: DVec3) -> IndexedMesh {
  let vertices = (0..8)
    .map(|i| {
      DVec3::new(
        if i & 1 == 0 { min.x } else { max.x },
        if i & 2 == 0 { min.y } else { max.y },
        if i & 4 == 0 { min.z } else { max.z },
      )
    })
    .collect();
  let faces = vec![
    [0, 4, 6],
    [0, 6, 2],
    [1, 3, 7],
    [1, 7, 5],
    [0, 1, 5],
    [0, 5, 4],
    [2, 6, 7],
    [2, 7, 3],
    [0, 2, 3],
    [0, 3, 1],
    [4, 5, 7],
    [4, 7, 6],
  ];
  IndexedMesh::from_parts(vertices, faces)
}

/// Same surface with every face reversed, turning a solid into a cavity.
pub fn inverted(mut mesh: IndexedMesh) -> IndexedMesh {
  for face in &mut mesh.faces {
    face.swap(1, 2);
  }
  mesh
}

/// Exact signed distance to a sphere.
#[inline]
pub fn sphere_distance(p: DVec3, center: DVec3, radius: f64) -> f64 {
  p.distance(center) - radius
}

/// Exact signed distance to an axis-aligned box.
pub fn box_distance(p: DVec3, min: DVec3, max: DVec3) -> f64 {
  let center = (min + max) * 0.5;
  let half = (max - min) * 0.5;
  let q = (p - center).abs() - half;
  q.max(DVec3::ZERO).length() + q.max_element().min(0.0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_icosphere_counts() {
    for (sub, faces) in [(0, 20), (1, 80), (2, 320), (3, 1280)] {
      let mesh = icosphere(DVec3::ZERO, 1.0, sub);
      assert_eq!(mesh.triangle_count(), faces);
      assert_eq!(mesh.vertex_count(), faces / 2 + 2);
      assert!(mesh.is_closed());
      assert_eq!(mesh.orientation_defects(), 0);
    }
  }

  #[test]
  fn test_icosphere_on_sphere() {
    let c = DVec3::new(1.0, -2.0, 0.5);
    let mesh = icosphere(c, 0.05, 2);
    for v in &mesh.vertices {
      assert!(sphere_distance(*v, c, 0.05).abs() < 1e-12);
    }
    assert!(mesh.signed_volume() > 0.0);
  }

  #[test]
  fn test_axis_box() {
    let mesh = axis_box(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0));
    assert!(mesh.is_closed());
    assert_eq!(mesh.orientation_defects(), 0);
    assert!((mesh.signed_volume() - 6.0).abs() < 1e-12);
    assert!((mesh.surface_area() - 22.0).abs() < 1e-12);
  }

  #[test]
  fn test_inverted_volume_is_negative() {
    let mesh = inverted(axis_box(DVec3::ZERO, DVec3::ONE));
    assert!((mesh.signed_volume() + 1.0).abs() < 1e-12);
  }

  #[test]
  fn test_box_distance() {
    let (lo, hi) = (DVec3::ZERO, DVec3::ONE);
    assert!((box_distance(DVec3::splat(0.5), lo, hi) + 0.5).abs() < 1e-12);
    assert!((box_distance(DVec3::new(2.0, 0.5, 0.5), lo, hi) - 1.0).abs() < 1e-12);
  }
}
