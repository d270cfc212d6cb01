//! Bounded Laplacian smoothing.
//!
//! Each iteration moves every interior vertex a fraction `lambda` toward
//! the centroid of its edge neighbours (umbrella operator):
//!
//! ```text
//! L(v)  = (1/|N(v)|) Σ n  −  v
//! v'    = v + λ L(v)
//! ```
//!
//! Boundary vertices stay fixed, and no vertex ever ends up farther than
//! `max_displacement` from where it started.

use glam::DVec3;
use rayon::prelude::*;
use smallvec::SmallVec;

use super::IndexedMesh;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothParams {
  pub iterations: usize,
  pub lambda: f64,
  /// Cap on the total distance any vertex may travel (world units).
  pub max_displacement: f64,
}

impl Default for SmoothParams {
  fn default() -> Self {
    Self {
      iterations: 1,
      lambda: 0.5,
      max_displacement: f64::INFINITY,
    }
  }
}

impl SmoothParams {
  /// Parameters for a smoothing width in voxels: one iteration per half
  /// voxel of width, displacement capped at half the width.
  pub fn for_width(width_voxels: f64, voxel_size: f64) -> Self {
    Self {
      iterations: (width_voxels * 2.0).ceil().max(0.0) as usize,
      lambda: 0.5,
      max_displacement: width_voxels * voxel_size * 0.5,
    }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothStats {
  pub iterations: usize,
  /// Vertices that never move.
  pub fixed_vertices: usize,
  /// Largest final displacement of any vertex.
  pub max_shift: f64,
}

/// Smooth `mesh` in place.
#[tracing::instrument(skip_all, name = "smooth")]
pub fn laplacian_smooth(mesh: &mut IndexedMesh, params: &SmoothParams) -> SmoothStats {
  let mut stats = SmoothStats::default();
  if mesh.is_empty() || params.iterations == 0 || params.lambda == 0.0 {
    return stats;
  }

  let (neighbors, fixed) = vertex_rings(mesh);
  stats.fixed_vertices = fixed.iter().filter(|f| **f).count();

  let origin = mesh.vertices.clone();
  let max_sq = params.max_displacement * params.max_displacement;
  let mut next = mesh.vertices.clone();

  for _ in 0..params.iterations {
    let current = &mesh.vertices;
    next
      .par_iter_mut()
      .enumerate()
      .for_each(|(v, out)| {
        let ring = &neighbors[v];
        if fixed[v] || ring.is_empty() {
          *out = current[v];
          return;
        }
        let centroid = ring
          .iter()
          .fold(DVec3::ZERO, |acc, n| acc + current[*n as usize])
          / ring.len() as f64;
        let moved = current[v] + (centroid - current[v]) * params.lambda;
        let shift = moved - origin[v];
        *out = if shift.length_squared() > max_sq {
          origin[v] + shift.normalize_or_zero() * params.max_displacement
        } else {
          moved
        };
      });
    std::mem::swap(&mut mesh.vertices, &mut next);
    stats.iterations += 1;
  }

  stats.max_shift = mesh
    .vertices
    .iter()
    .zip(&origin)
    .map(|(a, b)| a.distance(*b))
    .fold(0.0, f64::max);
  stats
}

/// Edge neighbours of every vertex and whether it lies on a boundary edge.
fn vertex_rings(mesh: &IndexedMesh) -> (Vec<SmallVec<[u32; 8]>>, Vec<bool>) {
  let mut neighbors: Vec<SmallVec<[u32; 8]>> = vec![SmallVec::new(); mesh.vertices.len()];
  for face in &mesh.faces {
    for k in 0..3 {
      let (a, b) = (face[k], face[(k + 1) % 3]);
      if !neighbors[a as usize].contains(&b) {
        neighbors[a as usize].push(b);
      }
      if !neighbors[b as usize].contains(&a) {
        neighbors[b as usize].push(a);
      }
    }
  }

  let mut fixed = vec![false; mesh.vertices.len()];
  for ((a, b), count) in mesh.edge_face_counts() {
    if count != 2 {
      fixed[a as usize] = true;
      fixed[b as usize] = true;
    }
  }
  (neighbors, fixed)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::shapes;

  #[test]
  fn test_open_patch_boundary_fixed() {
    // Fan around a raised center vertex; rim is boundary.
    let mut mesh = IndexedMesh::from_parts(
      vec![
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(-1.0, 0.0, 0.0),
        DVec3::new(0.0, -1.0, 0.0),
      ],
      vec![[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 1]],
    );
    let rim = mesh.vertices[1..].to_vec();
    let stats = laplacian_smooth(&mut mesh, &SmoothParams::default());
    assert_eq!(stats.fixed_vertices, 4);
    assert_eq!(&mesh.vertices[1..], &rim[..]);
    assert!((mesh.vertices[0].z - 0.5).abs() < 1e-12);
  }

  #[test]
  fn test_displacement_is_clamped() {
    let mut mesh = shapes::icosphere(DVec3::ZERO, 1.0, 1);
    let before = mesh.vertices.clone();
    let params = SmoothParams {
      iterations: 20,
      lambda: 0.9,
      max_displacement: 0.01,
    };
    let stats = laplacian_smooth(&mut mesh, &params);
    assert_eq!(stats.iterations, 20);
    assert!(stats.max_shift <= 0.01 + 1e-12);
    for (a, b) in mesh.vertices.iter().zip(&before) {
      assert!(a.distance(*b) <= 0.01 + 1e-12);
    }
  }

  #[test]
  fn test_zero_iterations_is_noop() {
    let mut mesh = shapes::icosphere(DVec3::ZERO, 1.0, 0);
    let before = mesh.clone();
    let params = SmoothParams::for_width(0.0, 1.0);
    assert_eq!(laplacian_smooth(&mut mesh, &params).iterations, 0);
    assert_eq!(mesh, before);
  }
}
