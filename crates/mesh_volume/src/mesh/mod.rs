//! Indexed triangle meshes and the post-extraction mesh stages.
//!
//! ```text
//! extract ──► MeshBuilder ──► IndexedMesh ──► smooth ──► decimate ──► sink
//!              (dedup)                        (optional)  (optional)
//! ```

mod builder;
mod decimate;
mod point_map;
mod quadric;
mod smooth;

use std::collections::HashMap;

use glam::DVec3;

pub use builder::MeshBuilder;
pub use decimate::{DecimateParams, DecimationReport, Decimator};
pub use point_map::PointMap;
pub use quadric::Quadric;
pub use smooth::{laplacian_smooth, SmoothParams, SmoothStats};

use crate::bounds::Bounds;
use crate::geometry::Triangle;
use crate::source::TriangleSink;

/// Shared-vertex triangle mesh. Faces wind counter-clockwise seen from
/// outside.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexedMesh {
  pub vertices: Vec<DVec3>,
  pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_parts(vertices: Vec<DVec3>, faces: Vec<[u32; 3]>) -> Self {
    Self { vertices, faces }
  }

  /// Index a triangle soup, merging corners closer than `epsilon`.
  pub fn from_triangles<I: IntoIterator<Item = Triangle>>(triangles: I, epsilon: f64) -> Self {
    let mut builder = MeshBuilder::new(epsilon);
    for t in triangles {
      builder.add_triangle(t.a, t.b, t.c);
    }
    builder.finish()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.faces.is_empty()
  }

  #[inline]
  pub fn triangle_count(&self) -> usize {
    self.faces.len()
  }

  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  /// Geometry of face `i`.
  #[inline]
  pub fn triangle(&self, i: usize) -> Triangle {
    let [a, b, c] = self.faces[i];
    Triangle::new(
      self.vertices[a as usize],
      self.vertices[b as usize],
      self.vertices[c as usize],
    )
  }

  /// Faces as a triangle stream, usable as a rasterizer source.
  pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
    (0..self.faces.len()).map(move |i| self.triangle(i))
  }

  /// Push every face into a consumer.
  pub fn emit<S: TriangleSink + ?Sized>(&self, sink: &mut S) {
    for t in self.triangles() {
      sink.add_triangle(t.a, t.b, t.c);
    }
  }

  /// Bounds of the referenced vertices, `None` for an empty mesh.
  pub fn bounds(&self) -> Option<Bounds> {
    if self.faces.is_empty() {
      return None;
    }
    let mut b = Bounds::empty();
    for face in &self.faces {
      for v in face {
        b.encapsulate(self.vertices[*v as usize]);
      }
    }
    Some(b)
  }

  /// Faces incident to every undirected edge, keyed `(low, high)`.
  pub fn edge_face_counts(&self) -> HashMap<(u32, u32), u32> {
    let mut counts = HashMap::with_capacity(self.faces.len() * 3 / 2);
    for face in &self.faces {
      for k in 0..3 {
        *counts.entry(edge_key(face[k], face[(k + 1) % 3])).or_insert(0) += 1;
      }
    }
    counts
  }

  /// Edges used by exactly one face.
  pub fn boundary_edge_count(&self) -> usize {
    self.edge_face_counts().values().filter(|n| **n == 1).count()
  }

  /// Edges used by more than two faces.
  pub fn non_manifold_edge_count(&self) -> usize {
    self.edge_face_counts().values().filter(|n| **n > 2).count()
  }

  /// Non-empty, no boundary edges, every edge shared by exactly two faces.
  pub fn is_closed(&self) -> bool {
    !self.faces.is_empty() && self.edge_face_counts().values().all(|n| *n == 2)
  }

  /// Number of directed edges whose reverse is not present exactly once.
  /// Zero for a closed, consistently oriented mesh.
  pub fn orientation_defects(&self) -> usize {
    let mut directed: HashMap<(u32, u32), u32> = HashMap::with_capacity(self.faces.len() * 3);
    for face in &self.faces {
      for k in 0..3 {
        *directed.entry((face[k], face[(k + 1) % 3])).or_insert(0) += 1;
      }
    }
    directed
      .iter()
      .filter(|((a, b), n)| **n != 1 || directed.get(&(*b, *a)) != Some(&1))
      .count()
  }

  /// Signed enclosed volume, positive for outward winding.
  pub fn signed_volume(&self) -> f64 {
    self
      .triangles()
      .map(|t| t.a.dot(t.b.cross(t.c)))
      .sum::<f64>()
      / 6.0
  }

  pub fn surface_area(&self) -> f64 {
    self.triangles().map(|t| t.area()).sum()
  }

  /// Drop vertices no face references, keeping relative order.
  pub fn compact(&mut self) {
    let mut remap = vec![u32::MAX; self.vertices.len()];
    let mut vertices = Vec::with_capacity(self.vertices.len());
    for face in &mut self.faces {
      for v in face.iter_mut() {
        let slot = &mut remap[*v as usize];
        if *slot == u32::MAX {
          *slot = vertices.len() as u32;
          vertices.push(self.vertices[*v as usize]);
        }
        *v = *slot;
      }
    }
    self.vertices = vertices;
  }
}

impl TriangleSink for IndexedMesh {
  /// Appends three unshared vertices.
  fn add_triangle(&mut self, a: DVec3, b: DVec3, c: DVec3) {
    let base = self.vertices.len() as u32;
    self.vertices.extend([a, b, c]);
    self.faces.push([base, base + 1, base + 2]);
  }
}

#[inline]
pub(crate) fn edge_key(a: u32, b: u32) -> (u32, u32) {
  if a < b {
    (a, b)
  } else {
    (b, a)
  }
}
