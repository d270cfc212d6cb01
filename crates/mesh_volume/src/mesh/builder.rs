//! Output mesh assembly.
//!
//! Triangles arrive either as raw positions (merged through a [`PointMap`])
//! or as keyed vertices whose identity is already known, as the extractor
//! produces them. Triangles that collapse onto fewer than three distinct
//! vertices are dropped.

use std::collections::HashMap;

use glam::DVec3;

use super::{IndexedMesh, PointMap};
use crate::source::TriangleSink;

pub struct MeshBuilder {
  points: PointMap,
  keyed: HashMap<u64, u32>,
  vertices: Vec<DVec3>,
  faces: Vec<[u32; 3]>,
  dropped: usize,
}

impl MeshBuilder {
  pub fn new(epsilon: f64) -> Self {
    Self {
      points: PointMap::new(epsilon),
      keyed: HashMap::new(),
      vertices: Vec::new(),
      faces: Vec::new(),
      dropped: 0,
    }
  }

  /// Reserve room for roughly `triangles` more faces.
  pub fn reserve(&mut self, triangles: usize) {
    self.faces.reserve(triangles);
    self.vertices.reserve(triangles / 2);
    self.keyed.reserve(triangles / 2);
  }

  /// Vertex id for a raw position.
  pub fn vertex(&mut self, p: DVec3) -> u32 {
    let next = self.vertices.len() as u32;
    let (id, inserted) = self.points.get_or_insert(p, next);
    if inserted {
      self.vertices.push(p);
    }
    id
  }

  /// Vertex id for a keyed position. The first position seen for a key
  /// is kept.
  pub fn keyed_vertex(&mut self, key: u64, p: DVec3) -> u32 {
    let next = self.vertices.len() as u32;
    let id = *self.keyed.entry(key).or_insert(next);
    if id == next {
      self.vertices.push(p);
    }
    id
  }

  /// Append a face over existing vertex ids.
  pub fn push_face(&mut self, face: [u32; 3]) {
    if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
      self.dropped += 1;
    } else {
      self.faces.push(face);
    }
  }

  #[inline]
  pub fn triangle_count(&self) -> usize {
    self.faces.len()
  }

  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  /// Triangles rejected for repeating a vertex.
  #[inline]
  pub fn dropped_count(&self) -> usize {
    self.dropped
  }

  pub fn finish(self) -> IndexedMesh {
    IndexedMesh::from_parts(self.vertices, self.faces)
  }
}

impl TriangleSink for MeshBuilder {
  fn add_triangle(&mut self, a: DVec3, b: DVec3, c: DVec3) {
    let face = [self.vertex(a), self.vertex(b), self.vertex(c)];
    self.push_face(face);
  }
}
