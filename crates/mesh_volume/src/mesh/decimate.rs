//! Error-bounded edge-collapse decimation.
//!
//! Each pass aims at half the current face count and greedily collapses the
//! cheapest edge first (quadric error, ties broken by vertex ids). A pass
//! ends when it reaches its target or when the cheapest remaining candidate
//! exceeds the error bound.
//!
//! A collapse `v2 → v1` is applied only when
//!
//! ```text
//! - neither end lies on a boundary or non-manifold edge
//! - link(v1) ∩ link(v2) == vertices opposite the edge   (stays manifold)
//! - no surviving face flips or degenerates
//! - at least MIN_FACE_COUNT faces remain
//! ```
//!
//! Candidates live in a binary heap with lazy invalidation: every vertex
//! carries a version that bumps when it changes, and popped entries with
//! an outdated version are skipped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::DVec3;
use smallvec::SmallVec;

use super::{IndexedMesh, Quadric};
use crate::constants::{
  DECIMATION_RELAX_FACTOR, DEFAULT_MAX_DECIMATION_ERROR, DEFAULT_MAX_DECIMATION_PASSES,
  MAX_DECIMATION_RELAXATIONS, MIN_FACE_COUNT,
};
use crate::error::Diagnostic;

/// Smallest cosine between a face normal before and after a collapse.
const MIN_NORMAL_COS: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecimateParams {
  /// Largest quadric error a single collapse may introduce (squared world
  /// units).
  pub max_error: f64,
  pub max_passes: usize,
  /// Relax the bound while the mesh still has more faces than this.
  pub max_triangles: Option<usize>,
}

impl Default for DecimateParams {
  fn default() -> Self {
    Self {
      max_error: DEFAULT_MAX_DECIMATION_ERROR,
      max_passes: DEFAULT_MAX_DECIMATION_PASSES,
      max_triangles: None,
    }
  }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecimationReport {
  pub passes: usize,
  pub collapses: usize,
  pub rejected: usize,
  /// Largest error of any applied collapse.
  pub max_error: f64,
  /// Bound in force at the end (after relaxations).
  pub error_bound: f64,
  pub relaxations: usize,
  /// Face count after each pass.
  pub face_counts: Vec<usize>,
  /// `(pass, faces)` of the pass that collapsed nothing.
  pub stalled: Option<(usize, usize)>,
}

impl DecimationReport {
  pub fn diagnostic(&self) -> Option<Diagnostic> {
    self
      .stalled
      .map(|(pass, faces)| Diagnostic::DecimationStalled { pass, faces })
  }
}

#[derive(Clone, Debug)]
pub struct Decimator {
  params: DecimateParams,
}

impl Decimator {
  pub fn new(params: DecimateParams) -> Self {
    Self { params }
  }

  pub fn params(&self) -> &DecimateParams {
    &self.params
  }

  /// Decimate `mesh` in place. A stalled pass leaves the mesh as it was at
  /// that point.
  #[tracing::instrument(skip_all, name = "decimate")]
  pub fn run(&self, mesh: &mut IndexedMesh) -> DecimationReport {
    let mut report = DecimationReport {
      error_bound: self.params.max_error,
      ..Default::default()
    };
    if mesh.faces.len() <= MIN_FACE_COUNT || self.params.max_passes == 0 {
      return report;
    }

    let mut state = CollapseState::new(mesh);
    let mut bound = self.params.max_error;

    for round in 0..=MAX_DECIMATION_RELAXATIONS {
      report.stalled = None;
      for _ in 0..self.params.max_passes {
        let before = state.alive_faces;
        if before <= MIN_FACE_COUNT {
          break;
        }
        let collapsed = state.pass(bound, &mut report);
        report.passes += 1;
        report.face_counts.push(state.alive_faces);
        if collapsed == 0 {
          report.stalled = Some((report.passes, before));
          break;
        }
      }

      let over_budget = self
        .params
        .max_triangles
        .is_some_and(|max| state.alive_faces > max);
      if !over_budget || round == MAX_DECIMATION_RELAXATIONS {
        break;
      }
      bound *= DECIMATION_RELAX_FACTOR;
      report.relaxations += 1;
    }

    report.error_bound = bound;
    *mesh = state.into_mesh();
    tracing::debug!(
      passes = report.passes,
      collapses = report.collapses,
      triangles = mesh.faces.len(),
      "decimated"
    );
    report
  }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
  cost: f64,
  keep: u32,
  remove: u32,
  keep_version: u32,
  remove_version: u32,
  position: DVec3,
}

impl PartialEq for Candidate {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Candidate {
  // Reversed: the heap pops the cheapest, then the lowest vertex pair.
  fn cmp(&self, other: &Self) -> Ordering {
    other
      .cost
      .total_cmp(&self.cost)
      .then_with(|| (other.keep, other.remove).cmp(&(self.keep, self.remove)))
  }
}

enum Outcome {
  Applied,
  Rejected,
  Stale,
}

struct CollapseState {
  positions: Vec<DVec3>,
  faces: Vec<[u32; 3]>,
  face_alive: Vec<bool>,
  vertex_faces: Vec<SmallVec<[u32; 8]>>,
  quadrics: Vec<Quadric>,
  locked: Vec<bool>,
  removed: Vec<bool>,
  version: Vec<u32>,
  alive_faces: usize,
}

impl CollapseState {
  fn new(mesh: &IndexedMesh) -> Self {
    let n = mesh.vertices.len();
    let mut vertex_faces: Vec<SmallVec<[u32; 8]>> = vec![SmallVec::new(); n];
    let mut quadrics = vec![Quadric::default(); n];

    for (f, face) in mesh.faces.iter().enumerate() {
      let tri = mesh.triangle(f);
      let plane = tri.normal().map(|normal| Quadric::from_plane(normal, tri.a));
      for v in face {
        vertex_faces[*v as usize].push(f as u32);
        if let Some(q) = plane {
          quadrics[*v as usize] += q;
        }
      }
    }

    let mut locked = vec![false; n];
    for ((a, b), count) in mesh.edge_face_counts() {
      if count != 2 {
        locked[a as usize] = true;
        locked[b as usize] = true;
      }
    }

    Self {
      positions: mesh.vertices.clone(),
      faces: mesh.faces.clone(),
      face_alive: vec![true; mesh.faces.len()],
      vertex_faces,
      quadrics,
      locked,
      removed: vec![false; n],
      version: vec![0; n],
      alive_faces: mesh.faces.len(),
    }
  }

  /// One pass toward half the current face count. Returns the number of
  /// collapses applied.
  fn pass(&mut self, bound: f64, report: &mut DecimationReport) -> usize {
    let target = (self.alive_faces / 2).max(MIN_FACE_COUNT);
    let mut heap = BinaryHeap::new();
    for (f, face) in self.faces.iter().enumerate() {
      if !self.face_alive[f] {
        continue;
      }
      for k in 0..3 {
        let (a, b) = (face[k], face[(k + 1) % 3]);
        if a < b {
          if let Some(c) = self.candidate(a, b) {
            if c.cost <= bound {
              heap.push(c);
            }
          }
        }
      }
    }

    let mut collapsed = 0;
    while self.alive_faces > target {
      let Some(c) = heap.pop() else {
        break;
      };
      if self.removed[c.keep as usize]
        || self.removed[c.remove as usize]
        || self.version[c.keep as usize] != c.keep_version
        || self.version[c.remove as usize] != c.remove_version
      {
        continue;
      }

      match self.collapse(&c) {
        Outcome::Applied => {
          collapsed += 1;
          report.collapses += 1;
          report.max_error = report.max_error.max(c.cost);
          for n in self.ring(c.keep) {
            let (a, b) = if c.keep < n { (c.keep, n) } else { (n, c.keep) };
            if let Some(next) = self.candidate(a, b) {
              if next.cost <= bound {
                heap.push(next);
              }
            }
          }
        }
        Outcome::Rejected => report.rejected += 1,
        Outcome::Stale => {}
      }
    }
    collapsed
  }

  /// Cheapest placement for collapsing `remove` into `keep`.
  fn candidate(&self, keep: u32, remove: u32) -> Option<Candidate> {
    let (k, r) = (keep as usize, remove as usize);
    if self.locked[k] || self.locked[r] {
      return None;
    }
    let q = self.quadrics[k] + self.quadrics[r];
    let (p1, p2) = (self.positions[k], self.positions[r]);

    let mut best = (q.evaluate(p1), p1);
    let mut consider = |p: DVec3| {
      let cost = q.evaluate(p);
      if cost < best.0 {
        best = (cost, p);
      }
    };
    if let Some(p) = q.optimal_point() {
      consider(p);
    }
    consider(p2);
    consider((p1 + p2) * 0.5);

    Some(Candidate {
      cost: best.0,
      keep,
      remove,
      keep_version: self.version[k],
      remove_version: self.version[r],
      position: best.1,
    })
  }

  /// Distinct vertices sharing a live face with `v`.
  fn ring(&self, v: u32) -> SmallVec<[u32; 16]> {
    let mut out = SmallVec::new();
    for f in &self.vertex_faces[v as usize] {
      for u in self.faces[*f as usize] {
        if u != v && !out.contains(&u) {
          out.push(u);
        }
      }
    }
    out
  }

  fn collapse(&mut self, c: &Candidate) -> Outcome {
    let (keep, remove) = (c.keep, c.remove);

    let shared: SmallVec<[u32; 2]> = self.vertex_faces[remove as usize]
      .iter()
      .copied()
      .filter(|f| self.faces[*f as usize].contains(&keep))
      .collect();
    if shared.is_empty() {
      return Outcome::Stale;
    }
    if self.alive_faces - shared.len() < MIN_FACE_COUNT {
      return Outcome::Rejected;
    }

    // Link condition.
    let opposite: SmallVec<[u32; 2]> = shared
      .iter()
      .filter_map(|f| {
        self.faces[*f as usize]
          .into_iter()
          .find(|u| *u != keep && *u != remove)
      })
      .collect();
    let ring_keep = self.ring(keep);
    let common = self
      .ring(remove)
      .into_iter()
      .filter(|u| ring_keep.contains(u))
      .count();
    if common != opposite.len() || !opposite.iter().all(|u| ring_keep.contains(u)) {
      return Outcome::Rejected;
    }

    // Surviving faces around both ends must keep their orientation.
    for v in [keep, remove] {
      for f in &self.vertex_faces[v as usize] {
        if shared.contains(f) {
          continue;
        }
        let face = self.faces[*f as usize];
        let corner = |u: u32| {
          if u == keep || u == remove {
            c.position
          } else {
            self.positions[u as usize]
          }
        };
        let [a, b, d] = face.map(|u| self.positions[u as usize]);
        let before = (b - a).cross(d - a);
        let [a2, b2, d2] = face.map(corner);
        let after = (b2 - a2).cross(d2 - a2);

        let scale = (b2 - a2)
          .length_squared()
          .max((d2 - b2).length_squared())
          .max((a2 - d2).length_squared());
        if after.length() <= 1.0e-10 * scale {
          return Outcome::Rejected;
        }
        if let (Some(n0), Some(n1)) = (before.try_normalize(), after.try_normalize()) {
          if n0.dot(n1) < MIN_NORMAL_COS {
            return Outcome::Rejected;
          }
        }
      }
    }

    self.positions[keep as usize] = c.position;
    let merged = self.quadrics[remove as usize];
    self.quadrics[keep as usize] += merged;

    for f in &shared {
      self.face_alive[*f as usize] = false;
      for u in self.faces[*f as usize] {
        self.vertex_faces[u as usize].retain(|g| *g != *f);
      }
      self.alive_faces -= 1;
    }

    let moved = std::mem::take(&mut self.vertex_faces[remove as usize]);
    for f in moved {
      for u in self.faces[f as usize].iter_mut() {
        if *u == remove {
          *u = keep;
        }
      }
      self.vertex_faces[keep as usize].push(f);
    }

    self.removed[remove as usize] = true;
    self.version[keep as usize] += 1;
    self.version[remove as usize] += 1;
    Outcome::Applied
  }

  fn into_mesh(self) -> IndexedMesh {
    let faces = self
      .faces
      .into_iter()
      .zip(self.face_alive)
      .filter_map(|(face, alive)| alive.then_some(face))
      .collect();
    let mut mesh = IndexedMesh::from_parts(self.positions, faces);
    mesh.compact();
    mesh
  }
}

#[cfg(test)]
#[path = "decimate_test.rs"]
mod decimate_test;
