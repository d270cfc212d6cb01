//! Per-worker sparse distance buffers.

use std::collections::HashMap;

/// Signed distance offered to a voxel by one triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contribution {
  pub distance: f64,
  /// Index of the triangle in source order.
  pub triangle: u32,
}

impl Contribution {
  /// Closest-wins: strictly smaller magnitude, or equal magnitude from an
  /// earlier triangle.
  #[inline]
  pub fn beats(&self, other: &Contribution) -> bool {
    let (a, b) = (self.distance.abs(), other.distance.abs());
    a < b || (a == b && self.triangle < other.triangle)
  }
}

/// Voxel index → best contribution seen by one worker.
#[derive(Debug, Default)]
pub(crate) struct SparseAccumulator {
  pub(crate) cells: HashMap<usize, Contribution>,
  pub(crate) offers: usize,
  pub(crate) degenerate: usize,
  pub(crate) triangles: usize,
}

impl SparseAccumulator {
  #[inline]
  pub(crate) fn offer(&mut self, index: usize, c: Contribution) {
    self.offers += 1;
    self
      .cells
      .entry(index)
      .and_modify(|cur| {
        if c.beats(cur) {
          *cur = c;
        }
      })
      .or_insert(c);
  }

  /// Merge two buffers with the same rule. The result does not depend on
  /// which side is larger or on merge order.
  pub(crate) fn merge(mut self, mut other: SparseAccumulator) -> SparseAccumulator {
    if other.cells.len() > self.cells.len() {
      std::mem::swap(&mut self, &mut other);
    }
    for (index, c) in other.cells {
      self
        .cells
        .entry(index)
        .and_modify(|cur| {
          if c.beats(cur) {
            *cur = c;
          }
        })
        .or_insert(c);
    }
    self.offers += other.offers;
    self.degenerate += other.degenerate;
    self.triangles += other.triangles;
    self
  }
}
