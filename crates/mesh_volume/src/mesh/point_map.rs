//! Epsilon-tolerant point deduplication.
//!
//! Points hash into cubic cells of edge `epsilon`. A lookup scans the 27
//! cells around the query, so two points within `epsilon` of each other
//! always meet even when they straddle a cell face.

use std::collections::HashMap;

use glam::DVec3;
use smallvec::SmallVec;

/// Smallest cell edge; keeps cell coordinates finite for tiny tolerances.
const MIN_CELL: f64 = 1.0e-12;

/// Spatial hash from positions to dense ids.
#[derive(Clone, Debug)]
pub struct PointMap {
  epsilon: f64,
  inv_cell: f64,
  cells: HashMap<[i64; 3], SmallVec<[(DVec3, u32); 2]>>,
  len: usize,
}

impl PointMap {
  pub fn new(epsilon: f64) -> Self {
    let epsilon = epsilon.max(0.0);
    Self {
      epsilon,
      inv_cell: 1.0 / epsilon.max(MIN_CELL),
      cells: HashMap::new(),
      len: 0,
    }
  }

  #[inline]
  pub fn epsilon(&self) -> f64 {
    self.epsilon
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  #[inline]
  fn cell(&self, p: DVec3) -> [i64; 3] {
    let c = (p * self.inv_cell).floor();
    [c.x as i64, c.y as i64, c.z as i64]
  }

  /// Id of a stored point within `epsilon` of `p`. The closest one wins;
  /// equal distances go to the smaller id.
  pub fn get(&self, p: DVec3) -> Option<u32> {
    let [cx, cy, cz] = self.cell(p);
    let eps_sq = self.epsilon * self.epsilon;
    let mut best: Option<(f64, u32)> = None;
    for dz in -1..=1 {
      for dy in -1..=1 {
        for dx in -1..=1 {
          let Some(bucket) = self.cells.get(&[cx + dx, cy + dy, cz + dz]) else {
            continue;
          };
          for (q, id) in bucket {
            let d = q.distance_squared(p);
            if d > eps_sq {
              continue;
            }
            let better = match best {
              None => true,
              Some((bd, bid)) => d < bd || (d == bd && *id < bid),
            };
            if better {
              best = Some((d, *id));
            }
          }
        }
      }
    }
    best.map(|(_, id)| id)
  }

  /// Record `p` under `id` without checking for neighbours.
  pub fn insert(&mut self, p: DVec3, id: u32) {
    let key = self.cell(p);
    self.cells.entry(key).or_default().push((p, id));
    self.len += 1;
  }

  /// Existing id near `p`, or `next_id` after storing `p` under it.
  /// Returns the id and whether it was newly inserted.
  pub fn get_or_insert(&mut self, p: DVec3, next_id: u32) -> (u32, bool) {
    match self.get(p) {
      Some(id) => (id, false),
      None => {
        self.insert(p, next_id);
        (next_id, true)
      }
    }
  }

  pub fn clear(&mut self) {
    self.cells.clear();
    self.len = 0;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_merges_within_epsilon() {
    let mut map = PointMap::new(1e-3);
    assert_eq!(map.get_or_insert(DVec3::new(1.0, 2.0, 3.0), 0), (0, true));
    assert_eq!(
      map.get_or_insert(DVec3::new(1.0005, 2.0, 3.0), 1),
      (0, false)
    );
    assert_eq!(map.get_or_insert(DVec3::new(1.01, 2.0, 3.0), 1), (1, true));
    assert_eq!(map.len(), 2);
  }

  #[test]
  fn test_merges_across_cell_faces() {
    // 0.9999e-3 and 1.0001e-3 land in different cells.
    let mut map = PointMap::new(1e-3);
    map.insert(DVec3::new(0.9999e-3, 0.0, 0.0), 7);
    assert_eq!(map.get(DVec3::new(1.0001e-3, 0.0, 0.0)), Some(7));
  }

  #[test]
  fn test_closest_wins() {
    let mut map = PointMap::new(1.0);
    map.insert(DVec3::new(0.5, 0.0, 0.0), 0);
    map.insert(DVec3::new(0.1, 0.0, 0.0), 1);
    assert_eq!(map.get(DVec3::ZERO), Some(1));
  }

  #[test]
  fn test_zero_epsilon_is_exact() {
    let mut map = PointMap::new(0.0);
    map.insert(DVec3::new(0.25, 0.5, 0.75), 3);
    assert_eq!(map.get(DVec3::new(0.25, 0.5, 0.75)), Some(3));
    assert_eq!(map.get(DVec3::new(0.25, 0.5, 0.7500001)), None);
  }
}
