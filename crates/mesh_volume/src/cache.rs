//! Explicit cache of rasterized grids.
//!
//! Owned by the caller and passed into the pipeline; there is no global
//! state. Entries are keyed by a hash of everything that shapes the grid:
//! the rasterization options and the exact input coordinates.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::config::ConversionConfig;
use crate::geometry::Triangle;
use crate::grid::{Grid, Word};

/// Identity of one rasterization job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
  /// Hash the grid-affecting options of `config` and every vertex of
  /// `triangles` bit for bit.
  pub fn new(config: &ConversionConfig, triangles: &[Triangle]) -> Self {
    let mut h = DefaultHasher::new();
    config.voxel_size.to_bits().hash(&mut h);
    config.max_in_distance.to_bits().hash(&mut h);
    config.max_out_distance.to_bits().hash(&mut h);
    config.bits.hash(&mut h);
    config.padding.to_bits().hash(&mut h);
    config.max_grid_cells.hash(&mut h);
    config.sign_smoothing_iterations.hash(&mut h);
    config.sign_neighborhood.hash(&mut h);
    config.max_propagation_distance.hash(&mut h);

    triangles.len().hash(&mut h);
    for tri in triangles {
      for p in [tri.a, tri.b, tri.c] {
        p.to_array().map(f64::to_bits).hash(&mut h);
      }
    }
    Self(h.finish())
  }

  pub fn value(self) -> u64 {
    self.0
  }
}

/// Grids shared out as `Arc`s so callers can hold them past eviction.
#[derive(Debug)]
pub struct GridCache<W: Word> {
  entries: HashMap<CacheKey, Arc<Grid<W>>>,
  hits: u64,
  misses: u64,
}

impl<W: Word> Default for GridCache<W> {
  fn default() -> Self {
    Self {
      entries: HashMap::new(),
      hits: 0,
      misses: 0,
    }
  }
}

impl<W: Word> GridCache<W> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&mut self, key: &CacheKey) -> Option<Arc<Grid<W>>> {
    match self.entries.get(key) {
      Some(grid) => {
        self.hits += 1;
        Some(Arc::clone(grid))
      }
      None => {
        self.misses += 1;
        None
      }
    }
  }

  /// Store `grid` under `key`, replacing any previous entry.
  pub fn insert(&mut self, key: CacheKey, grid: Grid<W>) -> Arc<Grid<W>> {
    let grid = Arc::new(grid);
    self.entries.insert(key, Arc::clone(&grid));
    grid
  }

  /// Drop one entry. Returns whether it was present.
  pub fn invalidate(&mut self, key: &CacheKey) -> bool {
    self.entries.remove(key).is_some()
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn contains(&self, key: &CacheKey) -> bool {
    self.entries.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn hits(&self) -> u64 {
    self.hits
  }

  pub fn misses(&self) -> u64 {
    self.misses
  }
}
