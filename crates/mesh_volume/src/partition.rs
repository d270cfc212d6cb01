//! Worker pool and work decomposition.
//!
//! Every parallel phase runs inside one dedicated rayon pool so a job's
//! thread count is independent of the global pool:
//!
//! ```text
//! rasterize:  triangles [0, n) ──► ranges ──► per-worker buffers ──► merge
//! extract:    cells            ──► blocks ──► per-block patches  ──► merge
//! ```
//!
//! Both decompositions depend only on their inputs, never on the thread
//! count, so results are identical however many workers run.

use std::ops::Range;
use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::bounds::GridShape;
use crate::error::{Result, VolumeError};

/// Triangles per rasterizer work item.
const TRIANGLES_PER_RANGE: usize = 256;

/// Fixed-size worker pool shared by the phases of a job.
#[derive(Clone)]
pub struct WorkPartitioner {
  pool: Arc<ThreadPool>,
}

impl WorkPartitioner {
  /// Pool with `threads` workers; 0 picks the available parallelism.
  pub fn new(threads: usize) -> Result<Self> {
    let threads = if threads == 0 {
      std::thread::available_parallelism().map_or(1, |n| n.get())
    } else {
      threads
    };
    let pool = ThreadPoolBuilder::new()
      .num_threads(threads)
      .thread_name(|i| format!("mesh-volume-{i}"))
      .build()
      .map_err(|e| VolumeError::InvalidConfig(format!("thread pool: {e}")))?;
    Ok(Self { pool: Arc::new(pool) })
  }

  /// Worker count.
  pub fn threads(&self) -> usize {
    self.pool.current_num_threads()
  }

  /// Run `op` inside the pool; rayon iterators within it use these workers.
  pub fn install<OP, R>(&self, op: OP) -> R
  where
    OP: FnOnce() -> R + Send,
    R: Send,
  {
    self.pool.install(op)
  }

  /// Contiguous triangle index ranges covering `[0, count)`.
  pub fn triangle_ranges(&self, count: usize) -> Vec<Range<usize>> {
    (0..count)
      .step_by(TRIANGLES_PER_RANGE)
      .map(|start| start..(start + TRIANGLES_PER_RANGE).min(count))
      .collect()
  }
}

impl std::fmt::Debug for WorkPartitioner {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WorkPartitioner")
      .field("threads", &self.threads())
      .finish()
  }
}

/// Cubic range of cells owned by one extraction task.
///
/// A cell `(x, y, z)` spans samples `x..=x+1` (and likewise on y, z), so a
/// block reads one sample layer past `max` on each axis. Cells on a shared
/// face belong to the block with the lower index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
  /// Position in x-fastest enumeration order.
  pub index: usize,
  /// First owned cell.
  pub min: [usize; 3],
  /// One past the last owned cell.
  pub max: [usize; 3],
}

impl Block {
  pub fn cell_count(&self) -> usize {
    (0..3).map(|k| self.max[k] - self.min[k]).product()
  }
}

/// Split the cells of `shape` into blocks of `block_size` cells per side,
/// enumerated x-fastest. A grid with a single sample on any axis has no
/// cells and yields no blocks.
pub fn blocks(shape: &GridShape, block_size: usize) -> Vec<Block> {
  let dims = shape.dims();
  let size = block_size.max(1);
  let cells = dims.map(|n| n.saturating_sub(1));
  if cells.contains(&0) {
    return Vec::new();
  }
  let counts = cells.map(|c| c.div_ceil(size));

  let mut out = Vec::with_capacity(counts.iter().product());
  for bz in 0..counts[2] {
    for by in 0..counts[1] {
      for bx in 0..counts[0] {
        let b = [bx, by, bz];
        let min = [0, 1, 2].map(|k| b[k] * size);
        let max = [0, 1, 2].map(|k| ((b[k] + 1) * size).min(cells[k]));
        out.push(Block {
          index: out.len(),
          min,
          max,
        });
      }
    }
  }
  out
}

#[cfg(test)]
#[path = "partition_test.rs"]
mod partition_test;
