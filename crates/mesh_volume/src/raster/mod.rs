//! Triangle rasterizer: writes bounded signed distances into voxels.
//!
//! ```text
//! triangles ──► ranges ──► worker 0: octree walk ─► sparse buffer ─┐
//!                     └──► worker n: octree walk ─► sparse buffer ─┴► merge ─► dense field
//! ```
//!
//! Every voxel center within `[-max_in, max_out]` of a triangle receives an
//! offer; the closest offer wins and exact ties go to the earlier triangle.
//! The rule is a total order, so the merged field is identical for any
//! thread count.

mod accumulator;
mod octree;

use rayon::prelude::*;

pub use accumulator::Contribution;

use accumulator::SparseAccumulator;
use crate::bounds::GridShape;
use crate::constants::RASTER_LEAF_SIZE;
use crate::error::Diagnostic;
use crate::geometry::Triangle;
use crate::partition::WorkPartitioner;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterParams {
  /// Deepest interior distance written.
  pub max_in: f64,
  /// Farthest exterior distance written.
  pub max_out: f64,
  /// Octree leaf edge (voxels).
  pub leaf_size: usize,
}

impl RasterParams {
  pub fn new(max_in: f64, max_out: f64) -> Self {
    Self {
      max_in,
      max_out,
      leaf_size: RASTER_LEAF_SIZE,
    }
  }

  pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
    self.leaf_size = leaf_size;
    self
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
  pub triangles: usize,
  /// Zero-area triangles skipped.
  pub degenerate: usize,
  /// In-band distance evaluations offered to voxels.
  pub offers: usize,
  /// Voxels holding a contribution.
  pub touched: usize,
}

impl RasterStats {
  pub fn diagnostic(&self) -> Option<Diagnostic> {
    (self.degenerate > 0).then_some(Diagnostic::DegenerateInput {
      skipped: self.degenerate,
    })
  }
}

/// Dense result of rasterization: the winning contribution per voxel.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterField {
  shape: GridShape,
  contributions: Vec<Option<Contribution>>,
  stats: RasterStats,
}

impl RasterField {
  /// Field from precomputed contributions; stats count touched voxels only.
  pub fn from_contributions(shape: GridShape, contributions: Vec<Option<Contribution>>) -> Self {
    let touched = contributions.iter().filter(|c| c.is_some()).count();
    Self {
      shape,
      contributions,
      stats: RasterStats {
        touched,
        ..Default::default()
      },
    }
  }

  #[inline]
  pub fn shape(&self) -> &GridShape {
    &self.shape
  }

  #[inline]
  pub fn stats(&self) -> &RasterStats {
    &self.stats
  }

  #[inline]
  pub fn get(&self, index: usize) -> Option<Contribution> {
    self.contributions[index]
  }

  #[inline]
  pub fn distance(&self, index: usize) -> Option<f64> {
    self.contributions[index].map(|c| c.distance)
  }

  pub fn contributions(&self) -> &[Option<Contribution>] {
    &self.contributions
  }
}

/// Rasterizes triangle streams onto one lattice.
#[derive(Clone, Debug)]
pub struct DistanceRasterizer {
  shape: GridShape,
  params: RasterParams,
}

impl DistanceRasterizer {
  pub fn new(shape: GridShape, params: RasterParams) -> Self {
    Self { shape, params }
  }

  pub fn shape(&self) -> &GridShape {
    &self.shape
  }

  pub fn params(&self) -> &RasterParams {
    &self.params
  }

  /// Rasterize a triangle source. The source is pulled once; triangle
  /// indices follow its order.
  #[tracing::instrument(skip_all, name = "rasterize")]
  pub fn rasterize<I>(&self, triangles: I, partitioner: &WorkPartitioner) -> RasterField
  where
    I: IntoIterator<Item = Triangle>,
  {
    let triangles: Vec<Triangle> = triangles.into_iter().collect();
    let ranges = partitioner.triangle_ranges(triangles.len());
    let min_area = self.shape.voxel_size() * self.shape.voxel_size() * 1.0e-12;

    let merged = partitioner.install(|| {
      ranges
        .par_iter()
        .fold(SparseAccumulator::default, |mut acc, range| {
          for i in range.clone() {
            let tri = &triangles[i];
            acc.triangles += 1;
            if tri.is_degenerate(min_area) {
              acc.degenerate += 1;
              continue;
            }
            octree::rasterize_triangle(&self.shape, &self.params, tri, i as u32, &mut acc);
          }
          acc
        })
        .reduce(SparseAccumulator::default, SparseAccumulator::merge)
    });

    let mut contributions = vec![None; self.shape.cell_count()];
    let touched = merged.cells.len();
    for (index, c) in merged.cells {
      contributions[index] = Some(c);
    }

    let stats = RasterStats {
      triangles: merged.triangles,
      degenerate: merged.degenerate,
      offers: merged.offers,
      touched,
    };
    if stats.degenerate > 0 {
      tracing::warn!(skipped = stats.degenerate, "degenerate triangles skipped");
    }
    tracing::debug!(
      triangles = stats.triangles,
      offers = stats.offers,
      voxels = stats.touched,
      "rasterized"
    );

    RasterField {
      shape: self.shape,
      contributions,
      stats,
    }
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
