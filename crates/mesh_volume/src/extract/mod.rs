//! Block-parallel iso-surface extraction (marching cubes).
//!
//! # Pipeline
//!
//! ```text
//! Grid<W> ──► decode channel ──► [gaussian] ──► iso shift ──► ScalarField
//!                                                                │
//!          ┌──────────────────────┬──────────────────────┬───────┘
//!          ▼                      ▼                      ▼
//!       block 0                block 1       ...      block n      (rayon)
//!          │ patch                │ patch                │ patch
//!          └──────────► channel ──┴──────────────────────┘
//!                          │
//!                          ▼
//!            sort by block, merge by grid edge key ──► IndexedMesh
//! ```
//!
//! # Seams
//!
//! A cell belongs to exactly one block (the lower-index one on shared
//! faces) and reads the sample layer past the block's upper faces. Each
//! vertex is keyed by the grid edge it lies on, so vertices on block faces
//! are merged exactly and no triangle is produced twice.

mod block;
mod field;
mod tables;

pub use tables::{EDGE_CORNERS, EDGE_TABLE, TRIANGLE_TABLE};

use rayon::prelude::*;

use block::{extract_block, Patch};
use field::ScalarField;
use crate::channel::{ChannelKind, GridDataChannel};
use crate::config::{ConversionConfig, InterpolationMode};
use crate::constants::{DEFAULT_BLOCK_SIZE, VERTEX_MERGE_EPSILON};
use crate::error::{Result, VolumeError};
use crate::grid::{Grid, Word};
use crate::mesh::{IndexedMesh, MeshBuilder};
use crate::partition::{blocks, WorkPartitioner};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtractParams {
  /// Block edge length in cells.
  pub block_size: usize,
  pub interpolation: InterpolationMode,
  /// Gaussian prefilter sigma in voxels (0 = off).
  pub prefilter_width: f64,
}

impl Default for ExtractParams {
  fn default() -> Self {
    Self {
      block_size: DEFAULT_BLOCK_SIZE,
      interpolation: InterpolationMode::Linear,
      prefilter_width: 0.0,
    }
  }
}

impl ExtractParams {
  pub fn from_config(config: &ConversionConfig) -> Self {
    Self {
      block_size: config.block_size,
      interpolation: config.interpolation,
      prefilter_width: config.prefilter_width,
    }
  }

  pub fn with_block_size(mut self, block_size: usize) -> Self {
    self.block_size = block_size;
    self
  }

  pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
    self.interpolation = mode;
    self
  }

  pub fn with_prefilter_width(mut self, width: f64) -> Self {
    self.prefilter_width = width;
    self
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
  pub blocks: usize,
  /// Cells the surface passes through.
  pub active_cells: usize,
  pub vertices: usize,
  pub triangles: usize,
}

#[derive(Clone, Debug)]
pub struct IsosurfaceExtractor {
  params: ExtractParams,
}

impl IsosurfaceExtractor {
  pub fn new(params: ExtractParams) -> Self {
    Self { params }
  }

  pub fn params(&self) -> &ExtractParams {
    &self.params
  }

  /// Extract the iso-surface of the grid's distance channel (or its
  /// density channel when it has no distance channel).
  pub fn extract<W: Word>(&self, grid: &Grid<W>, partitioner: &WorkPartitioner) -> Result<IndexedMesh> {
    self.extract_with_stats(grid, partitioner).map(|(mesh, _)| mesh)
  }

  #[tracing::instrument(skip_all, name = "extract")]
  pub fn extract_with_stats<W: Word>(
    &self,
    grid: &Grid<W>,
    partitioner: &WorkPartitioner,
  ) -> Result<(IndexedMesh, ExtractStats)> {
    let channel = surface_channel(grid)?;
    if grid.is_untouched() {
      tracing::debug!("grid holds only background; nothing to extract");
      return Ok((IndexedMesh::new(), ExtractStats::default()));
    }

    let shape = *grid.shape();
    let block_list = blocks(&shape, self.params.block_size);
    let params = self.params;

    let mut patches: Vec<Patch> = partitioner.install(|| {
      let mut field = ScalarField::decode(grid, &channel);
      field.gaussian(params.prefilter_width);
      field.shift_off_iso();

      let (tx, rx) = crossbeam_channel::unbounded();
      block_list.par_iter().for_each_with(tx, |tx, b| {
        let patch = extract_block(&field, &shape, b, params.interpolation);
        // Receiver outlives every sender.
        let _ = tx.send(patch);
      });
      rx.try_iter().collect()
    });
    patches.sort_by_key(|p| p.block);

    let mut stats = ExtractStats {
      blocks: block_list.len(),
      ..Default::default()
    };
    let mut builder = MeshBuilder::new(VERTEX_MERGE_EPSILON * shape.voxel_size());
    builder.reserve(patches.iter().map(|p| p.faces.len()).sum());
    for patch in &patches {
      stats.active_cells += patch.active_cells;
      let ids: Vec<u32> = patch
        .vertices
        .iter()
        .map(|(key, p)| builder.keyed_vertex(*key, *p))
        .collect();
      for face in &patch.faces {
        builder.push_face(face.map(|v| ids[v as usize]));
      }
    }
    stats.vertices = builder.vertex_count();
    stats.triangles = builder.triangle_count();

    tracing::debug!(
      blocks = stats.blocks,
      cells = stats.active_cells,
      vertices = stats.vertices,
      triangles = stats.triangles,
      "extracted"
    );
    Ok((builder.finish(), stats))
  }
}

/// Channel the surface is read from.
fn surface_channel<W: Word>(grid: &Grid<W>) -> Result<GridDataChannel> {
  grid
    .channel(ChannelKind::Distance)
    .or_else(|| grid.channel(ChannelKind::Density))
    .copied()
    .ok_or_else(|| VolumeError::InvalidChannel("grid has no distance or density channel".into()))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
