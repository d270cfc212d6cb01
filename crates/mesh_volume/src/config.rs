//! Conversion job configuration.

use crate::constants::*;
use crate::error::{Result, VolumeError};

/// How the extractor places a vertex on a crossing edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InterpolationMode {
  /// Linear interpolation of the raw signed value.
  #[default]
  Linear,
  /// Interpolate the crossing of fractional voxel occupancy.
  Indicator,
}

/// Voxel neighbourhood used by the sign majority vote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Neighborhood {
  /// Face neighbours.
  Six,
  /// Face and edge neighbours.
  Eighteen,
  /// Face, edge and corner neighbours.
  #[default]
  TwentySix,
}

impl Neighborhood {
  /// Neighbour offsets, ordered by z, then y, then x.
  pub fn offsets(self) -> Vec<[i32; 3]> {
    let mut out = Vec::with_capacity(26);
    for dz in -1..=1 {
      for dy in -1..=1 {
        for dx in -1..=1 {
          let dist_sq = dx * dx + dy * dy + dz * dz;
          let keep = match self {
            Neighborhood::Six => dist_sq == 1,
            Neighborhood::Eighteen => dist_sq == 1 || dist_sq == 2,
            Neighborhood::TwentySix => dist_sq > 0,
          };
          if keep {
            out.push([dx, dy, dz]);
          }
        }
      }
    }
    out
  }
}

/// Options of a mesh ↔ volume conversion.
///
/// Distances are in meters; sizes marked "voxels" are multiples of
/// `voxel_size`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionConfig {
  /// Voxel edge length.
  pub voxel_size: f64,

  /// Deepest interior distance written by the rasterizer.
  pub max_in_distance: f64,

  /// Farthest exterior distance written by the rasterizer.
  pub max_out_distance: f64,

  /// Bit depth of the distance channel.
  pub bits: u32,

  /// Extraction block edge length (voxels).
  pub block_size: usize,

  /// Worker threads (0 = available parallelism).
  pub threads: usize,

  /// Laplacian smoothing width (voxels, 0 = off).
  pub smoothing_width: f64,

  /// Per-collapse decimation error bound (squared meters).
  pub max_decimation_error: f64,

  /// Number of decimation passes (0 = off).
  pub max_decimation_passes: usize,

  /// Vertex placement on crossing edges.
  pub interpolation: InterpolationMode,

  /// Extra world margin added around the mesh bounds.
  pub padding: f64,

  /// Grid cell ceiling; larger grids fail before allocation.
  pub max_grid_cells: u64,

  /// Majority-vote passes over the sign field.
  pub sign_smoothing_iterations: usize,

  /// Neighbourhood of the sign majority vote.
  pub sign_neighborhood: Neighborhood,

  /// Wavefront layers (voxels) signs propagate past the band; `None` is
  /// unbounded.
  pub max_propagation_distance: Option<usize>,

  /// Gaussian prefilter width applied before extraction (voxels, 0 = off).
  pub prefilter_width: f64,

  /// Relax the decimation bound until the mesh fits this many triangles.
  pub max_triangles: Option<usize>,
}

impl Default for ConversionConfig {
  fn default() -> Self {
    Self {
      voxel_size: DEFAULT_VOXEL_SIZE,
      max_in_distance: DEFAULT_MAX_IN_DISTANCE,
      max_out_distance: DEFAULT_MAX_OUT_DISTANCE,
      bits: DEFAULT_BITS,
      block_size: DEFAULT_BLOCK_SIZE,
      threads: 0,
      smoothing_width: DEFAULT_SMOOTHING_WIDTH,
      max_decimation_error: DEFAULT_MAX_DECIMATION_ERROR,
      max_decimation_passes: DEFAULT_MAX_DECIMATION_PASSES,
      interpolation: InterpolationMode::Linear,
      padding: 0.0,
      max_grid_cells: DEFAULT_MAX_GRID_CELLS,
      sign_smoothing_iterations: DEFAULT_SIGN_SMOOTHING_ITERATIONS,
      sign_neighborhood: Neighborhood::TwentySix,
      max_propagation_distance: None,
      prefilter_width: 0.0,
      max_triangles: None,
    }
  }
}

impl ConversionConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_voxel_size(mut self, voxel_size: f64) -> Self {
    self.voxel_size = voxel_size;
    self
  }

  /// Set both influence distances.
  pub fn with_max_distance(mut self, max_in: f64, max_out: f64) -> Self {
    self.max_in_distance = max_in;
    self.max_out_distance = max_out;
    self
  }

  pub fn with_bits(mut self, bits: u32) -> Self {
    self.bits = bits;
    self
  }

  pub fn with_block_size(mut self, block_size: usize) -> Self {
    self.block_size = block_size;
    self
  }

  pub fn with_threads(mut self, threads: usize) -> Self {
    self.threads = threads;
    self
  }

  pub fn with_smoothing_width(mut self, width: f64) -> Self {
    self.smoothing_width = width;
    self
  }

  pub fn with_decimation(mut self, max_error: f64, max_passes: usize) -> Self {
    self.max_decimation_error = max_error;
    self.max_decimation_passes = max_passes;
    self
  }

  pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
    self.interpolation = mode;
    self
  }

  pub fn with_padding(mut self, padding: f64) -> Self {
    self.padding = padding;
    self
  }

  pub fn with_max_grid_cells(mut self, cells: u64) -> Self {
    self.max_grid_cells = cells;
    self
  }

  pub fn with_sign_smoothing(mut self, iterations: usize, neighborhood: Neighborhood) -> Self {
    self.sign_smoothing_iterations = iterations;
    self.sign_neighborhood = neighborhood;
    self
  }

  pub fn with_max_propagation_distance(mut self, voxels: Option<usize>) -> Self {
    self.max_propagation_distance = voxels;
    self
  }

  pub fn with_prefilter_width(mut self, width: f64) -> Self {
    self.prefilter_width = width;
    self
  }

  pub fn with_max_triangles(mut self, max: Option<usize>) -> Self {
    self.max_triangles = max;
    self
  }

  /// Reject values no job can run with.
  pub fn validate(&self) -> Result<()> {
    if !self.voxel_size.is_finite() || self.voxel_size <= 0.0 {
      return Err(VolumeError::InvalidVoxelSize(self.voxel_size));
    }
    let non_negative = |name: &str, v: f64| {
      if v.is_finite() && v >= 0.0 {
        Ok(())
      } else {
        Err(VolumeError::InvalidConfig(format!("{name} must be >= 0, got {v}")))
      }
    };
    non_negative("max_in_distance", self.max_in_distance)?;
    non_negative("max_out_distance", self.max_out_distance)?;
    non_negative("smoothing_width", self.smoothing_width)?;
    non_negative("max_decimation_error", self.max_decimation_error)?;
    non_negative("padding", self.padding)?;
    non_negative("prefilter_width", self.prefilter_width)?;

    let min_band = MIN_BAND_VOXELS * self.voxel_size;
    for (name, band) in [
      ("max_in_distance", self.max_in_distance),
      ("max_out_distance", self.max_out_distance),
    ] {
      if band < min_band {
        return Err(VolumeError::InvalidConfig(format!(
          "{name} {band} is below half a voxel ({min_band}); voxels at the surface would get no distance"
        )));
      }
    }

    if self.bits == 0 || self.bits > 32 {
      return Err(VolumeError::InvalidConfig(format!(
        "bits must be in 1..=32, got {}",
        self.bits
      )));
    }
    if self.block_size == 0 {
      return Err(VolumeError::InvalidConfig("block_size must be > 0".into()));
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
