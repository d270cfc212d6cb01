//! Error and diagnostic types.
//!
//! Only job-wide failures are errors. Problems local to one triangle, voxel
//! or decimation pass are reported as [`Diagnostic`] values and the job
//! carries on.

use thiserror::Error;

/// Fatal conversion failures.
#[derive(Debug, Error)]
pub enum VolumeError {
  /// Requested grid would exceed the configured cell ceiling.
  #[error("grid of {requested} cells exceeds the limit of {limit} cells")]
  CapacityExceeded { requested: u64, limit: u64 },

  /// Bounds are inverted or not finite.
  #[error("invalid bounds: min {min:?} max {max:?}")]
  InvalidBounds { min: [f64; 3], max: [f64; 3] },

  /// Voxel size is zero, negative or not finite.
  #[error("invalid voxel size: {0}")]
  InvalidVoxelSize(f64),

  /// A configuration value is out of its accepted range.
  #[error("invalid configuration: {0}")]
  InvalidConfig(String),

  /// Channel layout does not fit the grid word or channels overlap.
  #[error("invalid channel layout: {0}")]
  InvalidChannel(String),

  /// Underlying I/O failure while persisting a grid.
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  /// Persisted grid data is malformed.
  #[error("malformed grid data: {0}")]
  Format(String),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, VolumeError>;

/// Non-fatal quality outcome recorded during a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diagnostic {
  /// Zero-area triangles were skipped by the rasterizer.
  DegenerateInput { skipped: usize },
  /// Voxels whose sign could not be decided and were defaulted to outside.
  AmbiguousSign { voxels: usize },
  /// A decimation pass found no collapse under the error bound.
  DecimationStalled { pass: usize, faces: usize },
}

impl std::fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Diagnostic::DegenerateInput { skipped } => {
        write!(f, "{skipped} degenerate triangles skipped")
      }
      Diagnostic::AmbiguousSign { voxels } => {
        write!(f, "{voxels} voxels with ambiguous sign defaulted to outside")
      }
      Diagnostic::DecimationStalled { pass, faces } => {
        write!(f, "decimation stalled in pass {pass} at {faces} faces")
      }
    }
  }
}
