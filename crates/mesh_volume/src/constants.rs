//! Grid layout conventions and numeric defaults.
//!
//! # Grid Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            GRID LAYOUT                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Voxel index:   0     1     2    ...   nx-2  nx-1                       │
//! │                 │     │                  │     │                        │
//! │   world:  xmin ─┼──●──┼──●──┼── ... ──┼──●──┼──●──┼─ xmax               │
//! │                    │                                                    │
//! │                    └─ samples live at voxel centers                     │
//! │                       x = xmin + (ix + 0.5) * voxel_size                │
//! │                                                                         │
//! │  The mesh bounds are grown by one voxel margin (plus padding) so        │
//! │  the outermost voxel layer never touches the surface.                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Memory Layout
//!
//! ```text
//! Grid memory layout (X innermost):
//!
//! index = x + nx * (y + ny * z)
//!
//! Address:  0      1      ...  nx-1     nx     ...
//! Content: [0,0,0][1,0,0]...[nx-1,0,0][0,1,0]...
//!          └──────── X ─────────┘└──── X ───...
//! ```
//!
//! # Cell Corners
//!
//! An extraction cell spans 2×2×2 samples. Corner indices (binary ZYX):
//!
//! ```text
//!   0 = (0,0,0)    4 = (0,0,1)
//!   1 = (1,0,0)    5 = (1,0,1)
//!   2 = (0,1,0)    6 = (0,1,1)
//!   3 = (1,1,0)    7 = (1,1,1)
//! ```

/// Corner offsets of an extraction cell, indexed by corner (binary ZYX).
pub const CORNER_OFFSETS: [[usize; 3]; 8] = [
  [0, 0, 0],
  [1, 0, 0],
  [0, 1, 0],
  [1, 1, 0],
  [0, 0, 1],
  [1, 0, 1],
  [0, 1, 1],
  [1, 1, 1],
];

/// Face neighbour offsets (6-neighbourhood).
pub const FACE_NEIGHBORS: [[i32; 3]; 6] = [
  [-1, 0, 0], // -X
  [1, 0, 0],  // +X
  [0, -1, 0], // -Y
  [0, 1, 0],  // +Y
  [0, 0, -1], // -Z
  [0, 0, 1],  // +Z
];

/// Default voxel edge length in meters (0.1 mm).
pub const DEFAULT_VOXEL_SIZE: f64 = 1.0e-4;

/// Default interior influence distance in meters.
pub const DEFAULT_MAX_IN_DISTANCE: f64 = 2.0e-4;

/// Default exterior influence distance in meters.
pub const DEFAULT_MAX_OUT_DISTANCE: f64 = 2.0e-4;

/// Default bit depth of the distance channel.
pub const DEFAULT_BITS: u32 = 16;

/// Default extraction block edge length in voxels.
pub const DEFAULT_BLOCK_SIZE: usize = 50;

/// Default smoothing width in voxels.
pub const DEFAULT_SMOOTHING_WIDTH: f64 = 1.0;

/// Default decimation error bound (squared meters).
pub const DEFAULT_MAX_DECIMATION_ERROR: f64 = 1.0e-9;

/// Default number of decimation passes.
pub const DEFAULT_MAX_DECIMATION_PASSES: usize = 7;

/// Default ceiling on grid cells (2^30).
///
/// The ceiling bounds the cell count, not memory. A job holds dense
/// per-cell state next to the grid words, at most
/// [`DENSE_BYTES_PER_CELL`] bytes per cell in any phase:
///
/// ```text
/// resolve signs   raster field + signed field (2 × 24)
///                 + sign, touched, inside masks (3 × 1)
/// pack            signed field (24) + inside mask (1) + word (≤ 8)
/// extract         word (≤ 8) + decoded field (8) + blur scratch (8)
/// ```
///
/// At the default ceiling that is up to 64 GiB. Rasterization adds sparse
/// per-worker maps sized by the voxels inside the band, not the grid.
pub const DEFAULT_MAX_GRID_CELLS: u64 = 1 << 30;

/// Upper bound on the dense bytes a job holds per grid cell.
pub const DENSE_BYTES_PER_CELL: u64 = 64;

/// Attribute components a grid can carry (`ChannelKind::Attribute(0..16)`).
pub const MAX_ATTRIBUTE_COMPONENTS: u8 = 16;

/// Smallest influence band on either side of the surface, in voxels.
/// Below this some voxels next to the surface never receive a distance.
pub const MIN_BAND_VOXELS: f64 = 0.5;

/// Default number of majority-vote passes over the sign field.
pub const DEFAULT_SIGN_SMOOTHING_ITERATIONS: usize = 1;

/// Octree leaf edge length (voxels) at which the rasterizer stops
/// subdividing and tests voxels directly.
pub const RASTER_LEAF_SIZE: usize = 2;

/// Fraction of a voxel by which samples sitting exactly on the iso-value
/// are pushed to the outside.
pub const ISO_SHIFT: f64 = 1.0e-3;

/// Vertex merge tolerance of the mesh builder, as a fraction of a voxel.
pub const VERTEX_MERGE_EPSILON: f64 = 1.0e-6;

/// Error bound multiplier applied when the decimated mesh is still above
/// its triangle cap.
pub const DECIMATION_RELAX_FACTOR: f64 = 10.0;

/// Maximum number of error-bound relaxations.
pub const MAX_DECIMATION_RELAXATIONS: usize = 4;

/// Smallest face count the decimator leaves behind (a tetrahedron).
pub const MIN_FACE_COUNT: usize = 4;

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
