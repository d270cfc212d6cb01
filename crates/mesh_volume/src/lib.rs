//! mesh_volume - Triangle mesh ↔ voxel volume conversion
//!
//! Rasterizes triangle meshes into packed signed-distance grids and extracts
//! iso-surface meshes back from them.
//!
//! # Features
//!
//! - **Bounded distance rasterization**: every voxel within the influence
//!   band of a triangle receives its distance; the closest triangle wins
//! - **Sign propagation**: inside/outside resolved by flood fill and a
//!   majority wavefront, so interior voxels beyond the band are filled
//! - **Packed channels**: distance, density and per-vertex attributes
//!   (colour and the like) quantized into `u8`..`u64` words, several
//!   channels per word
//! - **Block-parallel marching cubes** with exact seams between blocks
//! - **Mesh post-processing**: Laplacian smoothing and quadric-error
//!   edge-collapse decimation
//!
//! # Example
//!
//! ```ignore
//! use mesh_volume::{shapes, ConversionConfig, Converter};
//!
//! let config = ConversionConfig::default()
//!     .with_voxel_size(0.002)
//!     .with_max_distance(0.05, 0.05);
//! let converter = Converter::new(config)?;
//!
//! let sphere = shapes::icosphere(glam::DVec3::ZERO, 0.05, 3);
//! let raster = converter.mesh_to_grid::<u16, _>(sphere.triangles())?;
//! let meshed = converter.grid_to_mesh(&raster.grid)?;
//!
//! println!("{} triangles", meshed.mesh.triangle_count());
//! ```

pub mod bounds;
pub mod cache;
pub mod channel;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod source;

// Re-export commonly used items
pub use bounds::{Bounds, BoundsCollector, GridShape};
pub use channel::{ChannelKind, GridDataChannel};
pub use config::{ConversionConfig, InterpolationMode, Neighborhood};
pub use error::{Diagnostic, Result, VolumeError};
pub use geometry::Triangle;
pub use grid::{Grid, Word};
pub use source::{drain_into, AttributedTriangle, TriangleSink};

// Mesh → distance field
pub mod raster;
pub mod sign;
pub use raster::{DistanceRasterizer, RasterField, RasterParams, RasterStats};
pub use sign::{SignParams, SignResolver, SignStats, SignedField};

// Distance field → mesh
pub mod extract;
pub mod mesh;
pub use extract::{ExtractParams, ExtractStats, IsosurfaceExtractor};
pub use mesh::{DecimateParams, Decimator, IndexedMesh, MeshBuilder, SmoothParams};

// Worker pool and work decomposition
pub mod partition;
pub use partition::WorkPartitioner;

// Job orchestration
pub mod pipeline;
pub use cache::{CacheKey, GridCache};
pub use pipeline::{
  convert, grid_to_mesh, mesh_to_attributed_grid, mesh_to_grid, Conversion, Converter, JobStats,
  MeshJob, RasterJob,
};

pub mod metrics;
pub mod persist;
pub mod shapes;
