//! Conversion jobs.
//!
//! ```text
//! mesh_to_grid:  triangles ─► bounds pre-pass ─► GridShape (capacity check)
//!                          ─► rasterize ─► resolve signs ─► pack ─► Grid<W>
//!
//! mesh_to_attributed_grid: same path; pack also interpolates the per-vertex
//!                          attributes of each voxel's closest surface point
//!
//! grid_to_mesh:  Grid<W> ─► extract ─► smooth ─► decimate ─► IndexedMesh
//! ```
//!
//! A [`Converter`] owns the validated config and the worker pool, so a
//! caller converting many meshes builds it once. The free functions build a
//! throwaway converter per call.

use std::sync::Arc;

use glam::DVec3;
use web_time::Instant;

use crate::bounds::{Bounds, BoundsCollector, GridShape};
use crate::cache::{CacheKey, GridCache};
use crate::channel::{ChannelKind, GridDataChannel};
use crate::config::ConversionConfig;
use crate::error::{Diagnostic, Result, VolumeError};
use crate::extract::{ExtractParams, ExtractStats, IsosurfaceExtractor};
use crate::geometry::Triangle;
use crate::grid::{validate_channels, Grid, Word};
use crate::mesh::{
  laplacian_smooth, DecimateParams, DecimationReport, Decimator, IndexedMesh, SmoothParams,
  SmoothStats,
};
use crate::partition::WorkPartitioner;
use crate::raster::{DistanceRasterizer, RasterParams, RasterStats};
use crate::sign::{SignParams, SignResolver, SignStats, SignedField};
use crate::source::AttributedTriangle;

/// Wall-clock time of each phase in microseconds. Phases a job did not
/// run stay at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseTimings {
  pub bounds_us: u64,
  pub rasterize_us: u64,
  pub sign_us: u64,
  pub pack_us: u64,
  pub extract_us: u64,
  pub smooth_us: u64,
  pub decimate_us: u64,
  pub total_us: u64,
}

impl PhaseTimings {
  fn absorb(&mut self, other: &PhaseTimings) {
    self.bounds_us += other.bounds_us;
    self.rasterize_us += other.rasterize_us;
    self.sign_us += other.sign_us;
    self.pack_us += other.pack_us;
    self.extract_us += other.extract_us;
    self.smooth_us += other.smooth_us;
    self.decimate_us += other.decimate_us;
    self.total_us += other.total_us;
  }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobStats {
  pub timings: PhaseTimings,
  /// Non-fatal quality outcomes, in the order they occurred.
  pub diagnostics: Vec<Diagnostic>,
}

impl JobStats {
  fn note(&mut self, diagnostic: Option<Diagnostic>) {
    if let Some(d) = diagnostic {
      tracing::warn!(diagnostic = %d, "conversion diagnostic");
      self.diagnostics.push(d);
    }
  }
}

/// Result of [`Converter::mesh_to_grid`].
#[derive(Clone, Debug)]
pub struct RasterJob<W: Word> {
  pub grid: Grid<W>,
  pub raster: RasterStats,
  pub signs: SignStats,
  pub stats: JobStats,
}

/// Result of [`Converter::grid_to_mesh`].
#[derive(Clone, Debug)]
pub struct MeshJob {
  pub mesh: IndexedMesh,
  pub extract: ExtractStats,
  pub smooth: SmoothStats,
  pub decimation: DecimationReport,
  pub stats: JobStats,
}

/// Result of a full round trip.
#[derive(Clone, Debug)]
pub struct Conversion<W: Word> {
  pub raster: RasterJob<W>,
  pub mesh: MeshJob,
}

impl<W: Word> Conversion<W> {
  /// Timings and diagnostics of both halves combined.
  pub fn stats(&self) -> JobStats {
    let mut stats = self.raster.stats.clone();
    stats.timings.absorb(&self.mesh.stats.timings);
    stats.diagnostics.extend(self.mesh.stats.diagnostics.iter().copied());
    stats
  }
}

/// Validated configuration plus the worker pool that runs it.
#[derive(Debug)]
pub struct Converter {
  config: ConversionConfig,
  partitioner: WorkPartitioner,
}

impl Converter {
  pub fn new(config: ConversionConfig) -> Result<Self> {
    config.validate()?;
    let partitioner = WorkPartitioner::new(config.threads)?;
    Ok(Self {
      config,
      partitioner,
    })
  }

  #[inline]
  pub fn config(&self) -> &ConversionConfig {
    &self.config
  }

  #[inline]
  pub fn partitioner(&self) -> &WorkPartitioner {
    &self.partitioner
  }

  /// Rasterize a triangle source into a signed distance grid.
  ///
  /// A source without triangles yields an untouched single-voxel grid and a
  /// [`Diagnostic::DegenerateInput`].
  #[tracing::instrument(skip_all, name = "mesh_to_grid")]
  pub fn mesh_to_grid<W, I>(&self, triangles: I) -> Result<RasterJob<W>>
  where
    W: Word,
    I: IntoIterator<Item = Triangle>,
  {
    let total = Instant::now();
    let c = &self.config;
    if c.bits > W::BITS {
      return Err(VolumeError::InvalidChannel(format!(
        "{} distance bits do not fit a {}-bit word",
        c.bits,
        W::BITS
      )));
    }
    let channels = vec![self.distance_channel()?];
    let triangles: Vec<Triangle> = triangles.into_iter().collect();
    self.rasterize_into(total, triangles, channels, |signed, channels| {
      signed.to_grid(channels)
    })
  }

  /// Rasterize an attributed source into a grid holding the distance
  /// channel at shift 0 followed by `attributes`.
  ///
  /// Each reached voxel takes the attribute vector interpolated at its
  /// closest surface point. `attributes` must not overlap the distance bits
  /// and may only name components below `N`.
  #[tracing::instrument(skip_all, name = "mesh_to_attributed_grid")]
  pub fn mesh_to_attributed_grid<W, const N: usize, I>(
    &self,
    source: I,
    attributes: &[GridDataChannel],
  ) -> Result<RasterJob<W>>
  where
    W: Word,
    I: IntoIterator<Item = AttributedTriangle<N>>,
  {
    let total = Instant::now();
    let mut channels = vec![self.distance_channel()?];
    channels.extend_from_slice(attributes);
    validate_channels::<W>(&channels)?;
    for ch in attributes {
      match ch.kind() {
        ChannelKind::Attribute(i) if usize::from(i) < N => {}
        kind => {
          return Err(VolumeError::InvalidChannel(format!(
            "{kind:?} is not an attribute of a {N}-component source"
          )))
        }
      }
    }

    let source: Vec<AttributedTriangle<N>> = source.into_iter().collect();
    let triangles = source.iter().map(|t| t.triangle).collect();
    self.rasterize_into(total, triangles, channels, |signed, channels| {
      signed.to_attributed_grid(channels, &source)
    })
  }

  fn distance_channel(&self) -> Result<GridDataChannel> {
    let c = &self.config;
    GridDataChannel::distance(c.bits, c.max_in_distance, c.max_out_distance, c.voxel_size)
  }

  /// Bounds pre-pass, rasterization and sign resolution shared by both
  /// sources; `pack` turns the signed field into the final grid.
  fn rasterize_into<W, F>(
    &self,
    total: Instant,
    triangles: Vec<Triangle>,
    channels: Vec<GridDataChannel>,
    pack: F,
  ) -> Result<RasterJob<W>>
  where
    W: Word,
    F: FnOnce(&SignedField, Vec<GridDataChannel>) -> Result<Grid<W>>,
  {
    let c = &self.config;
    let mut stats = JobStats::default();

    let t = Instant::now();
    let collector = BoundsCollector::collect(triangles.iter().copied());
    stats.timings.bounds_us = elapsed_us(t);

    let Some(mesh_bounds) = collector.bounds() else {
      stats.note(Some(Diagnostic::DegenerateInput { skipped: 0 }));
      let bounds = Bounds::new(DVec3::ZERO, DVec3::splat(c.voxel_size));
      let shape = GridShape::new(bounds, c.voxel_size, c.max_grid_cells)?;
      let grid = Grid::new(shape, channels)?;
      stats.timings.total_us = elapsed_us(total);
      return Ok(RasterJob {
        grid,
        raster: RasterStats::default(),
        signs: SignStats::default(),
        stats,
      });
    };

    let shape = GridShape::for_mesh(mesh_bounds, c.voxel_size, c.padding, c.max_grid_cells)?;
    tracing::debug!(
      dims = ?shape.dims(),
      triangles = collector.triangle_count(),
      "grid sized"
    );

    let t = Instant::now();
    let params = RasterParams::new(c.max_in_distance, c.max_out_distance);
    let field = DistanceRasterizer::new(shape, params).rasterize(triangles, &self.partitioner);
    stats.timings.rasterize_us = elapsed_us(t);
    stats.note(field.stats().diagnostic());

    let t = Instant::now();
    let signed = SignResolver::new(SignParams::from_config(c)).resolve(&field, &self.partitioner);
    stats.timings.sign_us = elapsed_us(t);
    stats.note(signed.stats().diagnostic());
    let raster = *field.stats();
    drop(field);

    let t = Instant::now();
    let grid = pack(&signed, channels)?;
    stats.timings.pack_us = elapsed_us(t);
    stats.timings.total_us = elapsed_us(total);

    tracing::info!(
      voxels = shape.cell_count(),
      elapsed_us = stats.timings.total_us,
      "mesh rasterized"
    );
    Ok(RasterJob {
      grid,
      raster,
      signs: *signed.stats(),
      stats,
    })
  }

  /// Like [`Converter::mesh_to_grid`], but reuses a grid from `cache` when
  /// the same triangles were rasterized with the same options.
  pub fn mesh_to_grid_cached<W: Word>(
    &self,
    triangles: &[Triangle],
    cache: &mut GridCache<W>,
  ) -> Result<Arc<Grid<W>>> {
    let key = CacheKey::new(&self.config, triangles);
    if let Some(grid) = cache.get(&key) {
      tracing::debug!(key = key.value(), "grid cache hit");
      return Ok(grid);
    }
    let job = self.mesh_to_grid(triangles.iter().copied())?;
    Ok(cache.insert(key, job.grid))
  }

  /// Extract, smooth and decimate the iso-surface of `grid`.
  #[tracing::instrument(skip_all, name = "grid_to_mesh")]
  pub fn grid_to_mesh<W: Word>(&self, grid: &Grid<W>) -> Result<MeshJob> {
    let total = Instant::now();
    let c = &self.config;
    let mut stats = JobStats::default();

    let t = Instant::now();
    let (mut mesh, extract) = IsosurfaceExtractor::new(ExtractParams::from_config(c))
      .extract_with_stats(grid, &self.partitioner)?;
    stats.timings.extract_us = elapsed_us(t);

    let t = Instant::now();
    let smooth = if c.smoothing_width > 0.0 {
      let params = SmoothParams::for_width(c.smoothing_width, grid.shape().voxel_size());
      self.partitioner.install(|| laplacian_smooth(&mut mesh, &params))
    } else {
      SmoothStats::default()
    };
    stats.timings.smooth_us = elapsed_us(t);

    let t = Instant::now();
    let decimation = Decimator::new(DecimateParams {
      max_error: c.max_decimation_error,
      max_passes: c.max_decimation_passes,
      max_triangles: c.max_triangles,
    })
    .run(&mut mesh);
    stats.timings.decimate_us = elapsed_us(t);
    stats.note(decimation.diagnostic());
    stats.timings.total_us = elapsed_us(total);

    tracing::info!(
      triangles = mesh.triangle_count(),
      vertices = mesh.vertex_count(),
      elapsed_us = stats.timings.total_us,
      "surface extracted"
    );
    Ok(MeshJob {
      mesh,
      extract,
      smooth,
      decimation,
      stats,
    })
  }

  /// Rasterize `triangles` and extract the result again.
  pub fn convert<W, I>(&self, triangles: I) -> Result<Conversion<W>>
  where
    W: Word,
    I: IntoIterator<Item = Triangle>,
  {
    let raster = self.mesh_to_grid::<W, I>(triangles)?;
    let mesh = self.grid_to_mesh(&raster.grid)?;
    Ok(Conversion { raster, mesh })
  }
}

/// One-shot [`Converter::mesh_to_grid`].
pub fn mesh_to_grid<W, I>(triangles: I, config: &ConversionConfig) -> Result<RasterJob<W>>
where
  W: Word,
  I: IntoIterator<Item = Triangle>,
{
  Converter::new(config.clone())?.mesh_to_grid(triangles)
}

/// One-shot [`Converter::mesh_to_attributed_grid`].
pub fn mesh_to_attributed_grid<W, const N: usize, I>(
  source: I,
  attributes: &[GridDataChannel],
  config: &ConversionConfig,
) -> Result<RasterJob<W>>
where
  W: Word,
  I: IntoIterator<Item = AttributedTriangle<N>>,
{
  Converter::new(config.clone())?.mesh_to_attributed_grid(source, attributes)
}

/// One-shot [`Converter::grid_to_mesh`].
pub fn grid_to_mesh<W: Word>(grid: &Grid<W>, config: &ConversionConfig) -> Result<MeshJob> {
  Converter::new(config.clone())?.grid_to_mesh(grid)
}

/// One-shot [`Converter::convert`].
pub fn convert<W, I>(triangles: I, config: &ConversionConfig) -> Result<Conversion<W>>
where
  W: Word,
  I: IntoIterator<Item = Triangle>,
{
  Converter::new(config.clone())?.convert(triangles)
}

#[inline]
fn elapsed_us(start: Instant) -> u64 {
  start.elapsed().as_micros() as u64
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
