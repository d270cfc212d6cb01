//! Engine-agnostic metrics collection for conversion jobs.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use mesh_volume::metrics::{ConversionMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // Record a finished job:
//! metrics.record_raster_job(&job);
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::error::Diagnostic;
use crate::grid::Word;
use crate::pipeline::{JobStats, MeshJob, RasterJob};

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create a new rolling window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Get the most recent value.
    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
    /// Compute the sum of all values.
    pub fn sum(&self) -> T {
        self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
    }
}

impl RollingWindow<u64> {
    /// Compute the average of all values.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    /// Get min and max values.
    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = self.buffer.iter().min()?;
        let max = self.buffer.iter().max()?;
        Some((*min, *max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128)
    }
}

/// Timing history and running totals across conversion jobs.
#[derive(Debug, Clone)]
pub struct ConversionMetrics {
    // Timing
    /// Rolling window of rasterization times in microseconds.
    pub rasterize_timings: RollingWindow<u64>,
    /// Rolling window of sign resolution times in microseconds.
    pub sign_timings: RollingWindow<u64>,
    /// Rolling window of extraction times in microseconds.
    pub extract_timings: RollingWindow<u64>,
    /// Rolling window of smoothing plus decimation times in microseconds.
    pub simplify_timings: RollingWindow<u64>,

    // Totals
    pub raster_jobs: u64,
    pub mesh_jobs: u64,
    /// Triangles fed into rasterization.
    pub triangles_in: u64,
    /// Triangles produced by extraction, after decimation.
    pub triangles_out: u64,
    /// Voxels allocated across all grids.
    pub voxels: u64,

    // Diagnostics
    pub degenerate_triangles: u64,
    pub ambiguous_voxels: u64,
    pub stalled_decimations: u64,
}

impl Default for ConversionMetrics {
    fn default() -> Self {
        Self {
            rasterize_timings: RollingWindow::new(128),
            sign_timings: RollingWindow::new(128),
            extract_timings: RollingWindow::new(128),
            simplify_timings: RollingWindow::new(128),
            raster_jobs: 0,
            mesh_jobs: 0,
            triangles_in: 0,
            triangles_out: 0,
            voxels: 0,
            degenerate_triangles: 0,
            ambiguous_voxels: 0,
            stalled_decimations: 0,
        }
    }
}

impl ConversionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset timings. Totals are cumulative and survive.
    pub fn reset(&mut self) {
        self.rasterize_timings.clear();
        self.sign_timings.clear();
        self.extract_timings.clear();
        self.simplify_timings.clear();
    }

    /// Record a finished mesh → grid job.
    pub fn record_raster_job<W: Word>(&mut self, job: &RasterJob<W>) {
        if !is_enabled() {
            return;
        }
        self.rasterize_timings.push(job.stats.timings.rasterize_us);
        self.sign_timings.push(job.stats.timings.sign_us);
        self.raster_jobs += 1;
        self.triangles_in += job.raster.triangles as u64;
        self.voxels += job.grid.shape().cell_count() as u64;
        self.record_diagnostics(&job.stats);
    }

    /// Record a finished grid → mesh job.
    pub fn record_mesh_job(&mut self, job: &MeshJob) {
        if !is_enabled() {
            return;
        }
        self.extract_timings.push(job.stats.timings.extract_us);
        self.simplify_timings
            .push(job.stats.timings.smooth_us + job.stats.timings.decimate_us);
        self.mesh_jobs += 1;
        self.triangles_out += job.mesh.triangle_count() as u64;
        self.record_diagnostics(&job.stats);
    }

    fn record_diagnostics(&mut self, stats: &JobStats) {
        for d in &stats.diagnostics {
            match *d {
                Diagnostic::DegenerateInput { skipped } => {
                    self.degenerate_triangles += skipped as u64
                }
                Diagnostic::AmbiguousSign { voxels } => self.ambiguous_voxels += voxels as u64,
                Diagnostic::DecimationStalled { .. } => self.stalled_decimations += 1,
            }
        }
    }

    /// Get average rasterization timing in microseconds.
    pub fn avg_rasterize_timing_us(&self) -> f64 {
        self.rasterize_timings.average()
    }

    /// Get average extraction timing in microseconds.
    pub fn avg_extract_timing_us(&self) -> f64 {
        self.extract_timings.average()
    }

    /// Approximate grid memory for 16-bit words, in megabytes.
    pub fn grid_memory_mb(&self) -> f64 {
        (self.voxels * 2) as f64 / 1_048_576.0
    }
}
