//! Distance merge and sign propagation.
//!
//! The rasterizer only signs voxels near the surface. Everything else is
//! decided here, in order:
//!
//! ```text
//! 1. border flood    untouched voxels connected to the grid border  → outside
//! 2. wavefront       remaining untouched voxels, layer by layer from the
//!                    signed set; each takes the majority of its signed
//!                    face neighbours (ties → outside, counted ambiguous)
//! 3. unreached       anything left (propagation cap)                → outside
//! 4. smoothing       vote over the 6/18/26 neighbourhood: an untouched
//!                    voxel flips when a strict majority disagrees, a
//!                    touched voxel only when every neighbour disagrees;
//!                    magnitudes are kept
//! ```
//!
//! A fully enclosed cavity behind an inside band therefore becomes inside
//! regardless of traversal order.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::bounds::GridShape;
use crate::channel::{ChannelKind, GridDataChannel};
use crate::config::{ConversionConfig, Neighborhood};
use crate::constants::FACE_NEIGHBORS;
use crate::error::{Diagnostic, Result, VolumeError};
use crate::grid::{Grid, Word};
use crate::partition::WorkPartitioner;
use crate::raster::{Contribution, RasterField};
use crate::source::AttributedTriangle;

const UNKNOWN: i8 = 0;
const INSIDE: i8 = -1;
const OUTSIDE: i8 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignParams {
  pub max_in: f64,
  pub max_out: f64,
  /// Wavefront layers before giving up; `None` is unbounded.
  pub max_propagation: Option<usize>,
  pub smoothing_iterations: usize,
  pub neighborhood: Neighborhood,
}

impl SignParams {
  pub fn from_config(config: &ConversionConfig) -> Self {
    Self {
      max_in: config.max_in_distance,
      max_out: config.max_out_distance,
      max_propagation: config.max_propagation_distance,
      smoothing_iterations: config.sign_smoothing_iterations,
      neighborhood: config.sign_neighborhood,
    }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignStats {
  /// Voxels signed by the rasterizer.
  pub touched: usize,
  /// Untouched voxels reached from the border.
  pub border_outside: usize,
  /// Voxels signed by the wavefront.
  pub propagated: usize,
  pub layers: usize,
  /// Wavefront ties defaulted to outside.
  pub ambiguous: usize,
  /// Voxels left outside by the propagation cap.
  pub unreached: usize,
  /// Signs flipped by smoothing.
  pub flipped: usize,
}

impl SignStats {
  pub fn diagnostic(&self) -> Option<Diagnostic> {
    (self.ambiguous > 0).then_some(Diagnostic::AmbiguousSign {
      voxels: self.ambiguous,
    })
  }
}

/// Fully signed voxel field.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedField {
  shape: GridShape,
  /// Winning rasterizer contribution; its sign is superseded by `inside`.
  nearest: Vec<Option<Contribution>>,
  inside: Vec<bool>,
  stats: SignStats,
}

impl SignedField {
  #[inline]
  pub fn shape(&self) -> &GridShape {
    &self.shape
  }

  #[inline]
  pub fn stats(&self) -> &SignStats {
    &self.stats
  }

  #[inline]
  pub fn is_inside(&self, index: usize) -> bool {
    self.inside[index]
  }

  /// Signed distance of a voxel the rasterizer reached.
  #[inline]
  pub fn distance(&self, index: usize) -> Option<f64> {
    self.nearest[index].map(|c| {
      let m = c.distance.abs();
      if self.inside[index] {
        -m
      } else {
        m
      }
    })
  }

  /// Source index of the triangle closest to a reached voxel.
  #[inline]
  pub fn nearest_triangle(&self, index: usize) -> Option<u32> {
    self.nearest[index].map(|c| c.triangle)
  }

  /// Pack into a new grid holding `channels`. Distance channels get the
  /// signed distance, density channels the indicator occupancy; voxels the
  /// rasterizer never reached get the inside or outside default code.
  pub fn to_grid<W: Word>(&self, channels: Vec<GridDataChannel>) -> Result<Grid<W>> {
    self.to_attributed_grid::<W, 0>(channels, &[])
  }

  /// Like [`SignedField::to_grid`], also filling attribute channels.
  ///
  /// `triangles` is the attributed source in the order it was rasterized.
  /// A reached voxel takes the attributes interpolated at the closest
  /// point of the triangle that won it; unreached voxels keep code 0.
  pub fn to_attributed_grid<W: Word, const N: usize>(
    &self,
    channels: Vec<GridDataChannel>,
    triangles: &[AttributedTriangle<N>],
  ) -> Result<Grid<W>> {
    let mut grid = Grid::<W>::new(self.shape, channels)?;
    let channels = grid.channels().to_vec();
    let mut attributed = false;
    for ch in &channels {
      if let ChannelKind::Attribute(i) = ch.kind() {
        if usize::from(i) >= N {
          return Err(VolumeError::InvalidChannel(format!(
            "attribute component {i} missing from a {N}-component source"
          )));
        }
        attributed = true;
      }
    }
    let voxel = self.shape.voxel_size();

    for (index, word) in grid.words_mut().iter_mut().enumerate() {
      let attributes = match self.nearest[index] {
        Some(c) if attributed => triangles.get(c.triangle as usize).map(|t| {
          let [x, y, z] = self.shape.coords(index);
          t.attributes_at(self.shape.grid_to_world(x, y, z))
        }),
        _ => None,
      };
      let mut w = word.to_u64();
      for ch in &channels {
        let code = match (self.distance(index), ch.kind()) {
          (Some(d), ChannelKind::Distance) => ch.pack(d),
          (Some(d), ChannelKind::Density) => ch.pack(density_from_distance(d, voxel)),
          (Some(_), ChannelKind::Attribute(i)) => attributes
            .as_ref()
            .and_then(|a| a.get(usize::from(i)))
            .map_or(ch.outside_default(), |v| ch.pack(*v)),
          (None, _) if self.inside[index] => ch.inside_default(),
          (None, _) => ch.outside_default(),
        };
        w = ch.set_bits(w, code);
      }
      *word = W::from_u64(w);
    }
    Ok(grid)
  }

  /// Grid with a single distance channel of `bits` bits.
  pub fn to_distance_grid<W: Word>(&self, bits: u32, max_in: f64, max_out: f64) -> Result<Grid<W>> {
    let ch = GridDataChannel::distance(bits, max_in, max_out, self.shape.voxel_size())?;
    self.to_grid(vec![ch])
  }
}

/// Indicator occupancy of a voxel at signed distance `d`: one deep inside,
/// zero far outside, one half on the surface.
#[inline]
pub fn density_from_distance(d: f64, voxel_size: f64) -> f64 {
  (0.5 - d / voxel_size).clamp(0.0, 1.0)
}

#[derive(Clone, Debug)]
pub struct SignResolver {
  params: SignParams,
}

impl SignResolver {
  pub fn new(params: SignParams) -> Self {
    Self { params }
  }

  pub fn params(&self) -> &SignParams {
    &self.params
  }

  #[tracing::instrument(skip_all, name = "resolve_signs")]
  pub fn resolve(&self, field: &RasterField, partitioner: &WorkPartitioner) -> SignedField {
    let shape = *field.shape();
    let mut sign: Vec<i8> = field
      .contributions()
      .iter()
      .map(|c| match c {
        Some(c) if c.distance < 0.0 => INSIDE,
        Some(_) => OUTSIDE,
        None => UNKNOWN,
      })
      .collect();

    let mut stats = SignStats {
      touched: field.stats().touched,
      ..Default::default()
    };
    stats.border_outside = flood_from_border(&shape, &mut sign);
    propagate(&shape, &mut sign, self.params.max_propagation, &mut stats);
    for s in sign.iter_mut().filter(|s| **s == UNKNOWN) {
      *s = OUTSIDE;
      stats.unreached += 1;
    }

    let offsets = self.params.neighborhood.offsets();
    let touched: Vec<bool> = field.contributions().iter().map(Option::is_some).collect();
    for _ in 0..self.params.smoothing_iterations {
      let flips = partitioner.install(|| majority_flips(&shape, &sign, &touched, &offsets));
      if flips.is_empty() {
        break;
      }
      stats.flipped += flips.len();
      for i in flips {
        sign[i] = -sign[i];
      }
    }

    if stats.ambiguous > 0 {
      tracing::warn!(
        voxels = stats.ambiguous,
        "ambiguous signs defaulted to outside"
      );
    }
    tracing::debug!(
      touched = stats.touched,
      border = stats.border_outside,
      propagated = stats.propagated,
      layers = stats.layers,
      flipped = stats.flipped,
      "signs resolved"
    );

    SignedField {
      shape,
      nearest: field.contributions().to_vec(),
      inside: sign.iter().map(|s| *s == INSIDE).collect(),
      stats,
    }
  }
}

/// Linear index of the face neighbour `offset` away, if inside the grid.
#[inline]
fn neighbor(shape: &GridShape, [x, y, z]: [usize; 3], offset: [i32; 3]) -> Option<usize> {
  let (nx, ny, nz) = (
    x as i64 + offset[0] as i64,
    y as i64 + offset[1] as i64,
    z as i64 + offset[2] as i64,
  );
  shape
    .contains(nx, ny, nz)
    .then(|| shape.index(nx as usize, ny as usize, nz as usize))
}

fn is_border(shape: &GridShape, [x, y, z]: [usize; 3]) -> bool {
  let [nx, ny, nz] = shape.dims();
  x == 0 || y == 0 || z == 0 || x + 1 == nx || y + 1 == ny || z + 1 == nz
}

/// Mark untouched voxels reachable from the border as outside.
fn flood_from_border(shape: &GridShape, sign: &mut [i8]) -> usize {
  let mut queue = VecDeque::new();
  for (i, s) in sign.iter_mut().enumerate() {
    if *s == UNKNOWN && is_border(shape, shape.coords(i)) {
      *s = OUTSIDE;
      queue.push_back(i);
    }
  }

  let mut count = queue.len();
  while let Some(i) = queue.pop_front() {
    let c = shape.coords(i);
    for offset in FACE_NEIGHBORS {
      if let Some(j) = neighbor(shape, c, offset) {
        if sign[j] == UNKNOWN {
          sign[j] = OUTSIDE;
          count += 1;
          queue.push_back(j);
        }
      }
    }
  }
  count
}

/// Layered majority wavefront over face neighbours.
fn propagate(shape: &GridShape, sign: &mut [i8], max_layers: Option<usize>, stats: &mut SignStats) {
  let mut queued = vec![false; sign.len()];
  let mut frontier: Vec<usize> = Vec::new();
  for i in 0..sign.len() {
    if sign[i] != UNKNOWN {
      continue;
    }
    let c = shape.coords(i);
    let seeded = FACE_NEIGHBORS
      .iter()
      .any(|o| neighbor(shape, c, *o).is_some_and(|j| sign[j] != UNKNOWN));
    if seeded {
      queued[i] = true;
      frontier.push(i);
    }
  }

  while !frontier.is_empty() {
    if max_layers.is_some_and(|max| stats.layers >= max) {
      break;
    }
    stats.layers += 1;

    // Decide the whole layer against the previous state.
    let decided: Vec<(usize, i8)> = frontier
      .iter()
      .map(|&i| {
        let c = shape.coords(i);
        let (mut inside, mut outside) = (0, 0);
        for offset in FACE_NEIGHBORS {
          match neighbor(shape, c, offset).map(|j| sign[j]) {
            Some(INSIDE) => inside += 1,
            Some(OUTSIDE) => outside += 1,
            _ => {}
          }
        }
        if inside == outside {
          stats.ambiguous += 1;
        }
        (i, if inside > outside { INSIDE } else { OUTSIDE })
      })
      .collect();

    let mut next = Vec::new();
    for (i, s) in decided {
      sign[i] = s;
      stats.propagated += 1;
      let c = shape.coords(i);
      for offset in FACE_NEIGHBORS {
        if let Some(j) = neighbor(shape, c, offset) {
          if sign[j] == UNKNOWN && !queued[j] {
            queued[j] = true;
            next.push(j);
          }
        }
      }
    }
    frontier = next;
  }
}

/// Voxels outvoted by their neighbours. Rasterized voxels carry exact
/// geometry and flip only when isolated.
fn majority_flips(
  shape: &GridShape,
  sign: &[i8],
  touched: &[bool],
  offsets: &[[i32; 3]],
) -> Vec<usize> {
  (0..sign.len())
    .into_par_iter()
    .filter(|&i| {
      let c = shape.coords(i);
      let (mut total, mut opposite) = (0usize, 0usize);
      for o in offsets {
        if let Some(j) = neighbor(shape, c, *o) {
          total += 1;
          if sign[j] != sign[i] {
            opposite += 1;
          }
        }
      }
      if touched[i] {
        total > 0 && opposite == total
      } else {
        opposite * 2 > total
      }
    })
    .collect()
}

#[cfg(test)]
#[path = "sign_test.rs"]
mod sign_test;
