//! Decoded scalar field the extractor walks.
//!
//! Values are signed offsets from the channel's iso-value, negative
//! inside, in channel units. Offsets closer to zero than a small shift are
//! pushed outside so no sample sits exactly on the surface.

use rayon::prelude::*;

use crate::bounds::GridShape;
use crate::channel::{ChannelKind, GridDataChannel};
use crate::constants::ISO_SHIFT;
use crate::grid::{Grid, Word};

#[derive(Clone, Debug)]
pub(crate) struct ScalarField {
  pub dims: [usize; 3],
  pub values: Vec<f64>,
  /// Offset span of one voxel: voxel size for distance, 1 for density.
  pub scale: f64,
}

impl ScalarField {
  pub fn decode<W: Word>(grid: &Grid<W>, channel: &GridDataChannel) -> Self {
    let scale = match channel.kind() {
      ChannelKind::Distance => grid.shape().voxel_size(),
      ChannelKind::Density | ChannelKind::Attribute(_) => {
        let (low, high) = channel.domain();
        high - low
      }
    };
    let values = grid
      .words()
      .par_iter()
      .map(|w| channel.signed_offset(channel.get_value(w.to_u64())))
      .collect();
    Self {
      dims: grid.shape().dims(),
      values,
      scale,
    }
  }

  /// Push near-zero offsets to `+ISO_SHIFT * scale`.
  pub fn shift_off_iso(&mut self) {
    let eps = ISO_SHIFT * self.scale;
    self.values.par_iter_mut().for_each(|v| {
      if v.abs() < eps {
        *v = eps;
      }
    });
  }

  #[inline(always)]
  pub fn at(&self, x: usize, y: usize, z: usize) -> f64 {
    self.values[x + self.dims[0] * (y + self.dims[1] * z)]
  }

  /// Fractional occupancy used by indicator interpolation.
  #[inline]
  pub fn occupancy(&self, value: f64) -> f64 {
    (0.5 - value / self.scale).clamp(0.0, 1.0)
  }

  /// Separable Gaussian blur with standard deviation `sigma` voxels.
  /// Samples past the border repeat the edge value.
  pub fn gaussian(&mut self, sigma: f64) {
    if sigma <= 0.0 {
      return;
    }
    let radius = (sigma * 2.0).ceil() as i64;
    let mut kernel: Vec<f64> = (-radius..=radius)
      .map(|k| (-(k * k) as f64 / (2.0 * sigma * sigma)).exp())
      .collect();
    let sum: f64 = kernel.iter().sum();
    kernel.iter_mut().for_each(|w| *w /= sum);

    let mut src = vec![0.0; self.values.len()];
    for axis in 0..3 {
      src.copy_from_slice(&self.values);
      let dims = self.dims;
      let stride = match axis {
        0 => 1,
        1 => dims[0],
        _ => dims[0] * dims[1],
      };
      let n = dims[axis] as i64;
      self.values.par_iter_mut().enumerate().for_each(|(i, out)| {
        let pos = ((i / stride) % dims[axis]) as i64;
        let base = i as i64 - pos * stride as i64;
        *out = kernel
          .iter()
          .enumerate()
          .map(|(k, w)| {
            let p = (pos + k as i64 - radius).clamp(0, n - 1);
            w * src[(base + p * stride as i64) as usize]
          })
          .sum();
      });
    }
  }
}

/// Sample positions in world space; used for vertex placement.
#[inline]
pub(crate) fn edge_point(shape: &GridShape, lower: [usize; 3], axis: usize, t: f64) -> glam::DVec3 {
  let mut s = glam::DVec3::new(lower[0] as f64, lower[1] as f64, lower[2] as f64);
  s[axis] += t;
  shape.sample_to_world(s)
}

#[cfg(test)]
mod tests {
  use glam::DVec3;

  use super::*;
  use crate::bounds::Bounds;

  fn shape(n: usize) -> GridShape {
    GridShape::new(Bounds::new(DVec3::ZERO, DVec3::splat(n as f64)), 1.0, u64::MAX).unwrap()
  }

  #[test]
  fn test_decode_distance_and_shift() {
    let mut grid = Grid::<u16>::with_distance(shape(3), 16, 2.0, 2.0).unwrap();
    let ch = *grid.channel(ChannelKind::Distance).unwrap();
    grid.set_value(&ch, 1, 1, 1, -0.5);
    let mut field = ScalarField::decode(&grid, &ch);
    assert!((field.at(1, 1, 1) + 0.5).abs() <= ch.resolution());
    assert!(field.at(0, 0, 0) > 2.0);

    field.values[0] = 0.0;
    field.shift_off_iso();
    assert_eq!(field.values[0], ISO_SHIFT);
  }

  #[test]
  fn test_decode_density_sign() {
    let ch = GridDataChannel::density(8).unwrap();
    let mut grid = Grid::<u8>::new(shape(2), vec![ch]).unwrap();
    grid.set_code(&ch, 0, 0, 0, 255);
    let field = ScalarField::decode(&grid, &ch);
    assert!(field.at(0, 0, 0) < 0.0);
    assert!(field.at(1, 0, 0) > 0.0);
    assert_eq!(field.scale, 1.0);
    assert_eq!(field.occupancy(field.at(0, 0, 0)), 1.0);
  }

  #[test]
  fn test_gaussian_preserves_constant() {
    let mut field = ScalarField {
      dims: [4, 3, 5],
      values: vec![2.5; 60],
      scale: 1.0,
    };
    field.gaussian(1.0);
    assert!(field.values.iter().all(|v| (v - 2.5).abs() < 1e-12));
  }

  #[test]
  fn test_gaussian_spreads_spike() {
    let mut field = ScalarField {
      dims: [7, 1, 1],
      values: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
      scale: 1.0,
    };
    field.gaussian(1.0);
    assert!(field.values[3] < 1.0);
    assert!(field.values[2] > 0.0);
    assert!((field.values[2] - field.values[4]).abs() < 1e-12);
    assert!((field.values.iter().sum::<f64>() - 1.0).abs() < 1e-12);
  }
}
