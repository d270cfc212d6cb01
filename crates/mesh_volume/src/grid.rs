//! Packed attribute grid.
//!
//! One generic grid type covers every word width: the word is picked when
//! the grid is constructed (`Grid<u8>`, `Grid<u16>`, `Grid<u32>`,
//! `Grid<u64>`), and all channels must fit inside it.

use crate::bounds::GridShape;
use crate::channel::{ChannelKind, GridDataChannel};
use crate::error::{Result, VolumeError};

/// Unsigned integer used as the packed cell word.
pub trait Word: Copy + Default + PartialEq + Send + Sync + std::fmt::Debug + 'static {
  const BITS: u32;

  fn to_u64(self) -> u64;

  /// Truncating conversion.
  fn from_u64(value: u64) -> Self;
}

macro_rules! impl_word {
  ($($t:ty),*) => {
    $(
      impl Word for $t {
        const BITS: u32 = <$t>::BITS;

        #[inline(always)]
        fn to_u64(self) -> u64 {
          self as u64
        }

        #[inline(always)]
        fn from_u64(value: u64) -> Self {
          value as $t
        }
      }
    )*
  };
}

impl_word!(u8, u16, u32, u64);

/// 3D grid of packed words with its lattice and channel layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<W: Word> {
  shape: GridShape,
  channels: Vec<GridDataChannel>,
  data: Vec<W>,
}

impl<W: Word> Grid<W> {
  /// Allocate a grid with every channel at its outside default.
  pub fn new(shape: GridShape, channels: Vec<GridDataChannel>) -> Result<Self> {
    validate_channels::<W>(&channels)?;
    let fill = W::from_u64(background_word(&channels));
    Ok(Self {
      shape,
      data: vec![fill; shape.cell_count()],
      channels,
    })
  }

  /// Grid with a single distance channel filling `bits` of the word.
  pub fn with_distance(shape: GridShape, bits: u32, max_in: f64, max_out: f64) -> Result<Self> {
    let channel = GridDataChannel::distance(bits, max_in, max_out, shape.voxel_size())?;
    Self::new(shape, vec![channel])
  }

  /// Reassemble a grid from stored parts.
  pub(crate) fn from_parts(
    shape: GridShape,
    channels: Vec<GridDataChannel>,
    data: Vec<W>,
  ) -> Result<Self> {
    validate_channels::<W>(&channels)?;
    if data.len() != shape.cell_count() {
      return Err(VolumeError::Format(format!(
        "expected {} words, found {}",
        shape.cell_count(),
        data.len()
      )));
    }
    Ok(Self {
      shape,
      channels,
      data,
    })
  }

  #[inline]
  pub fn shape(&self) -> &GridShape {
    &self.shape
  }

  #[inline]
  pub fn channels(&self) -> &[GridDataChannel] {
    &self.channels
  }

  /// First channel of the given kind.
  pub fn channel(&self, kind: ChannelKind) -> Option<&GridDataChannel> {
    self.channels.iter().find(|c| c.kind() == kind)
  }

  /// Word that an untouched voxel holds.
  pub fn background(&self) -> W {
    W::from_u64(background_word(&self.channels))
  }

  #[inline]
  pub fn words(&self) -> &[W] {
    &self.data
  }

  #[inline]
  pub fn words_mut(&mut self) -> &mut [W] {
    &mut self.data
  }

  #[inline]
  pub fn get_word(&self, x: usize, y: usize, z: usize) -> W {
    self.data[self.shape.index(x, y, z)]
  }

  #[inline]
  pub fn set_word(&mut self, x: usize, y: usize, z: usize, word: W) {
    let idx = self.shape.index(x, y, z);
    self.data[idx] = word;
  }

  /// Code of `channel` at a voxel.
  #[inline]
  pub fn get_code(&self, channel: &GridDataChannel, x: usize, y: usize, z: usize) -> u64 {
    channel.get_bits(self.get_word(x, y, z).to_u64())
  }

  /// Replace the code of `channel` at a voxel.
  #[inline]
  pub fn set_code(&mut self, channel: &GridDataChannel, x: usize, y: usize, z: usize, code: u64) {
    let idx = self.shape.index(x, y, z);
    self.data[idx] = W::from_u64(channel.set_bits(self.data[idx].to_u64(), code));
  }

  /// Decoded value of `channel` at a voxel.
  #[inline]
  pub fn get_value(&self, channel: &GridDataChannel, x: usize, y: usize, z: usize) -> f64 {
    channel.get_value(self.get_word(x, y, z).to_u64())
  }

  #[inline]
  pub fn set_value(&mut self, channel: &GridDataChannel, x: usize, y: usize, z: usize, value: f64) {
    self.set_code(channel, x, y, z, channel.pack(value));
  }

  /// Decoded value of `channel` at a linear index.
  #[inline]
  pub fn value_at(&self, channel: &GridDataChannel, index: usize) -> f64 {
    channel.get_value(self.data[index].to_u64())
  }

  /// Overwrite every voxel with `word`.
  pub fn fill(&mut self, word: W) {
    self.data.fill(word);
  }

  /// True when no voxel differs from the background word.
  pub fn is_untouched(&self) -> bool {
    let bg = self.background();
    self.data.iter().all(|w| *w == bg)
  }
}

fn background_word(channels: &[GridDataChannel]) -> u64 {
  channels
    .iter()
    .fold(0u64, |word, c| c.set_bits(word, c.outside_default()))
}

pub(crate) fn validate_channels<W: Word>(channels: &[GridDataChannel]) -> Result<()> {
  if channels.is_empty() {
    return Err(VolumeError::InvalidChannel("grid needs at least one channel".into()));
  }
  for (i, c) in channels.iter().enumerate() {
    if c.shift() + c.bits() > W::BITS {
      return Err(VolumeError::InvalidChannel(format!(
        "{} channel needs {} bits, word has {}",
        c.kind().name(),
        c.shift() + c.bits(),
        W::BITS
      )));
    }
    for other in &channels[i + 1..] {
      if c.overlaps(other) {
        return Err(VolumeError::InvalidChannel(format!(
          "{} and {} channels overlap",
          c.kind().name(),
          other.kind().name()
        )));
      }
      if c.kind() == other.kind() {
        return Err(VolumeError::InvalidChannel(format!(
          "duplicate {} channel",
          c.kind().name()
        )));
      }
    }
  }
  Ok(())
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
