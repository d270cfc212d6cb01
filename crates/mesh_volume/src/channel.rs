//! Quantized attribute channels.
//!
//! A channel maps a physical quantity in `[low, high]` onto the integer codes
//! `[0, 2^bits - 1]` and owns `bits` consecutive bits of a packed grid word,
//! starting at `shift`.
//!
//! ```text
//! word (u32):  ┌──────────────┬────────────────┐
//!              │ density (8)  │ distance (16)  │
//!              └──────────────┴────────────────┘
//!               shift = 16      shift = 0
//!
//! code = floor((clamp(v, low, high) - low) / (high - low) * max_code + 0.5)
//! v    = low + code * (high - low) / max_code
//! ```
//!
//! Values outside the domain saturate to the end codes instead of wrapping.

use crate::constants::MAX_ATTRIBUTE_COMPONENTS;
use crate::error::{Result, VolumeError};

const ATTRIBUTE_TAG_BASE: u8 = 2;

/// What a channel stores. Decides the iso-value and which side of it is
/// inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelKind {
  /// Signed distance in meters, negative inside.
  Distance,
  /// Occupancy in `[0, 1]`, above one half inside.
  Density,
  /// Component `i` of a per-vertex attribute vector (a colour channel, a
  /// material weight), taken from the closest surface point. Carries no
  /// surface of its own.
  Attribute(u8),
}

impl ChannelKind {
  pub fn name(self) -> &'static str {
    match self {
      ChannelKind::Distance => "distance",
      ChannelKind::Density => "density",
      ChannelKind::Attribute(_) => "attribute",
    }
  }

  pub(crate) fn tag(self) -> u8 {
    match self {
      ChannelKind::Distance => 0,
      ChannelKind::Density => 1,
      ChannelKind::Attribute(i) => ATTRIBUTE_TAG_BASE + i,
    }
  }

  pub(crate) fn from_tag(tag: u8) -> Option<Self> {
    match tag {
      0 => Some(ChannelKind::Distance),
      1 => Some(ChannelKind::Density),
      t if (ATTRIBUTE_TAG_BASE..ATTRIBUTE_TAG_BASE + MAX_ATTRIBUTE_COMPONENTS).contains(&t) => {
        Some(ChannelKind::Attribute(t - ATTRIBUTE_TAG_BASE))
      }
      _ => None,
    }
  }
}

/// One quantized channel of a packed grid word.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDataChannel {
  kind: ChannelKind,
  shift: u32,
  bits: u32,
  low: f64,
  high: f64,
}

impl GridDataChannel {
  /// Create a channel occupying bits `[shift, shift + bits)` of a 64-bit
  /// word, mapping `[low, high]` onto its codes.
  pub fn new(kind: ChannelKind, shift: u32, bits: u32, low: f64, high: f64) -> Result<Self> {
    if bits == 0 || bits > 32 {
      return Err(VolumeError::InvalidChannel(format!(
        "{} channel bit count {bits} outside 1..=32",
        kind.name()
      )));
    }
    if shift + bits > 64 {
      return Err(VolumeError::InvalidChannel(format!(
        "{} channel bits {shift}..{} exceed 64",
        kind.name(),
        shift + bits
      )));
    }
    if let ChannelKind::Attribute(i) = kind {
      if i >= MAX_ATTRIBUTE_COMPONENTS {
        return Err(VolumeError::InvalidChannel(format!(
          "attribute component {i} exceeds {}",
          MAX_ATTRIBUTE_COMPONENTS - 1
        )));
      }
    }
    if !low.is_finite() || !high.is_finite() || low >= high {
      return Err(VolumeError::InvalidChannel(format!(
        "{} channel domain [{low}, {high}] is empty",
        kind.name()
      )));
    }
    Ok(Self {
      kind,
      shift,
      bits,
      low,
      high,
    })
  }

  /// Signed distance channel at shift 0.
  ///
  /// The domain reaches one voxel past the influence band on each side, so
  /// the end codes (the sentinels) decode to distances beyond the band.
  pub fn distance(bits: u32, max_in: f64, max_out: f64, voxel_size: f64) -> Result<Self> {
    Self::new(
      ChannelKind::Distance,
      0,
      bits,
      -(max_in + voxel_size),
      max_out + voxel_size,
    )
  }

  /// Occupancy channel over `[0, 1]` at shift 0.
  pub fn density(bits: u32) -> Result<Self> {
    Self::new(ChannelKind::Density, 0, bits, 0.0, 1.0)
  }

  /// Attribute component `component` over `[low, high]` at shift 0.
  pub fn attribute(component: u8, bits: u32, low: f64, high: f64) -> Result<Self> {
    Self::new(ChannelKind::Attribute(component), 0, bits, low, high)
  }

  /// Same channel moved to another bit offset.
  pub fn with_shift(self, shift: u32) -> Result<Self> {
    Self::new(self.kind, shift, self.bits, self.low, self.high)
  }

  #[inline]
  pub fn kind(&self) -> ChannelKind {
    self.kind
  }

  #[inline]
  pub fn shift(&self) -> u32 {
    self.shift
  }

  #[inline]
  pub fn bits(&self) -> u32 {
    self.bits
  }

  /// Physical domain `(low, high)`.
  #[inline]
  pub fn domain(&self) -> (f64, f64) {
    (self.low, self.high)
  }

  /// Largest code, `2^bits - 1`.
  #[inline]
  pub fn max_code(&self) -> u64 {
    (1u64 << self.bits) - 1
  }

  /// Bits of the word owned by this channel.
  #[inline]
  pub fn mask(&self) -> u64 {
    self.max_code() << self.shift
  }

  /// Physical size of one code step.
  pub fn resolution(&self) -> f64 {
    (self.high - self.low) / self.max_code() as f64
  }

  /// Quantize a value, saturating outside the domain.
  #[inline]
  pub fn pack(&self, value: f64) -> u64 {
    let max = self.max_code();
    let t = (value.clamp(self.low, self.high) - self.low) / (self.high - self.low);
    ((t * max as f64 + 0.5).floor() as u64).min(max)
  }

  /// Decode a code back to a physical value.
  #[inline]
  pub fn unpack(&self, code: u64) -> f64 {
    let code = code.min(self.max_code());
    self.low + code as f64 * self.resolution()
  }

  /// Code for voxels deep inside that no triangle reached.
  pub fn inside_default(&self) -> u64 {
    match self.kind {
      ChannelKind::Distance | ChannelKind::Attribute(_) => 0,
      ChannelKind::Density => self.max_code(),
    }
  }

  /// Code for voxels far outside that no triangle reached.
  pub fn outside_default(&self) -> u64 {
    match self.kind {
      ChannelKind::Distance => self.max_code(),
      ChannelKind::Density | ChannelKind::Attribute(_) => 0,
    }
  }

  /// Iso-value separating inside from outside. Attribute channels report
  /// their domain midpoint.
  pub fn iso_value(&self) -> f64 {
    match self.kind {
      ChannelKind::Distance => 0.0,
      ChannelKind::Density | ChannelKind::Attribute(_) => 0.5 * (self.low + self.high),
    }
  }

  /// Signed offset from the iso-value, negative inside.
  #[inline]
  pub fn signed_offset(&self, value: f64) -> f64 {
    match self.kind {
      ChannelKind::Distance | ChannelKind::Attribute(_) => value - self.iso_value(),
      ChannelKind::Density => self.iso_value() - value,
    }
  }

  /// Extract this channel's code from a word.
  #[inline]
  pub fn get_bits(&self, word: u64) -> u64 {
    (word >> self.shift) & self.max_code()
  }

  /// Replace this channel's code in a word, leaving other bits untouched.
  #[inline]
  pub fn set_bits(&self, word: u64, code: u64) -> u64 {
    (word & !self.mask()) | ((code & self.max_code()) << self.shift)
  }

  #[inline]
  pub fn get_value(&self, word: u64) -> f64 {
    self.unpack(self.get_bits(word))
  }

  #[inline]
  pub fn set_value(&self, word: u64, value: f64) -> u64 {
    self.set_bits(word, self.pack(value))
  }

  /// True when the bit ranges of two channels intersect.
  pub fn overlaps(&self, other: &GridDataChannel) -> bool {
    self.mask() & other.mask() != 0
  }
}

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;
