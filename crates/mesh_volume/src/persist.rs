//! Binary grid container.
//!
//! Everything is little-endian:
//!
//! ```text
//! ┌─────────┬─────────┬───────────┬──────────────┬────────────┬─────────────┐
//! │ "MVGR"  │ version │ word bits │ dims (3×u64) │ voxel (f64)│ min (3×f64) │
//! ├─────────┴─────────┴───────────┴──────────────┴────────────┴─────────────┤
//! │ channel count (u32), then per channel:                                  │
//! │   kind (u8)  shift (u32)  bits (u32)  low (f64)  high (f64)             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │ dims.x × dims.y × dims.z words, `word bits / 8` bytes each              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use glam::DVec3;

use crate::bounds::{Bounds, GridShape};
use crate::channel::{ChannelKind, GridDataChannel};
use crate::error::{Result, VolumeError};
use crate::grid::{Grid, Word};

/// Magic bytes identifying a grid file.
pub const GRID_MAGIC: [u8; 4] = *b"MVGR";

/// Current container version.
pub const GRID_VERSION: u32 = 1;

// Refuse headers describing more channels than any word can hold.
const MAX_CHANNELS: u32 = 64;

/// Serialize `grid` into `writer`.
pub fn write_grid<W: Word, O: Write>(grid: &Grid<W>, writer: &mut O) -> Result<()> {
  let shape = grid.shape();
  writer.write_all(&GRID_MAGIC)?;
  writer.write_all(&GRID_VERSION.to_le_bytes())?;
  writer.write_all(&W::BITS.to_le_bytes())?;
  for d in shape.dims() {
    writer.write_all(&(d as u64).to_le_bytes())?;
  }
  writer.write_all(&shape.voxel_size().to_le_bytes())?;
  for c in shape.bounds().min.to_array() {
    writer.write_all(&c.to_le_bytes())?;
  }

  writer.write_all(&(grid.channels().len() as u32).to_le_bytes())?;
  for ch in grid.channels() {
    let (low, high) = ch.domain();
    writer.write_all(&[ch.kind().tag()])?;
    writer.write_all(&ch.shift().to_le_bytes())?;
    writer.write_all(&ch.bits().to_le_bytes())?;
    writer.write_all(&low.to_le_bytes())?;
    writer.write_all(&high.to_le_bytes())?;
  }

  let width = (W::BITS / 8) as usize;
  let mut buf = Vec::with_capacity(grid.words().len() * width);
  for w in grid.words() {
    buf.extend_from_slice(&w.to_u64().to_le_bytes()[..width]);
  }
  writer.write_all(&buf)?;
  Ok(())
}

/// Deserialize a grid whose word width is `W`.
pub fn read_grid<W: Word, I: Read>(reader: &mut I) -> Result<Grid<W>> {
  let mut magic = [0u8; 4];
  reader.read_exact(&mut magic)?;
  if magic != GRID_MAGIC {
    return Err(VolumeError::Format(format!("bad magic {magic:?}")));
  }
  let version = read_u32(reader)?;
  if version != GRID_VERSION {
    return Err(VolumeError::Format(format!("unsupported version {version}")));
  }
  let word_bits = read_u32(reader)?;
  if word_bits != W::BITS {
    return Err(VolumeError::Format(format!(
      "file holds {word_bits}-bit words, expected {}",
      W::BITS
    )));
  }

  let mut dims = [0usize; 3];
  for d in &mut dims {
    *d = usize::try_from(read_u64(reader)?)
      .map_err(|_| VolumeError::Format("dimension overflows usize".into()))?;
  }
  let voxel_size = read_f64(reader)?;
  let min = DVec3::new(read_f64(reader)?, read_f64(reader)?, read_f64(reader)?);
  if !(voxel_size.is_finite() && voxel_size > 0.0) {
    return Err(VolumeError::Format(format!("voxel size {voxel_size}")));
  }
  if !min.is_finite() {
    return Err(VolumeError::Format(format!("grid origin {min}")));
  }
  let extent = DVec3::new(dims[0] as f64, dims[1] as f64, dims[2] as f64) * voxel_size;
  let shape = GridShape::new(Bounds::new(min, min + extent), voxel_size, u64::MAX)?;
  if shape.dims() != dims {
    return Err(VolumeError::Format(format!(
      "dimensions {dims:?} do not match lattice {:?}",
      shape.dims()
    )));
  }

  let count = read_u32(reader)?;
  if count > MAX_CHANNELS {
    return Err(VolumeError::Format(format!("{count} channels")));
  }
  let mut channels = Vec::with_capacity(count as usize);
  for _ in 0..count {
    let mut tag = [0u8; 1];
    reader.read_exact(&mut tag)?;
    let kind = ChannelKind::from_tag(tag[0])
      .ok_or_else(|| VolumeError::Format(format!("unknown channel kind {}", tag[0])))?;
    let shift = read_u32(reader)?;
    let bits = read_u32(reader)?;
    let low = read_f64(reader)?;
    let high = read_f64(reader)?;
    channels.push(GridDataChannel::new(kind, shift, bits, low, high)?);
  }

  let width = (W::BITS / 8) as usize;
  let mut raw = vec![0u8; shape.cell_count() * width];
  reader.read_exact(&mut raw)?;
  let words = raw
    .chunks_exact(width)
    .map(|chunk| {
      let mut bytes = [0u8; 8];
      bytes[..width].copy_from_slice(chunk);
      W::from_u64(u64::from_le_bytes(bytes))
    })
    .collect();

  Grid::from_parts(shape, channels, words)
}

/// Write `grid` to a file.
pub fn save_grid<W: Word>(grid: &Grid<W>, path: impl AsRef<Path>) -> Result<()> {
  let mut writer = BufWriter::new(File::create(path)?);
  write_grid(grid, &mut writer)?;
  writer.flush()?;
  Ok(())
}

/// Read a grid file written by [`save_grid`].
pub fn load_grid<W: Word>(path: impl AsRef<Path>) -> Result<Grid<W>> {
  let mut reader = BufReader::new(File::open(path)?);
  read_grid(&mut reader)
}

fn read_u32<I: Read>(reader: &mut I) -> Result<u32> {
  let mut b = [0u8; 4];
  reader.read_exact(&mut b)?;
  Ok(u32::from_le_bytes(b))
}

fn read_u64<I: Read>(reader: &mut I) -> Result<u64> {
  let mut b = [0u8; 8];
  reader.read_exact(&mut b)?;
  Ok(u64::from_le_bytes(b))
}

fn read_f64<I: Read>(reader: &mut I) -> Result<f64> {
  let mut b = [0u8; 8];
  reader.read_exact(&mut b)?;
  Ok(f64::from_le_bytes(b))
}

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;
