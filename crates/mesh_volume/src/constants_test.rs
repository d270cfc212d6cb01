use super::*;

#[test]
fn test_corner_offsets_match_binary_layout() {
  for (corner, offset) in CORNER_OFFSETS.iter().enumerate() {
    assert_eq!(offset[0], corner & 1, "corner {} x", corner);
    assert_eq!(offset[1], (corner >> 1) & 1, "corner {} y", corner);
    assert_eq!(offset[2], (corner >> 2) & 1, "corner {} z", corner);
  }
}

#[test]
fn test_face_neighbors_are_unit_steps() {
  for n in &FACE_NEIGHBORS {
    let len: i32 = n.iter().map(|c| c.abs()).sum();
    assert_eq!(len, 1);
  }
}

#[test]
fn test_defaults_are_sane() {
  assert!(DEFAULT_VOXEL_SIZE > 0.0);
  assert!(DEFAULT_MAX_IN_DISTANCE >= DEFAULT_VOXEL_SIZE);
  assert!(DEFAULT_BITS > 0 && DEFAULT_BITS <= 32);
  assert!(RASTER_LEAF_SIZE.is_power_of_two());
  assert!(MIN_FACE_COUNT >= 4);
}

#[test]
fn test_dense_bytes_per_cell_covers_each_phase() {
  use std::mem::size_of;

  use crate::raster::Contribution;

  let field = size_of::<Option<Contribution>>();
  let resolve = 2 * field + size_of::<i8>() + 2 * size_of::<bool>();
  let pack = field + size_of::<bool>() + size_of::<u64>();
  let extract = size_of::<u64>() + 2 * size_of::<f64>();
  for bytes in [resolve, pack, extract] {
    assert!(bytes as u64 <= DENSE_BYTES_PER_CELL, "{bytes} bytes per cell");
  }
}
