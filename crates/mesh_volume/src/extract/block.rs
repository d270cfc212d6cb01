//! Marching cubes over the cells of one block.

use std::collections::HashMap;

use glam::DVec3;

use super::field::{edge_point, ScalarField};
use super::tables::{corner_offset, edge_axis, EDGE_CORNERS, EDGE_TABLE, TRIANGLE_TABLE};
use crate::bounds::GridShape;
use crate::config::InterpolationMode;
use crate::partition::Block;

/// Triangles of one block. Vertices carry the key of the grid edge they
/// lie on, so neighbouring patches agree on shared vertices.
#[derive(Clone, Debug, Default)]
pub(crate) struct Patch {
  pub block: usize,
  pub vertices: Vec<(u64, DVec3)>,
  pub faces: Vec<[u32; 3]>,
  pub active_cells: usize,
}

/// Grid edge key: sample index of the lower end, times three, plus axis.
#[inline(always)]
pub(crate) fn edge_key(dims: [usize; 3], lower: [usize; 3], axis: usize) -> u64 {
  let sample = lower[0] + dims[0] * (lower[1] + dims[1] * lower[2]);
  sample as u64 * 3 + axis as u64
}

/// Crossing parameter along an edge from value `f0` to `f1` (opposite
/// signs).
#[inline]
pub(crate) fn crossing(field: &ScalarField, mode: InterpolationMode, f0: f64, f1: f64) -> f64 {
  let t = match mode {
    InterpolationMode::Linear => f0 / (f0 - f1),
    InterpolationMode::Indicator => {
      let (o0, o1) = (field.occupancy(f0), field.occupancy(f1));
      (o0 - 0.5) / (o0 - o1)
    }
  };
  if t.is_finite() {
    t.clamp(0.0, 1.0)
  } else {
    0.5
  }
}

pub(crate) fn extract_block(
  field: &ScalarField,
  shape: &GridShape,
  block: &Block,
  mode: InterpolationMode,
) -> Patch {
  let mut patch = Patch {
    block: block.index,
    ..Default::default()
  };
  let mut local: HashMap<u64, u32> = HashMap::new();

  for z in block.min[2]..block.max[2] {
    for y in block.min[1]..block.max[1] {
      for x in block.min[0]..block.max[0] {
        let mut values = [0.0f64; 8];
        let mut case = 0usize;
        for (corner, v) in values.iter_mut().enumerate() {
          let [cx, cy, cz] = corner_offset(corner as u8);
          *v = field.at(x + cx, y + cy, z + cz);
          if *v < 0.0 {
            case |= 1 << corner;
          }
        }
        if EDGE_TABLE[case] == 0 {
          continue;
        }
        patch.active_cells += 1;

        let mut ids = [u32::MAX; 12];
        for chunk in TRIANGLE_TABLE[case].chunks_exact(3) {
          if chunk[0] < 0 {
            break;
          }
          let mut face = [0u32; 3];
          for (slot, e) in face.iter_mut().zip(chunk) {
            let e = *e as usize;
            if ids[e] == u32::MAX {
              let [c0, c1] = EDGE_CORNERS[e];
              let o = corner_offset(c0);
              let lower = [x + o[0], y + o[1], z + o[2]];
              let axis = edge_axis(e);
              let key = edge_key(field.dims, lower, axis);
              ids[e] = *local.entry(key).or_insert_with(|| {
                let t = crossing(field, mode, values[c0 as usize], values[c1 as usize]);
                patch.vertices.push((key, edge_point(shape, lower, axis, t)));
                (patch.vertices.len() - 1) as u32
              });
            }
            *slot = ids[e];
          }
          patch.faces.push(face);
        }
      }
    }
  }
  patch
}
