//! Implicit octree over the voxels a triangle can reach.
//!
//! The root is the smallest power-of-two voxel cube covering the triangle's
//! bounds dilated by the influence radius. Nodes are value types computed
//! on demand; a node is visited only if its box, grown by the radius,
//! still intersects the triangle.
//!
//! ```text
//!   root (lod 3, 8³ voxels)
//!    ├─ child 0..7 (lod 2, 4³)       pruned by SAT(box + radius, tri)
//!    │   └─ ...
//!    └─ leaf (side ≤ leaf_size)      exact distance at each voxel center
//! ```

use glam::DVec3;

use super::accumulator::{Contribution, SparseAccumulator};
use super::RasterParams;
use crate::bounds::GridShape;
use crate::geometry::{triangle_box_overlap, Triangle};

/// Voxel cube of side `2^lod` starting at `origin`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct RasterNode {
  pub origin: [i64; 3],
  pub lod: u32,
}

impl RasterNode {
  #[inline]
  pub fn side(&self) -> i64 {
    1 << self.lod
  }

  /// Child octant: bit 0 = +X half, bit 1 = +Y half, bit 2 = +Z half.
  /// `None` for single-voxel nodes.
  pub fn child(&self, octant: u8) -> Option<Self> {
    if self.lod == 0 {
      return None;
    }
    let half = self.side() / 2;
    Some(Self {
      origin: [
        self.origin[0] + (octant & 1) as i64 * half,
        self.origin[1] + ((octant >> 1) & 1) as i64 * half,
        self.origin[2] + ((octant >> 2) & 1) as i64 * half,
      ],
      lod: self.lod - 1,
    })
  }
}

/// Voxel index range `[lo, hi]` (inclusive) of one triangle.
#[derive(Clone, Copy, Debug)]
struct Footprint {
  lo: [i64; 3],
  hi: [i64; 3],
}

/// Offer the signed distance of triangle `index` to every voxel center
/// within the influence band.
pub(crate) fn rasterize_triangle(
  shape: &GridShape,
  params: &RasterParams,
  tri: &Triangle,
  index: u32,
  acc: &mut SparseAccumulator,
) {
  let radius = params.max_in.max(params.max_out);
  let Some(footprint) = footprint(shape, tri, radius) else {
    return;
  };

  let extent = (0..3)
    .map(|k| footprint.hi[k] - footprint.lo[k] + 1)
    .max()
    .unwrap_or(1) as u64;
  let root = RasterNode {
    origin: footprint.lo,
    lod: extent.next_power_of_two().trailing_zeros(),
  };

  let mut stack = vec![root];
  while let Some(node) = stack.pop() {
    let side = node.side();
    let lo = [0, 1, 2].map(|k| node.origin[k].max(footprint.lo[k]));
    let hi = [0, 1, 2].map(|k| (node.origin[k] + side - 1).min(footprint.hi[k]));
    if (0..3).any(|k| lo[k] > hi[k]) {
      continue;
    }

    let voxel = shape.voxel_size();
    let min = shape.bounds().min + DVec3::new(lo[0] as f64, lo[1] as f64, lo[2] as f64) * voxel;
    let max = shape.bounds().min
      + DVec3::new(
        (hi[0] + 1) as f64,
        (hi[1] + 1) as f64,
        (hi[2] + 1) as f64,
      ) * voxel;
    // Voxel centers sit half a voxel inside the node box.
    let half = (max - min) * 0.5 - DVec3::splat(voxel * 0.5) + DVec3::splat(radius);
    if !triangle_box_overlap((min + max) * 0.5, half, tri) {
      continue;
    }

    if side as usize <= params.leaf_size.max(1) {
      evaluate_leaf(shape, params, tri, index, lo, hi, acc);
      continue;
    }
    // Reverse octant order keeps the pop order x-fastest.
    for octant in (0..8).rev() {
      if let Some(child) = node.child(octant) {
        stack.push(child);
      }
    }
  }
}

fn evaluate_leaf(
  shape: &GridShape,
  params: &RasterParams,
  tri: &Triangle,
  index: u32,
  lo: [i64; 3],
  hi: [i64; 3],
  acc: &mut SparseAccumulator,
) {
  for z in lo[2]..=hi[2] {
    for y in lo[1]..=hi[1] {
      for x in lo[0]..=hi[0] {
        let (x, y, z) = (x as usize, y as usize, z as usize);
        let d = tri.signed_distance(shape.grid_to_world(x, y, z));
        if d >= -params.max_in && d <= params.max_out {
          acc.offer(
            shape.index(x, y, z),
            Contribution {
              distance: d,
              triangle: index,
            },
          );
        }
      }
    }
  }
}

/// Voxels whose centers fall inside the dilated triangle bounds, clipped
/// to the grid. `None` when the triangle cannot reach the grid.
fn footprint(shape: &GridShape, tri: &Triangle, radius: f64) -> Option<Footprint> {
  let b = tri.bounds().expand(radius);
  let s_min = shape.world_to_sample(b.min);
  let s_max = shape.world_to_sample(b.max);
  let dims = shape.dims();

  let mut lo = [0i64; 3];
  let mut hi = [0i64; 3];
  for k in 0..3 {
    let n = dims[k] as i64;
    lo[k] = (s_min[k].ceil() as i64).max(0);
    hi[k] = (s_max[k].floor() as i64).min(n - 1);
    if lo[k] > hi[k] {
      return None;
    }
  }
  Some(Footprint { lo, hi })
}
