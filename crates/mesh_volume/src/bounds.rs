//! World bounds and voxel grid addressing.
//!
//! [`Bounds`] is a double-precision axis-aligned box in meters.
//! [`GridShape`] fixes a voxel size and the grid dimensions derived from it,
//! and converts between world space and voxel coordinates.

use glam::DVec3;

use crate::error::{Result, VolumeError};
use crate::geometry::Triangle;
use crate::source::TriangleSink;

/// Double-precision axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Minimum corner (inclusive).
	pub min: DVec3,
	/// Maximum corner (inclusive).
	pub max: DVec3,
}

impl Bounds {
	/// Create a new box from min and max corners.
	///
	/// # Panics
	/// Debug-asserts that min <= max on all axes.
	pub fn new(min: DVec3, max: DVec3) -> Self {
		debug_assert!(
			min.x <= max.x && min.y <= max.y && min.z <= max.z,
			"Bounds min must be <= max on all axes"
		);
		Self { min, max }
	}

	/// Create a box from center and half-extents.
	pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
		Self {
			min: center - half_extents,
			max: center + half_extents,
		}
	}

	/// Inverted box, ready for [`Bounds::encapsulate`].
	pub fn empty() -> Self {
		Self {
			min: DVec3::splat(f64::INFINITY),
			max: DVec3::splat(f64::NEG_INFINITY),
		}
	}

	/// Grow the box to include a point.
	#[inline]
	pub fn encapsulate(&mut self, point: DVec3) {
		self.min = self.min.min(point);
		self.max = self.max.max(point);
	}

	/// Finite and min <= max on all axes.
	pub fn is_valid(&self) -> bool {
		self.min.is_finite()
			&& self.max.is_finite()
			&& self.min.x <= self.max.x
			&& self.min.y <= self.max.y
			&& self.min.z <= self.max.z
	}

	/// Box grown by `margin` on every side.
	pub fn expand(&self, margin: f64) -> Self {
		Self {
			min: self.min - DVec3::splat(margin),
			max: self.max + DVec3::splat(margin),
		}
	}

	/// Check if this box overlaps another (touching counts).
	#[inline]
	pub fn overlaps(&self, other: &Bounds) -> bool {
		self.min.x <= other.max.x
			&& self.max.x >= other.min.x
			&& self.min.y <= other.max.y
			&& self.max.y >= other.min.y
			&& self.min.z <= other.max.z
			&& self.max.z >= other.min.z
	}

	/// Check if this box contains a point.
	#[inline]
	pub fn contains_point(&self, point: DVec3) -> bool {
		point.x >= self.min.x
			&& point.x <= self.max.x
			&& point.y >= self.min.y
			&& point.y <= self.max.y
			&& point.z >= self.min.z
			&& point.z <= self.max.z
	}

	/// Size of the box (max - min).
	#[inline]
	pub fn size(&self) -> DVec3 {
		self.max - self.min
	}

	/// Center of the box.
	#[inline]
	pub fn center(&self) -> DVec3 {
		(self.min + self.max) * 0.5
	}
}

impl Default for Bounds {
	fn default() -> Self {
		Self::empty()
	}
}

/// Bounding-box pre-pass over a triangle source.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundsCollector {
	bounds: Bounds,
	triangles: usize,
}

impl BoundsCollector {
	pub fn new() -> Self {
		Self::default()
	}

	/// Collect bounds of every triangle in `source`.
	pub fn collect<I: IntoIterator<Item = Triangle>>(source: I) -> Self {
		let mut collector = Self::new();
		for tri in source {
			collector.add_triangle(tri.a, tri.b, tri.c);
		}
		collector
	}

	/// Accumulated bounds (`None` when no triangle was seen).
	pub fn bounds(&self) -> Option<Bounds> {
		if self.triangles == 0 {
			None
		} else {
			Some(self.bounds)
		}
	}

	/// Number of triangles seen.
	pub fn triangle_count(&self) -> usize {
		self.triangles
	}
}

impl TriangleSink for BoundsCollector {
	fn add_triangle(&mut self, a: DVec3, b: DVec3, c: DVec3) {
		self.bounds.encapsulate(a);
		self.bounds.encapsulate(b);
		self.bounds.encapsulate(c);
		self.triangles += 1;
	}
}

/// Voxel lattice over a box: bounds, uniform voxel size and dimensions.
///
/// Samples sit at voxel centers. Linear index is `x + nx * (y + ny * z)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridShape {
	bounds: Bounds,
	voxel_size: f64,
	dims: [usize; 3],
}

impl GridShape {
	/// Build a lattice covering `bounds`.
	///
	/// Dimensions are `round(extent / voxel_size)` (at least one voxel per
	/// axis); the max corner is moved to match whole voxels. Fails before
	/// any allocation when the cell count exceeds `max_cells`.
	pub fn new(bounds: Bounds, voxel_size: f64, max_cells: u64) -> Result<Self> {
		if !voxel_size.is_finite() || voxel_size <= 0.0 {
			return Err(VolumeError::InvalidVoxelSize(voxel_size));
		}
		if !bounds.is_valid() {
			return Err(VolumeError::InvalidBounds {
				min: bounds.min.to_array(),
				max: bounds.max.to_array(),
			});
		}

		let size = bounds.size();
		let dim = |extent: f64| ((extent / voxel_size).round() as usize).max(1);
		let dims = [dim(size.x), dim(size.y), dim(size.z)];

		let requested = (dims[0] as u64)
			.saturating_mul(dims[1] as u64)
			.saturating_mul(dims[2] as u64);
		if requested > max_cells {
			return Err(VolumeError::CapacityExceeded {
				requested,
				limit: max_cells,
			});
		}

		let max = bounds.min
			+ DVec3::new(dims[0] as f64, dims[1] as f64, dims[2] as f64) * voxel_size;
		Ok(Self {
			bounds: Bounds::new(bounds.min, max),
			voxel_size,
			dims,
		})
	}

	/// Lattice for a mesh: grows `mesh_bounds` by one voxel margin plus
	/// `padding` on every side and centers the whole-voxel grid on it.
	pub fn for_mesh(
		mesh_bounds: Bounds,
		voxel_size: f64,
		padding: f64,
		max_cells: u64,
	) -> Result<Self> {
		if !voxel_size.is_finite() || voxel_size <= 0.0 {
			return Err(VolumeError::InvalidVoxelSize(voxel_size));
		}
		if !mesh_bounds.is_valid() || !padding.is_finite() || padding < 0.0 {
			return Err(VolumeError::InvalidBounds {
				min: mesh_bounds.min.to_array(),
				max: mesh_bounds.max.to_array(),
			});
		}

		let grown = mesh_bounds.expand(voxel_size + padding);
		let size = grown.size();
		let whole = |extent: f64| ((extent / voxel_size).round()).max(1.0) * voxel_size;
		let half = DVec3::new(whole(size.x), whole(size.y), whole(size.z)) * 0.5;
		Self::new(
			Bounds::from_center_half_extents(grown.center(), half),
			voxel_size,
			max_cells,
		)
	}

	#[inline]
	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	#[inline]
	pub fn voxel_size(&self) -> f64 {
		self.voxel_size
	}

	#[inline]
	pub fn dims(&self) -> [usize; 3] {
		self.dims
	}

	/// Total number of voxels.
	#[inline]
	pub fn cell_count(&self) -> usize {
		self.dims[0] * self.dims[1] * self.dims[2]
	}

	/// Linear index of voxel (x, y, z).
	#[inline(always)]
	pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
		x + self.dims[0] * (y + self.dims[1] * z)
	}

	/// Voxel coordinates of a linear index.
	#[inline]
	pub fn coords(&self, index: usize) -> [usize; 3] {
		let x = index % self.dims[0];
		let yz = index / self.dims[0];
		[x, yz % self.dims[1], yz / self.dims[1]]
	}

	/// True when signed voxel coordinates fall inside the grid.
	#[inline]
	pub fn contains(&self, x: i64, y: i64, z: i64) -> bool {
		x >= 0
			&& y >= 0
			&& z >= 0
			&& (x as usize) < self.dims[0]
			&& (y as usize) < self.dims[1]
			&& (z as usize) < self.dims[2]
	}

	/// Voxel containing a world point, clamped to the grid.
	pub fn world_to_grid(&self, point: DVec3) -> [usize; 3] {
		let rel = (point - self.bounds.min) / self.voxel_size;
		let clamp = |v: f64, n: usize| (v.floor().max(0.0) as usize).min(n - 1);
		[
			clamp(rel.x, self.dims[0]),
			clamp(rel.y, self.dims[1]),
			clamp(rel.z, self.dims[2]),
		]
	}

	/// Continuous sample coordinates of a world point (voxel centers are
	/// integral). Not clamped.
	#[inline]
	pub fn world_to_sample(&self, point: DVec3) -> DVec3 {
		(point - self.bounds.min) / self.voxel_size - DVec3::splat(0.5)
	}

	/// World position of a voxel center.
	#[inline]
	pub fn grid_to_world(&self, x: usize, y: usize, z: usize) -> DVec3 {
		self.sample_to_world(DVec3::new(x as f64, y as f64, z as f64))
	}

	/// World position of continuous sample coordinates.
	#[inline]
	pub fn sample_to_world(&self, sample: DVec3) -> DVec3 {
		self.bounds.min + (sample + DVec3::splat(0.5)) * self.voxel_size
	}
}
