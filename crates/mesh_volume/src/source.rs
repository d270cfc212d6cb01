//! Triangle producer and consumer boundaries.
//!
//! Producers are plain iterators: anything implementing
//! `IntoIterator<Item = Triangle>` can be rasterized. It is pulled once,
//! front to back.
//!
//! Consumers implement [`TriangleSink`]. Downstream writers (STL and friends)
//! plug in here; the crate itself never writes a file format.
//!
//! Attributed producers yield [`AttributedTriangle`]s: geometry plus a
//! fixed-size attribute vector per vertex (colour, material weights).

use glam::DVec3;

use crate::geometry::Triangle;

/// Consumer of a triangle stream.
pub trait TriangleSink {
  fn add_triangle(&mut self, a: DVec3, b: DVec3, c: DVec3);
}

impl TriangleSink for Vec<Triangle> {
  fn add_triangle(&mut self, a: DVec3, b: DVec3, c: DVec3) {
    self.push(Triangle::new(a, b, c));
  }
}

/// Triangle with an `N`-component attribute vector at each vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttributedTriangle<const N: usize> {
  pub triangle: Triangle,
  /// Attributes at `a`, `b` and `c`.
  pub attributes: [[f64; N]; 3],
}

impl<const N: usize> AttributedTriangle<N> {
  pub fn new(triangle: Triangle, attributes: [[f64; N]; 3]) -> Self {
    Self {
      triangle,
      attributes,
    }
  }

  /// Same attributes on all three vertices.
  pub fn uniform(triangle: Triangle, value: [f64; N]) -> Self {
    Self::new(triangle, [value; 3])
  }

  /// Attributes interpolated at the point of the triangle closest to `p`.
  pub fn attributes_at(&self, p: DVec3) -> [f64; N] {
    let (closest, _) = self.triangle.closest_point(p);
    let w = self.triangle.barycentric(closest);
    let [a, b, c] = &self.attributes;
    std::array::from_fn(|i| w.x * a[i] + w.y * b[i] + w.z * c[i])
  }
}

/// Push every triangle of `source` into `sink`. Returns the number of
/// triangles forwarded.
pub fn drain_into<I, S>(source: I, sink: &mut S) -> usize
where
  I: IntoIterator<Item = Triangle>,
  S: TriangleSink + ?Sized,
{
  let mut count = 0;
  for tri in source {
    sink.add_triangle(tri.a, tri.b, tri.c);
    count += 1;
  }
  count
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_drain_into_vec() {
    let tris = [
      Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y),
      Triangle::new(DVec3::Z, DVec3::X, DVec3::Y),
    ];
    let mut sink: Vec<Triangle> = Vec::new();
    let n = drain_into(tris, &mut sink);
    assert_eq!(n, 2);
    assert_eq!(sink, tris.to_vec());
  }

  #[test]
  fn test_attributes_follow_closest_point() {
    let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y);
    let attributed = AttributedTriangle::new(tri, [[1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]);

    let at_b = attributed.attributes_at(DVec3::new(3.0, -1.0, 0.5));
    assert!((at_b[0] - 0.0).abs() < 1e-12);
    assert!((at_b[1] - 1.0).abs() < 1e-12);

    // Above the midpoint of ab.
    let mid = attributed.attributes_at(DVec3::new(0.5, 0.0, 2.0));
    assert!((mid[0] - 0.5).abs() < 1e-12);
    assert!((mid[1] - 0.5).abs() < 1e-12);

    let flat = AttributedTriangle::uniform(tri, [0.25]);
    assert!((flat.attributes_at(DVec3::splat(0.2))[0] - 0.25).abs() < 1e-12);
  }
}
