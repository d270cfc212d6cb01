//! Triangle primitives used by the rasterizer.
//!
//! - closest point on a triangle with its Voronoi feature (face, edge, vertex)
//! - signed point-triangle distance
//! - triangle / box overlap by the separating axis theorem

use glam::DVec3;

use crate::bounds::Bounds;

/// Triangle in world coordinates, counter-clockwise seen from outside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
  pub a: DVec3,
  pub b: DVec3,
  pub c: DVec3,
}

/// Feature of a triangle that holds the closest point to a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
  /// Interior of the face.
  Face,
  /// Edge `i` (0 = ab, 1 = bc, 2 = ca).
  Edge(u8),
  /// Vertex `i` (0 = a, 1 = b, 2 = c).
  Vertex(u8),
}

impl Triangle {
  pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
    Self { a, b, c }
  }

  /// Unnormalized face normal (length is twice the area).
  #[inline]
  pub fn cross(&self) -> DVec3 {
    (self.b - self.a).cross(self.c - self.a)
  }

  /// Unit face normal, `None` for degenerate triangles.
  pub fn normal(&self) -> Option<DVec3> {
    self.cross().try_normalize()
  }

  pub fn area(&self) -> f64 {
    0.5 * self.cross().length()
  }

  /// True when the area is below `epsilon`.
  pub fn is_degenerate(&self, epsilon: f64) -> bool {
    !(self.area() > epsilon)
  }

  pub fn bounds(&self) -> Bounds {
    Bounds::new(
      self.a.min(self.b).min(self.c),
      self.a.max(self.b).max(self.c),
    )
  }

  /// Closest point of the triangle to `p` and the feature it lies on.
  pub fn closest_point(&self, p: DVec3) -> (DVec3, Feature) {
    let (a, b, c) = (self.a, self.b, self.c);
    let ab = b - a;
    let ac = c - a;

    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
      return (a, Feature::Vertex(0));
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
      return (b, Feature::Vertex(1));
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
      let v = d1 / (d1 - d3);
      return (a + ab * v, Feature::Edge(0));
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
      return (c, Feature::Vertex(2));
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
      let w = d2 / (d2 - d6);
      return (a + ac * w, Feature::Edge(2));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
      let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
      return (b + (c - b) * w, Feature::Edge(1));
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    (a + ab * v + ac * w, Feature::Face)
  }

  /// Barycentric weights `(a, b, c)` of `p` projected onto the plane of
  /// the triangle. Degenerate triangles weigh the corners equally.
  pub fn barycentric(&self, p: DVec3) -> DVec3 {
    let v0 = self.b - self.a;
    let v1 = self.c - self.a;
    let v2 = p - self.a;
    let (d00, d01, d11) = (v0.dot(v0), v0.dot(v1), v1.dot(v1));
    let (d20, d21) = (v2.dot(v0), v2.dot(v1));
    let denom = d00 * d11 - d01 * d01;
    if !(denom > f64::EPSILON * d00 * d11) {
      return DVec3::splat(1.0 / 3.0);
    }
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    DVec3::new(1.0 - v - w, v, w)
  }

  /// Signed distance from `p` to the triangle.
  ///
  /// Magnitude is the exact Euclidean distance to the closest point. The
  /// sign is negative when `p` lies behind the face (against the normal).
  /// A point on the triangle has distance `0.0`.
  pub fn signed_distance(&self, p: DVec3) -> f64 {
    let (closest, _) = self.closest_point(p);
    let offset = p - closest;
    let dist = offset.length();
    if offset.dot(self.cross()) < 0.0 {
      -dist
    } else {
      dist
    }
  }
}

/// Separating axis test between a triangle and an axis-aligned box.
///
/// Tests the 3 box normals, the triangle normal and the 9 cross products of
/// box axes with triangle edges. Touching counts as overlap.
pub fn triangle_box_overlap(center: DVec3, half: DVec3, tri: &Triangle) -> bool {
  let v0 = tri.a - center;
  let v1 = tri.b - center;
  let v2 = tri.c - center;

  // Box normals.
  let lo = v0.min(v1).min(v2);
  let hi = v0.max(v1).max(v2);
  if lo.x > half.x || hi.x < -half.x {
    return false;
  }
  if lo.y > half.y || hi.y < -half.y {
    return false;
  }
  if lo.z > half.z || hi.z < -half.z {
    return false;
  }

  // Triangle normal.
  let e0 = v1 - v0;
  let e1 = v2 - v1;
  let e2 = v0 - v2;
  let n = e0.cross(e1);
  let r = half.dot(n.abs());
  if n.dot(v0).abs() > r {
    return false;
  }

  // Box axis × edge.
  for edge in [e0, e1, e2] {
    for axis in [DVec3::X, DVec3::Y, DVec3::Z] {
      let a = axis.cross(edge);
      let p0 = a.dot(v0);
      let p1 = a.dot(v1);
      let p2 = a.dot(v2);
      let r = half.dot(a.abs());
      if p0.min(p1).min(p2) > r || p0.max(p1).max(p2) < -r {
        return false;
      }
    }
  }

  true
}

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;
