//! Quadric error metric.
//!
//! A quadric accumulates squared distances to a set of planes
//! `n·x + d = 0` (unit `n`):
//!
//! ```text
//! Q(x) = Σ (n·x + d)²  =  xᵀ A x + 2 bᵀ x + c
//!
//! A = Σ n nᵀ     b = Σ d n     c = Σ d²
//! ```
//!
//! Planes carry unit weight, so `Q(x)` is never below the squared distance
//! from `x` to any single contributing plane.

use std::ops::{Add, AddAssign};

use glam::{DMat3, DVec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadric {
  a: DMat3,
  b: DVec3,
  c: f64,
}

impl Default for Quadric {
  fn default() -> Self {
    Self {
      a: DMat3::ZERO,
      b: DVec3::ZERO,
      c: 0.0,
    }
  }
}

impl Quadric {
  /// Quadric of the plane through `point` with unit `normal`.
  pub fn from_plane(normal: DVec3, point: DVec3) -> Self {
    let d = -normal.dot(point);
    Self {
      a: DMat3::from_cols(normal * normal.x, normal * normal.y, normal * normal.z),
      b: normal * d,
      c: d * d,
    }
  }

  /// Sum of squared plane distances at `p`.
  #[inline]
  pub fn evaluate(&self, p: DVec3) -> f64 {
    (p.dot(self.a * p) + 2.0 * self.b.dot(p) + self.c).max(0.0)
  }

  /// Minimizer of `Q`, or `None` when `A` is close to singular (flat or
  /// ridge-shaped neighbourhoods).
  pub fn optimal_point(&self) -> Option<DVec3> {
    let det = self.a.determinant();
    let scale = self.a.x_axis.x + self.a.y_axis.y + self.a.z_axis.z;
    if scale <= 0.0 || det.abs() <= 1.0e-9 * scale * scale * scale {
      return None;
    }
    let p = self.a.inverse() * -self.b;
    p.is_finite().then_some(p)
  }
}

impl Add for Quadric {
  type Output = Quadric;

  fn add(self, rhs: Quadric) -> Quadric {
    Quadric {
      a: self.a + rhs.a,
      b: self.b + rhs.b,
      c: self.c + rhs.c,
    }
  }
}

impl AddAssign for Quadric {
  fn add_assign(&mut self, rhs: Quadric) {
    *self = *self + rhs;
  }
}
