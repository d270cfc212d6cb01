use super::*;

fn unit_triangle() -> Triangle {
  // Lies in z = 0, normal +Z.
  Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y)
}

#[test]
fn test_normal_and_area() {
  let tri = unit_triangle();
  assert_eq!(tri.normal(), Some(DVec3::Z));
  assert!((tri.area() - 0.5).abs() < 1e-12);
  assert!(!tri.is_degenerate(1e-12));
}

#[test]
fn test_degenerate() {
  let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::X * 2.0);
  assert!(tri.is_degenerate(1e-12));
  assert!(tri.normal().is_none());

  let point = Triangle::new(DVec3::ONE, DVec3::ONE, DVec3::ONE);
  assert!(point.is_degenerate(0.0));
}

#[test]
fn test_closest_point_face() {
  let tri = unit_triangle();
  let (p, feature) = tri.closest_point(DVec3::new(0.25, 0.25, 2.0));
  assert_eq!(feature, Feature::Face);
  assert!((p - DVec3::new(0.25, 0.25, 0.0)).length() < 1e-12);
}

#[test]
fn test_closest_point_vertices() {
  let tri = unit_triangle();
  assert_eq!(
    tri.closest_point(DVec3::new(-1.0, -1.0, 0.5)),
    (DVec3::ZERO, Feature::Vertex(0))
  );
  assert_eq!(
    tri.closest_point(DVec3::new(2.0, -0.5, 0.0)),
    (DVec3::X, Feature::Vertex(1))
  );
  assert_eq!(
    tri.closest_point(DVec3::new(-0.5, 2.0, 0.0)),
    (DVec3::Y, Feature::Vertex(2))
  );
}

#[test]
fn test_closest_point_edges() {
  let tri = unit_triangle();

  let (p, f) = tri.closest_point(DVec3::new(0.5, -1.0, 0.0));
  assert_eq!(f, Feature::Edge(0));
  assert!((p - DVec3::new(0.5, 0.0, 0.0)).length() < 1e-12);

  let (p, f) = tri.closest_point(DVec3::new(1.0, 1.0, 0.0));
  assert_eq!(f, Feature::Edge(1));
  assert!((p - DVec3::new(0.5, 0.5, 0.0)).length() < 1e-12);

  let (p, f) = tri.closest_point(DVec3::new(-1.0, 0.5, 0.0));
  assert_eq!(f, Feature::Edge(2));
  assert!((p - DVec3::new(0.0, 0.5, 0.0)).length() < 1e-12);
}

#[test]
fn test_signed_distance_sign_follows_normal() {
  let tri = unit_triangle();
  let above = tri.signed_distance(DVec3::new(0.2, 0.2, 0.5));
  let below = tri.signed_distance(DVec3::new(0.2, 0.2, -0.5));
  assert!((above - 0.5).abs() < 1e-12);
  assert!((below + 0.5).abs() < 1e-12);
  assert_eq!(tri.signed_distance(DVec3::new(0.2, 0.2, 0.0)), 0.0);
}

#[test]
fn test_signed_distance_edge_region_is_exact() {
  let tri = unit_triangle();
  // Closest point is vertex a; distance is to the vertex, not the plane.
  let d = tri.signed_distance(DVec3::new(-3.0, -4.0, 0.0));
  assert!((d - 5.0).abs() < 1e-12);
}

#[test]
fn test_box_overlap_contains_triangle() {
  let tri = unit_triangle();
  assert!(triangle_box_overlap(DVec3::splat(0.25), DVec3::splat(0.1), &tri));
}

#[test]
fn test_box_overlap_separated_by_box_axis() {
  let tri = unit_triangle();
  assert!(!triangle_box_overlap(DVec3::new(0.25, 0.25, 1.0), DVec3::splat(0.5), &tri));
  assert!(!triangle_box_overlap(DVec3::new(3.0, 0.0, 0.0), DVec3::splat(0.5), &tri));
}

#[test]
fn test_box_overlap_separated_by_edge_axis() {
  let tri = unit_triangle();
  // Box sits just past the hypotenuse: only the edge cross axis separates.
  let center = DVec3::new(0.75, 0.75, 0.0);
  assert!(!triangle_box_overlap(center, DVec3::splat(0.2), &tri));
  assert!(triangle_box_overlap(center, DVec3::splat(0.3), &tri));
}

#[test]
fn test_box_overlap_tilted_triangle_plane() {
  let tri = Triangle::new(
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(4.0, 0.0, 4.0),
    DVec3::new(0.0, 4.0, 4.0),
  );
  // Box corner region far below the plane z = x + y, inside the triangle's
  // projected footprint.
  assert!(!triangle_box_overlap(DVec3::new(2.0, 1.0, 0.5), DVec3::splat(0.4), &tri));
  assert!(triangle_box_overlap(DVec3::new(1.0, 1.0, 2.0), DVec3::splat(0.4), &tri));
}

#[test]
fn test_barycentric_weights() {
  let tri = Triangle::new(DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0), DVec3::new(0.0, 2.0, 0.0));
  assert!((tri.barycentric(tri.a) - DVec3::X).length() < 1e-12);
  assert!((tri.barycentric(tri.c) - DVec3::Z).length() < 1e-12);

  let w = tri.barycentric(DVec3::new(1.0, 0.5, 3.0));
  assert!((w - DVec3::new(0.25, 0.5, 0.25)).length() < 1e-12);

  let flat = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::X * 2.0);
  assert_eq!(flat.barycentric(DVec3::Y), DVec3::splat(1.0 / 3.0));
}
