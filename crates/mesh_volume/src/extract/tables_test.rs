use super::*;

#[test]
fn test_edge_table_homogeneous() {
  assert_eq!(EDGE_TABLE[0], 0, "All outside should have no edges");
  assert_eq!(EDGE_TABLE[255], 0, "All inside should have no edges");
  assert_eq!(triangle_count(0), 0);
  assert_eq!(triangle_count(255), 0);
}

#[test]
fn test_single_corner_cases() {
  for corner in 0..8 {
    let case = 1usize << corner;
    assert_eq!(EDGE_TABLE[case].count_ones(), 3, "corner {corner}");
    assert_eq!(triangle_count(case), 1, "corner {corner}");
  }
}

#[test]
fn test_edge_table_symmetry() {
  for i in 0..128 {
    assert_eq!(EDGE_TABLE[i], EDGE_TABLE[255 - i], "cases {} and {}", i, 255 - i);
  }
}

#[test]
fn test_triangles_only_use_crossing_edges() {
  for case in 0..256 {
    let row = &TRIANGLE_TABLE[case];
    let used = row.iter().take_while(|e| **e >= 0).count();
    assert_eq!(used % 3, 0, "case {case} has a partial triangle");
    assert!(row[used..].iter().all(|e| *e == -1), "case {case} padding");

    let mut mask = 0u16;
    for e in &row[..used] {
      mask |= 1 << *e;
    }
    assert_eq!(mask, EDGE_TABLE[case], "case {case} edge set");
  }
}

#[test]
fn test_edge_corners_follow_axis() {
  for (edge, [a, b]) in EDGE_CORNERS.iter().enumerate() {
    let pa = corner_offset(*a);
    let pb = corner_offset(*b);
    let axis = edge_axis(edge);
    for k in 0..3 {
      if k == axis {
        assert_eq!((pa[k], pb[k]), (0, 1), "edge {edge}");
      } else {
        assert_eq!(pa[k], pb[k], "edge {edge}");
      }
    }
  }
}

#[test]
fn test_single_corner_winds_away_from_inside() {
  // Corner 0 inside: the triangle normal must point toward +X+Y+Z.
  let row = &TRIANGLE_TABLE[1];
  let mid = |e: i8| {
    let [a, b] = EDGE_CORNERS[e as usize];
    let pa = corner_offset(a);
    let pb = corner_offset(b);
    [
      (pa[0] + pb[0]) as f64 * 0.5,
      (pa[1] + pb[1]) as f64 * 0.5,
      (pa[2] + pb[2]) as f64 * 0.5,
    ]
  };
  let (p0, p1, p2) = (mid(row[0]), mid(row[1]), mid(row[2]));
  let u = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
  let v = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];
  let n = [
    u[1] * v[2] - u[2] * v[1],
    u[2] * v[0] - u[0] * v[2],
    u[0] * v[1] - u[1] * v[0],
  ];
  assert!(n[0] + n[1] + n[2] > 0.0, "normal {n:?}");
}
