use super::*;

#[test]
fn test_rejects_bad_layouts() {
  assert!(GridDataChannel::new(ChannelKind::Density, 0, 0, 0.0, 1.0).is_err());
  assert!(GridDataChannel::new(ChannelKind::Density, 0, 33, 0.0, 1.0).is_err());
  assert!(GridDataChannel::new(ChannelKind::Density, 40, 32, 0.0, 1.0).is_err());
  assert!(GridDataChannel::new(ChannelKind::Density, 0, 8, 1.0, 1.0).is_err());
  assert!(GridDataChannel::new(ChannelKind::Density, 0, 8, 0.0, f64::INFINITY).is_err());
}

#[test]
fn test_pack_end_points() {
  let ch = GridDataChannel::density(8).unwrap();
  assert_eq!(ch.max_code(), 255);
  assert_eq!(ch.pack(0.0), 0);
  assert_eq!(ch.pack(1.0), 255);
  assert_eq!(ch.pack(0.5), 128);
}

#[test]
fn test_pack_saturates() {
  let ch = GridDataChannel::density(8).unwrap();
  assert_eq!(ch.pack(-3.0), 0);
  assert_eq!(ch.pack(7.0), 255);
}

#[test]
fn test_pack_is_monotonic() {
  let ch = GridDataChannel::distance(10, 1.0, 2.0, 0.1).unwrap();
  let mut prev = 0;
  for i in 0..=400 {
    let v = -1.5 + i as f64 * 0.01;
    let code = ch.pack(v);
    assert!(code >= prev, "pack must not decrease at {}", v);
    prev = code;
  }
}

#[test]
fn test_unpack_within_half_step() {
  let ch = GridDataChannel::distance(16, 0.05, 0.05, 0.002).unwrap();
  let half = ch.resolution() * 0.5 + 1e-15;
  for i in 0..=100 {
    let v = -0.05 + i as f64 * 0.001;
    let back = ch.unpack(ch.pack(v));
    assert!((back - v).abs() <= half, "{} -> {}", v, back);
  }
}

#[test]
fn test_distance_sentinels_lie_beyond_band() {
  let ch = GridDataChannel::distance(16, 0.05, 0.04, 0.002).unwrap();
  assert!(ch.unpack(ch.inside_default()) < -0.05);
  assert!(ch.unpack(ch.outside_default()) > 0.04);
  assert_eq!(ch.iso_value(), 0.0);
  assert!(ch.signed_offset(-0.01) < 0.0);
}

#[test]
fn test_density_sentinels() {
  let ch = GridDataChannel::density(4).unwrap();
  assert_eq!(ch.inside_default(), 15);
  assert_eq!(ch.outside_default(), 0);
  assert_eq!(ch.iso_value(), 0.5);
  // Density above one half is inside.
  assert!(ch.signed_offset(0.9) < 0.0);
  assert!(ch.signed_offset(0.1) > 0.0);
}

#[test]
fn test_channels_share_a_word() {
  let distance = GridDataChannel::distance(16, 1.0, 1.0, 0.1).unwrap();
  let density = GridDataChannel::density(8).unwrap().with_shift(16).unwrap();
  assert!(!distance.overlaps(&density));

  let mut word = 0u64;
  word = distance.set_value(word, 0.25);
  word = density.set_bits(word, 200);
  assert_eq!(density.get_bits(word), 200);
  assert_eq!(distance.get_bits(word), distance.pack(0.25));

  // Rewriting one channel leaves the other untouched.
  word = distance.set_bits(word, 7);
  assert_eq!(density.get_bits(word), 200);
  assert_eq!(distance.get_bits(word), 7);
}

#[test]
fn test_overlap_detection() {
  let a = GridDataChannel::density(8).unwrap();
  let b = GridDataChannel::density(8).unwrap().with_shift(4).unwrap();
  assert!(a.overlaps(&b));
}

#[test]
fn test_kind_tags_roundtrip() {
  for kind in [
    ChannelKind::Distance,
    ChannelKind::Density,
    ChannelKind::Attribute(0),
    ChannelKind::Attribute(15),
  ] {
    assert_eq!(ChannelKind::from_tag(kind.tag()), Some(kind));
  }
  assert_eq!(ChannelKind::from_tag(200), None);
}

#[test]
fn test_attribute_channel() {
  let red = GridDataChannel::attribute(0, 8, 0.0, 1.0).unwrap();
  assert_eq!(red.kind(), ChannelKind::Attribute(0));
  assert_eq!(red.pack(1.0), 255);
  assert_eq!(red.inside_default(), 0);
  assert_eq!(red.outside_default(), 0);
  assert!(GridDataChannel::attribute(16, 8, 0.0, 1.0).is_err());

  let green = GridDataChannel::attribute(1, 8, 0.0, 1.0).unwrap().with_shift(8).unwrap();
  assert!(!red.overlaps(&green));
}
