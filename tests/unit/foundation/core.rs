use super::*;

#[test]
fn direction_popup_roundtrip_and_fallback() {
    for d in [Direction::Both, Direction::Forward, Direction::Backward] {
        assert_eq!(Direction::from_popup(d.popup_index()), d);
    }
    assert_eq!(Direction::from_popup(0), Direction::Both);
    assert_eq!(Direction::from_popup(7), Direction::Both);
}

#[test]
fn direction_serde_is_snake_case() {
    let s = serde_json::to_string(&Direction::Backward).unwrap();
    assert_eq!(s, "\"backward\"");
    let d: Direction = serde_json::from_str("\"forward\"").unwrap();
    assert_eq!(d, Direction::Forward);
}

#[test]
fn ratio_reduction_rejects_degenerate_values() {
    assert_eq!(Ratio::ONE.reduction(), Some(1.0));
    assert_eq!(Ratio::new(1, 2).reduction(), Some(2.0));
    assert_eq!(Ratio::new(0, 2).reduction(), None);
    assert_eq!(Ratio::new(1, 0).reduction(), None);
    assert_eq!(Ratio::new(-1, 2).reduction(), None);
}

#[test]
fn downsample_uses_smaller_reduction() {
    let ds = Downsample::new(Ratio::new(1, 2), Ratio::new(1, 4));
    assert_eq!(ds.factor(), Some(2.0));
    assert_eq!(Downsample::default().factor(), Some(1.0));
    let broken = Downsample::new(Ratio::new(1, 0), Ratio::ONE);
    assert_eq!(broken.factor(), None);
}

#[test]
fn origin_maps_output_to_input() {
    let o = Origin::new(3, 5);
    assert_eq!(o.to_input(3, 5), Point::new(0.0, 0.0));
    assert_eq!(o.to_input(0, 0), Point::new(-3.0, -5.0));
}
