use super::*;
use crate::foundation::core::Ratio;

fn params(shift: f64, direction: Direction) -> StretchParams {
    StretchParams {
        anchor: [10, 20],
        angle_deg: 0.0,
        shift,
        direction,
        downsample: Downsample::default(),
    }
}

#[test]
fn angle_wraps_into_one_turn() {
    assert_eq!(normalize_angle(45.0), 45.0);
    assert_eq!(normalize_angle(405.0), 45.0);
    assert_eq!(normalize_angle(-90.0), 270.0);
    assert_eq!(normalize_angle(720.0), 0.0);
    assert_eq!(normalize_angle(f64::NAN), 0.0);
}

#[test]
fn zero_angle_cuts_horizontally_and_shifts_vertically() {
    let g = StretchGeometry::new(&params(10.0, Direction::Forward));
    assert!((g.perpendicular.x).abs() < 1e-12);
    assert!((g.perpendicular.y - 1.0).abs() < 1e-12);
    assert!((g.parallel.x - 1.0).abs() < 1e-12);
    assert_eq!(g.shift, Vec2::new(-0.0, 10.0));
    assert_eq!(g.distance(Point::new(99.0, 25.0)), 5.0);
    assert_eq!(g.border_point(Point::new(3.0, 50.0)), Point::new(3.0, 20.0));
}

#[test]
fn both_mode_halves_the_shift() {
    let g = StretchGeometry::new(&params(50.0, Direction::Both));
    assert_eq!(g.effective_shift, 25.0);
    let g = StretchGeometry::new(&params(50.0, Direction::Backward));
    assert_eq!(g.effective_shift, 50.0);
}

#[test]
fn downsample_scales_shift_into_render_pixels() {
    let mut p = params(40.0, Direction::Forward);
    p.downsample = Downsample::new(Ratio::new(1, 2), Ratio::new(1, 2));
    assert_eq!(effective_shift(&p), 20.0);
}

#[test]
fn degenerate_inputs_collapse_to_identity() {
    let mut p = params(40.0, Direction::Forward);
    p.downsample = Downsample::new(Ratio::new(0, 1), Ratio::ONE);
    assert!(StretchGeometry::new(&p).is_identity());

    let p = params(f64::INFINITY, Direction::Forward);
    assert!(StretchGeometry::new(&p).is_identity());

    let p = params(0.015, Direction::Both);
    assert!(StretchGeometry::new(&p).is_identity());

    let p = params(-5.0, Direction::Forward);
    assert!(StretchGeometry::new(&p).is_identity());

    let p = params(0.02, Direction::Forward);
    assert!(!StretchGeometry::new(&p).is_identity());
}

#[test]
fn border_point_lies_on_cut_line() {
    let mut p = params(10.0, Direction::Both);
    p.angle_deg = 30.0;
    let g = StretchGeometry::new(&p);
    for (x, y) in [(0.0, 0.0), (55.5, -3.0), (-12.0, 80.0)] {
        let b = g.border_point(Point::new(x, y));
        assert!(g.distance(b).abs() < 1e-9);
    }
}

#[test]
fn displacements_follow_direction() {
    let g = StretchGeometry::new(&params(10.0, Direction::Both));
    assert_eq!(g.displacements(), vec![g.shift, -g.shift]);
    let g = StretchGeometry::new(&params(10.0, Direction::Forward));
    assert_eq!(g.displacements(), vec![g.shift]);
    let g = StretchGeometry::new(&params(10.0, Direction::Backward));
    assert_eq!(g.displacements(), vec![-g.shift]);
}

#[test]
fn params_deserialize_with_defaults() {
    let p: StretchParams =
        serde_json::from_str(r#"{ "anchor": [32, 32], "shift": 50.0 }"#).unwrap();
    assert_eq!(p.anchor, [32, 32]);
    assert_eq!(p.shift, 50.0);
    assert_eq!(p.direction, Direction::Both);
    assert_eq!(p.downsample, Downsample::default());
}

#[test]
fn tiny_negative_angles_wrap_to_zero() {
    assert_eq!(normalize_angle(-1e-17), 0.0);
    assert_eq!(normalize_angle(-360.0), 0.0);
    assert!(normalize_angle(-1e-9) < 360.0);
}
