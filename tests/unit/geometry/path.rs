use super::*;

fn pts(v: &[(f64, f64)]) -> Vec<Point> {
    v.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn smoothing_zero_iterations_is_identity() {
    let p = pts(&[(0.0, 0.0), (10.0, 20.0), (20.0, 0.0), (30.0, 5.0)]);
    assert_eq!(smooth_points(&p, 0), p);
}

#[test]
fn smoothing_short_paths_is_identity() {
    let p = pts(&[(0.0, 0.0), (10.0, 20.0)]);
    assert_eq!(smooth_points(&p, 5), p);
}

#[test]
fn smoothing_keeps_endpoints_and_flattens_corners() {
    let p = pts(&[(0.0, 0.0), (10.0, 20.0), (20.0, 0.0)]);
    let s = smooth_points(&p, 1);
    assert_eq!(s[0], p[0]);
    assert_eq!(s[2], p[2]);
    assert!((s[1].x - 10.0).abs() < 1e-9);
    assert!((s[1].y - 14.0).abs() < 1e-9);

    let s8 = smooth_points(&p, 8);
    assert!(s8[1].y < s[1].y);
    assert_eq!(s8[0], p[0]);
    assert_eq!(s8[2], p[2]);
}

#[test]
fn bounds_center_is_box_center() {
    let p = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (10.0, 4.0)]);
    let b = PathBounds::of(&p).unwrap();
    assert_eq!(b.center(), Point::new(5.0, 2.0));
    assert!(PathBounds::of(&[]).is_none());
}

#[test]
fn arc_table_interpolates_within_segments() {
    let t = ArcLengthTable::new(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
    assert!((t.len() - 20.0).abs() < 1e-9);

    let s = t.sample(5.0).unwrap();
    assert!((s.point.x - 5.0).abs() < 1e-9);
    assert!(s.tangent_deg.abs() < 1e-9);

    let s = t.sample(15.0).unwrap();
    assert!((s.point.x - 10.0).abs() < 1e-9);
    assert!((s.point.y - 5.0).abs() < 1e-9);
    assert!((s.tangent_deg - 90.0).abs() < 1e-9);

    assert!(t.sample(0.0).is_some());
    assert!(t.sample(20.0).is_some());
    assert!(t.sample(-0.01).is_none());
    assert!(t.sample(20.01).is_none());
}

#[test]
fn arc_table_skips_duplicate_points() {
    let t = ArcLengthTable::new(&pts(&[(0.0, 0.0), (0.0, 0.0), (4.0, 0.0)]));
    let s = t.sample(2.0).unwrap();
    assert!((s.point.x - 2.0).abs() < 1e-9);
    assert!(s.point.x.is_finite() && s.tangent_deg.is_finite());
}
