use super::*;

fn square() -> Canvas {
    Canvas::new(100, 100).unwrap()
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn translation_converts_pixels_to_percent() {
    let canvas = Canvas::new(200, 100).unwrap();
    let layer = TextLayer::new("x");
    let out = translated(&layer, Vec2::new(20.0, 10.0), canvas);
    assert!(close(out.overlay_position, Point::new(60.0, 60.0)));
}

#[test]
fn path_move_mode_translates_points_instead() {
    let layer = TextLayer {
        path_points: vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
        is_path_move_mode: true,
        ..TextLayer::new("x")
    };
    let out = translated(&layer, Vec2::new(10.0, 0.0), square());
    assert_eq!(out.path_points, vec![Point::new(11.0, 2.0), Point::new(13.0, 4.0)]);
    assert_eq!(out.overlay_position, layer.overlay_position);
}

#[test]
fn scale_clamps_text_size() {
    let opts = InteractionOpts::default();
    let layer = TextLayer::new("x");
    let pivot = layer.anchor_px(square());
    assert_eq!(scaled(&layer, pivot, 1e9, square(), &opts).text_size, 50.0);
    assert_eq!(scaled(&layer, pivot, 0.0, square(), &opts).text_size, 0.1);
    let nan = scaled(&layer, pivot, f64::NAN, square(), &opts);
    assert_eq!(nan.text_size, layer.text_size);
    assert!(nan.overlay_position.x.is_finite());
}

#[test]
fn group_scale_orbits_the_shared_pivot() {
    let opts = InteractionOpts::default();
    let other = TextLayer {
        overlay_position: Point::new(70.0, 50.0),
        ..TextLayer::new("x")
    };
    let out = scaled(&other, Point::new(50.0, 50.0), 2.0, square(), &opts);
    assert!(close(out.overlay_position, Point::new(90.0, 50.0)));
    assert_eq!(out.text_size, 20.0);
}

#[test]
fn rotation_wraps_into_range() {
    let layer = TextLayer::new("x");
    let pivot = layer.anchor_px(square());
    let out = rotated(&layer, pivot, 370.0, square());
    assert!((out.rotation - 10.0).abs() < 1e-9);
    let out = rotated(&layer, pivot, -30.0, square());
    assert!((out.rotation - 330.0).abs() < 1e-9);
}

#[test]
fn group_rotation_orbits_the_primary_anchor() {
    let other = TextLayer {
        overlay_position: Point::new(70.0, 50.0),
        ..TextLayer::new("x")
    };
    let out = rotated(&other, Point::new(50.0, 50.0), 90.0, square());
    assert!(close(out.overlay_position, Point::new(50.0, 70.0)));
    assert!((out.rotation - 90.0).abs() < 1e-9);
}

#[test]
fn pointer_geometry_helpers() {
    let o = Point::ORIGIN;
    assert!((scale_ratio(o, Point::new(10.0, 0.0), Point::new(0.0, 25.0)) - 2.5).abs() < 1e-12);
    assert_eq!(scale_ratio(o, o, Point::new(5.0, 5.0)), 1.0);

    let start = Point::new(1.0, 0.0);
    let cur = Point::new(52f64.to_radians().cos(), 52f64.to_radians().sin());
    assert!((rotation_delta(o, start, cur, None) - 52.0).abs() < 1e-9);
    assert!((rotation_delta(o, start, cur, Some(15.0)) - 45.0).abs() < 1e-9);
}
