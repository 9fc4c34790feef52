use super::*;
use crate::foundation::core::Point;
use crate::layout::{FixedAdvance, FontRequest};

fn params(text: &str, points: Vec<Point>, align: TextAlign) -> LayoutParams {
    LayoutParams {
        text: text.to_owned(),
        font: FontRequest::new("Test", 400, false),
        font_px: 10.0,
        letter_spacing: 0.0,
        letter_rotation: 0.0,
        align,
        path_points: points,
        path_smoothing: 0,
    }
}

fn assert_near(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

fn line(len: f64) -> Vec<Point> {
    vec![Point::new(0.0, 50.0), Point::new(len, 50.0)]
}

#[test]
fn degenerate_paths_lay_out_nothing() {
    let m = &mut FixedAdvance::new(1.0);
    assert!(path_layout(&params("abc", vec![], TextAlign::Left), m).is_empty());
    assert!(path_layout(&params("abc", vec![Point::new(3.0, 3.0)], TextAlign::Left), m).is_empty());
}

#[test]
fn left_aligned_glyphs_start_at_half_width() {
    let l = path_layout(&params("abcd", line(100.0), TextAlign::Left), &mut FixedAdvance::new(1.0));
    assert_eq!(l.glyphs.len(), 4);
    for (g, x) in l.glyphs.iter().zip([5.0, 15.0, 25.0, 35.0]) {
        assert_near(g.x, x);
        assert_near(g.y, 50.0);
        assert_near(g.rotation_deg, 0.0);
    }
    assert_eq!(l.space, LayoutSpace::Absolute);
}

#[test]
fn center_and_right_offsets() {
    let m = &mut FixedAdvance::new(1.0);
    let c = path_layout(&params("ab", line(100.0), TextAlign::Center), m);
    assert_near(c.glyphs[0].x, 45.0);
    assert_near(c.glyphs[1].x, 55.0);

    let r = path_layout(&params("ab", line(100.0), TextAlign::Right), m);
    assert_near(r.glyphs[0].x, 85.0);
    assert_near(r.glyphs[1].x, 95.0);
}

#[test]
fn overflow_drops_characters_at_both_ends() {
    let m = &mut FixedAdvance::new(1.0);
    // 6 chars * 10 px on a 30 px path.
    let left = path_layout(&params("abcdef", line(30.0), TextAlign::Left), m);
    assert_eq!(left.glyphs.iter().map(|g| g.ch).collect::<String>(), "abc");

    let center = path_layout(&params("abcdef", line(30.0), TextAlign::Center), m);
    // Centers run -10, 0, 10, 20, 30, 40; both path ends are inclusive.
    assert_eq!(center.glyphs.iter().map(|g| g.ch).collect::<String>(), "bcde");
    assert!(center.glyphs.iter().all(|g| (0.0..=30.0).contains(&g.x)));
}

#[test]
fn rotation_follows_tangent_plus_letter_rotation() {
    let mut p = params(
        "ab",
        vec![Point::new(0.0, 0.0), Point::new(0.0, 100.0)],
        TextAlign::Left,
    );
    p.letter_rotation = 10.0;
    let l = path_layout(&p, &mut FixedAdvance::new(1.0));
    assert!(l.glyphs.iter().all(|g| (g.rotation_deg - 100.0).abs() < 1e-9));
    assert_near(l.glyphs[1].y, 15.0);
}

#[test]
fn newlines_become_spaces() {
    let l = path_layout(&params("a\nb", line(100.0), TextAlign::Left), &mut FixedAdvance::new(1.0));
    assert_eq!(l.glyphs.iter().map(|g| g.ch).collect::<String>(), "a b");
}

#[test]
fn spacing_is_excluded_after_the_last_glyph() {
    let mut p = params("ab", line(100.0), TextAlign::Right);
    p.letter_spacing = 4.0;
    let l = path_layout(&p, &mut FixedAdvance::new(1.0));
    // text width = 10 + 10 + 4; starts at 76.
    assert_near(l.glyphs[0].x, 81.0);
    assert_near(l.glyphs[1].x, 95.0);
}
