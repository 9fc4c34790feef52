use super::*;
use serde_json::json;

#[test]
fn deserializes_camel_case_with_defaults() {
    let layer: TextLayer = serde_json::from_value(json!({
        "id": 7,
        "textOverlay": "Hi",
        "overlayPosition": { "x": 25.0, "y": 75.0 },
        "textAlign": "right",
        "blendMode": "color-dodge",
        "specialEffect": "echo",
        "textColor": "#ff0000"
    }))
    .unwrap();

    assert_eq!(layer.id, LayerId(7));
    assert_eq!(layer.text_overlay, "Hi");
    assert_eq!(layer.overlay_position, Point::new(25.0, 75.0));
    assert_eq!(layer.text_align, TextAlign::Right);
    assert_eq!(layer.blend_mode, BlendMode::ColorDodge);
    assert_eq!(layer.special_effect, SpecialEffect::Echo);
    assert_eq!(layer.text_color, Color::rgb(255, 0, 0));
    assert!(layer.has_shadow);
    assert!(layer.visible);
    assert_eq!(layer.opacity, 1.0);
}

#[test]
fn unknown_blend_mode_is_normal() {
    let layer: TextLayer = serde_json::from_value(json!({ "blendMode": "plus-darker" })).unwrap();
    assert_eq!(layer.blend_mode, BlendMode::Normal);
    assert_eq!(BlendMode::from_name("source-over"), BlendMode::Normal);
    assert_eq!(BlendMode::from_name("Soft-Light"), BlendMode::SoftLight);
}

#[test]
fn blend_names_are_unique() {
    let mut names: Vec<_> = BlendMode::ALL.iter().map(|m| m.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 16);
    for m in BlendMode::ALL {
        assert_eq!(BlendMode::from_name(m.name()), m);
    }
}

#[test]
fn font_px_is_percent_of_width() {
    let canvas = Canvas::new(1000, 400).unwrap();
    let layer = TextLayer::default();
    assert_eq!(layer.font_px(canvas), 100.0);
    assert_eq!(layer.px_scale(canvas), 2.0);
    assert_eq!(layer.anchor_px(canvas), Point::new(500.0, 200.0));
}

#[test]
fn uppercase_applies_to_display_text() {
    let mut layer = TextLayer::new("Hello\nworld");
    assert_eq!(layer.display_text(), "Hello\nworld");
    layer.is_uppercase = true;
    assert_eq!(layer.display_text(), "HELLO\nWORLD");
}

#[test]
fn path_modes_are_exclusive() {
    let mut layer = TextLayer::default();
    layer.set_path_mode(PathMode::Draw);
    assert!(layer.is_path_input_mode && !layer.is_path_move_mode);
    layer.set_path_mode(PathMode::Move);
    assert!(!layer.is_path_input_mode && layer.is_path_move_mode);

    layer.is_path_input_mode = true;
    layer.normalize_modes();
    assert_eq!(layer.path_mode(), PathMode::Draw);
    assert!(!layer.is_path_move_mode);
}

#[test]
fn variation_axes_override_bold_and_italic() {
    let mut layer = TextLayer {
        is_bold: true,
        is_italic: true,
        ..TextLayer::default()
    };
    assert_eq!(layer.font_request().weight, 700);
    assert!(layer.font_request().italic);

    layer.font_variations = Some([("wght".to_owned(), 300.0)].into_iter().collect());
    assert_eq!(layer.font_request().weight, 300);
    assert!(layer.font_request().italic);

    layer.font_variations = Some([("slnt".to_owned(), 0.0)].into_iter().collect());
    assert_eq!(layer.font_request().weight, 700);
    assert!(!layer.font_request().italic);

    layer.font_variations = Some([("slnt".to_owned(), -10.0)].into_iter().collect());
    layer.is_italic = false;
    assert!(layer.font_request().italic);
}
