use super::*;
use crate::foundation::color::Color;
use crate::foundation::core::Canvas;
use crate::scene::design::Background;
use crate::scene::layer::TextLayer;

fn blank() -> DesignState {
    DesignState::new(Background::Solid {
        color: Color::rgb(1, 2, 3),
        canvas: Canvas::new(4, 4).unwrap(),
    })
}

#[test]
fn newer_ticket_supersedes_older() {
    let mut ex = Exporter::default();
    let mut fonts = FontBook::new();
    let old = ex.begin();
    let new = ex.begin();
    assert!(old.is_superseded());
    assert!(!new.is_superseded());

    let err = ex.export(&blank(), &mut fonts, &old).unwrap_err();
    assert!(matches!(err, TypestampError::Cancelled(_)));
    let img = ex.export(&blank(), &mut fonts, &new).unwrap();
    assert_eq!(img.premul_bytes()[..4], [1, 2, 3, 255]);
}

#[test]
fn export_png_is_native_resolution() {
    let mut ex = Exporter::default();
    let mut fonts = FontBook::new();
    let ticket = ex.begin();
    let png = ex.export_png(&blank(), &mut fonts, &ticket).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
}

#[test]
fn failed_stamp_leaves_design_untouched() {
    let (design, id) = blank().with_layer_added(TextLayer {
        font_family: "Not Loaded".into(),
        ..TextLayer::new("x")
    });
    let mut ex = Exporter::default();
    let mut fonts = FontBook::new();
    let ticket = ex.begin();
    let err = ex.stamp_into(&design, &mut fonts, &[id], &ticket).unwrap_err();
    assert!(matches!(err, TypestampError::ResourceUnready(_)));
    assert_eq!(design.layers().len(), 1);
}

#[test]
fn empty_stamp_replaces_background_with_itself() {
    let design = blank();
    let mut ex = Exporter::default();
    let mut fonts = FontBook::new();
    let ticket = ex.begin();
    let out = ex.stamp_into(&design, &mut fonts, &[], &ticket).unwrap();
    match out.background() {
        Background::Image(img) => assert_eq!(img.premul_bytes()[..4], [1, 2, 3, 255]),
        Background::Solid { .. } => panic!("stamp must install an image background"),
    }
}
