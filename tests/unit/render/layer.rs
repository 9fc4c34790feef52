use super::*;

fn plain_layer() -> TextLayer {
    TextLayer {
        has_shadow: false,
        ..TextLayer::new("Hi")
    }
}

fn kinds(passes: &[GlyphPass]) -> Vec<PassKind> {
    passes.iter().map(|p| p.kind).collect()
}

#[test]
fn plain_layer_is_a_single_fill() {
    let passes = plan_passes(&plain_layer(), 100.0, &RenderOpts::default());
    assert_eq!(kinds(&passes), vec![PassKind::Fill]);
    assert_eq!(passes[0].paint, PassPaint::Solid(Color::WHITE));
    assert_eq!(passes[0].shape, PassShape::Fill);
}

#[test]
fn passes_follow_the_fixed_order() {
    let layer = TextLayer {
        has_shadow: true,
        has_outline: true,
        special_effect: SpecialEffect::Echo,
        ..plain_layer()
    };
    let passes = plan_passes(&layer, 100.0, &RenderOpts::default());
    let k = kinds(&passes);
    let mut sorted = k.clone();
    sorted.sort();
    assert_eq!(k, sorted);
    assert_eq!(k.first(), Some(&PassKind::Shadow));
    assert_eq!(k.last(), Some(&PassKind::Fill));
    assert_eq!(k.iter().filter(|&&p| p == PassKind::Echo).count(), 5);
}

#[test]
fn shadow_geometry_scales_with_font_size() {
    let layer = TextLayer {
        has_shadow: true,
        shadow_offset: 5.0,
        shadow_angle: 0.0,
        shadow_blur: 10.0,
        ..plain_layer()
    };
    // fontPx 100 => scale 2
    let passes = plan_passes(&layer, 100.0, &RenderOpts::default());
    let shadow = passes[0];
    assert_eq!(shadow.kind, PassKind::Shadow);
    assert!((shadow.offset.x - 10.0).abs() < 1e-9);
    assert!(shadow.offset.y.abs() < 1e-9);
    assert!((shadow.blur_sigma - 5.0).abs() < 1e-9);
}

#[test]
fn shadowless_family_skips_shadow() {
    let layer = TextLayer {
        has_shadow: true,
        font_family: "Bungee Shade".to_owned(),
        ..plain_layer()
    };
    let passes = plan_passes(&layer, 50.0, &RenderOpts::default());
    assert_eq!(kinds(&passes), vec![PassKind::Fill]);

    let opts = RenderOpts::default().with_shadowless_families(Vec::<String>::new());
    let passes = plan_passes(&layer, 50.0, &opts);
    assert_eq!(passes[0].kind, PassKind::Shadow);
}

#[test]
fn echo_copies_fade_in_toward_the_text() {
    let layer = TextLayer {
        special_effect: SpecialEffect::Echo,
        effect_intensity: 100.0,
        effect_angle: 90.0,
        ..plain_layer()
    };
    let passes = plan_passes(&layer, 100.0, &RenderOpts::default());
    let echoes: Vec<_> = passes.iter().filter(|p| p.kind == PassKind::Echo).collect();
    // unit = 100/100 * 100 * 0.1 = 10
    assert!((echoes[0].offset.y - 50.0).abs() < 1e-9);
    assert!((echoes[4].offset.y - 10.0).abs() < 1e-9);
    let alphas: Vec<u8> = echoes
        .iter()
        .map(|p| match p.paint {
            PassPaint::Solid(c) => c.a,
            PassPaint::Gradient { .. } => 0,
        })
        .collect();
    assert!(alphas.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn two_tone_glitch_uses_screen_and_opposite_offsets() {
    let layer = TextLayer {
        special_effect: SpecialEffect::Glitch,
        ..plain_layer()
    };
    let passes = plan_passes(&layer, 100.0, &RenderOpts::default());
    let glitch: Vec<_> = passes.iter().filter(|p| p.kind == PassKind::Glitch).collect();
    assert_eq!(glitch.len(), 2);
    assert!(glitch.iter().all(|p| p.blend == BlendMode::Screen));
    assert!((glitch[0].offset.x + glitch[1].offset.x).abs() < 1e-9);
    assert_eq!(glitch[0].paint, PassPaint::Solid(layer.effect_color));
    assert_eq!(glitch[1].paint, PassPaint::Solid(layer.effect_color2));
}

#[test]
fn rainbow_glitch_blend_depends_on_lights() {
    let layer = TextLayer {
        special_effect: SpecialEffect::Glitch,
        is_rainbow_glitch: true,
        ..plain_layer()
    };
    let passes = plan_passes(&layer, 100.0, &RenderOpts::default());
    let glitch: Vec<_> = passes.iter().filter(|p| p.kind == PassKind::Glitch).collect();
    assert_eq!(glitch.len(), 8);
    assert!(glitch.iter().all(|p| p.blend == BlendMode::Normal));
    // Symmetric spread around the glyph.
    assert!((glitch[0].offset.x + glitch[7].offset.x).abs() < 1e-9);

    let lit = TextLayer {
        is_rainbow_lights: true,
        ..layer
    };
    let passes = plan_passes(&lit, 100.0, &RenderOpts::default());
    assert!(
        passes
            .iter()
            .filter(|p| p.kind == PassKind::Glitch)
            .all(|p| p.blend == BlendMode::Screen)
    );
}

#[test]
fn gradient_fill_and_hollow_stroke() {
    let layer = TextLayer {
        special_effect: SpecialEffect::Gradient,
        effect_angle: 90.0,
        ..plain_layer()
    };
    let passes = plan_passes(&layer, 40.0, &RenderOpts::default());
    match passes[0].paint {
        PassPaint::Gradient {
            angle_deg, length, ..
        } => {
            assert!(angle_deg.abs() < 1e-9);
            assert!((length - 400.0).abs() < 1e-9);
        }
        PassPaint::Solid(_) => panic!("expected gradient fill"),
    }

    let hollow = TextLayer {
        is_hollow: true,
        ..plain_layer()
    };
    let passes = plan_passes(&hollow, 20.0, &RenderOpts::default());
    assert_eq!(passes[0].shape, PassShape::Stroke { width: 1.0 });
    let passes = plan_passes(&hollow, 200.0, &RenderOpts::default());
    assert_eq!(passes[0].shape, PassShape::Stroke { width: 4.0 });
}

#[test]
fn outline_width_is_scaled() {
    let layer = TextLayer {
        has_outline: true,
        outline_width: 3.0,
        ..plain_layer()
    };
    let passes = plan_passes(&layer, 25.0, &RenderOpts::default());
    assert_eq!(passes[0].kind, PassKind::Outline);
    assert_eq!(passes[0].shape, PassShape::Stroke { width: 1.5 });
}

#[test]
fn standard_layout_wrapper_places_origin_at_anchor() {
    let canvas = Canvas::new(200, 100).unwrap();
    let layer = TextLayer {
        overlay_position: crate::foundation::core::Point::new(25.0, 50.0),
        rotation: 90.0,
        ..plain_layer()
    };
    let layout = TextLayout::empty(LayoutSpace::Local, 10.0);
    let t = layer_transform(&layer, &layout, canvas);
    let origin = t * crate::foundation::core::Point::ZERO;
    assert!((origin.x - 50.0).abs() < 1e-9 && (origin.y - 50.0).abs() < 1e-9);
    let right = t * crate::foundation::core::Point::new(1.0, 0.0);
    assert!((right.x - 50.0).abs() < 1e-9 && (right.y - 51.0).abs() < 1e-9);

    let abs = TextLayout::empty(LayoutSpace::Absolute, 10.0);
    assert_eq!(layer_transform(&layer, &abs, canvas), Affine::IDENTITY);
}
