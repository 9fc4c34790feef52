use super::*;

fn one(dst: [u8; 4], src: [u8; 4], opacity: f32, mode: BlendMode) -> [u8; 4] {
    let mut d = dst.to_vec();
    composite_in_place(&mut d, &src, opacity, mode).unwrap();
    [d[0], d[1], d[2], d[3]]
}

#[test]
fn normal_over_opaque() {
    assert_eq!(one([0, 0, 255, 255], [255, 0, 0, 255], 1.0, BlendMode::Normal), [255, 0, 0, 255]);
    assert_eq!(one([0, 0, 255, 255], [128, 0, 0, 128], 1.0, BlendMode::Normal), [128, 0, 127, 255]);
}

#[test]
fn zero_opacity_never_changes_dst() {
    let dst = [10, 20, 30, 200];
    for mode in BlendMode::ALL {
        assert_eq!(one(dst, [255, 255, 255, 255], 0.0, mode), dst, "{mode:?}");
    }
}

#[test]
fn transparent_dst_takes_source_for_every_mode() {
    for mode in BlendMode::ALL {
        assert_eq!(
            one([0, 0, 0, 0], [40, 80, 120, 255], 1.0, mode),
            [40, 80, 120, 255],
            "{mode:?}"
        );
    }
}

#[test]
fn separable_modes_on_opaque_pixels() {
    let d = [128, 128, 128, 255];
    let s = [255, 0, 128, 255];
    assert_eq!(one(d, s, 1.0, BlendMode::Multiply), [128, 0, 64, 255]);
    assert_eq!(one(d, s, 1.0, BlendMode::Screen), [255, 128, 192, 255]);
    assert_eq!(one(d, s, 1.0, BlendMode::Darken), [128, 0, 128, 255]);
    assert_eq!(one(d, s, 1.0, BlendMode::Lighten), [255, 128, 128, 255]);
    assert_eq!(one(d, s, 1.0, BlendMode::Difference), [127, 128, 0, 255]);
}

#[test]
fn dodge_and_burn_extremes() {
    assert_eq!(
        one([0, 0, 0, 255], [255, 255, 255, 255], 1.0, BlendMode::ColorDodge),
        [0, 0, 0, 255]
    );
    assert_eq!(
        one([255, 255, 255, 255], [0, 0, 0, 255], 1.0, BlendMode::ColorBurn),
        [255, 255, 255, 255]
    );
}

#[test]
fn luminosity_and_color_are_complementary() {
    let d = [200, 40, 40, 255];
    let s = [40, 200, 40, 255];
    let lum_px = one(d, s, 1.0, BlendMode::Luminosity);
    let color_px = one(d, s, 1.0, BlendMode::Color);
    // Luminosity keeps the red hue of dst; Color keeps the green hue of src.
    assert!(lum_px[0] > lum_px[1]);
    assert!(color_px[1] > color_px[0]);
}

#[test]
fn hue_of_gray_source_desaturates() {
    let out = one([200, 40, 40, 255], [128, 128, 128, 255], 1.0, BlendMode::Hue);
    assert_eq!(out[0], out[1]);
    assert_eq!(out[1], out[2]);
    let out = one([200, 40, 40, 255], [128, 128, 128, 255], 1.0, BlendMode::Saturation);
    assert_eq!(out[0], out[1]);
}

#[test]
fn length_mismatch_is_an_error() {
    let mut d = vec![0u8; 8];
    assert!(composite_in_place(&mut d, &[0u8; 4], 1.0, BlendMode::Screen).is_err());
}
