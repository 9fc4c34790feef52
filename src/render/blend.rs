use crate::foundation::error::{TypestampError, TypestampResult};
use crate::foundation::math::mul_div255_u8;
use crate::scene::layer::BlendMode;

/// Composite premultiplied `src` over `dst` with `opacity` and `mode`.
///
/// Both buffers are tightly packed RGBA8 of identical length.
pub fn composite_in_place(
    dst: &mut [u8],
    src: &[u8],
    opacity: f32,
    mode: BlendMode,
) -> TypestampResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TypestampError::render(
            "composite_in_place expects equal-length rgba8 buffers",
        ));
    }
    let opacity = if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        0.0
    };

    // Mode dispatch happens once per call; each arm monomorphizes its own pixel loop.
    match mode {
        BlendMode::Normal => {
            premul_over_in_place_opacity(dst, src, opacity);
            Ok(())
        }
        BlendMode::Multiply => separable(dst, src, opacity, |s, d| s * d),
        BlendMode::Screen => separable(dst, src, opacity, |s, d| s + d - s * d),
        BlendMode::Overlay => separable(dst, src, opacity, |s, d| hard_light(d, s)),
        BlendMode::Darken => separable(dst, src, opacity, f32::min),
        BlendMode::Lighten => separable(dst, src, opacity, f32::max),
        BlendMode::ColorDodge => separable(dst, src, opacity, |s, d| {
            if d <= 0.0 {
                0.0
            } else if s >= 1.0 {
                1.0
            } else {
                (d / (1.0 - s)).min(1.0)
            }
        }),
        BlendMode::ColorBurn => separable(dst, src, opacity, |s, d| {
            if d >= 1.0 {
                1.0
            } else if s <= 0.0 {
                0.0
            } else {
                1.0 - ((1.0 - d) / s).min(1.0)
            }
        }),
        BlendMode::HardLight => separable(dst, src, opacity, hard_light),
        BlendMode::SoftLight => separable(dst, src, opacity, |s, d| {
            if s <= 0.5 {
                d - (1.0 - 2.0 * s) * d * (1.0 - d)
            } else {
                let g = if d <= 0.25 {
                    ((16.0 * d - 12.0) * d + 4.0) * d
                } else {
                    d.sqrt()
                };
                d + (2.0 * s - 1.0) * (g - d)
            }
        }),
        BlendMode::Difference => separable(dst, src, opacity, |s, d| (d - s).abs()),
        BlendMode::Exclusion => separable(dst, src, opacity, |s, d| d + s - 2.0 * d * s),
        BlendMode::Hue => blend_rgb(dst, src, opacity, |s, d| {
            set_lum(set_sat(s, sat(d)), lum(d))
        }),
        BlendMode::Saturation => blend_rgb(dst, src, opacity, |s, d| {
            set_lum(set_sat(d, sat(s)), lum(d))
        }),
        BlendMode::Color => blend_rgb(dst, src, opacity, |s, d| set_lum(s, lum(d))),
        BlendMode::Luminosity => blend_rgb(dst, src, opacity, |s, d| set_lum(d, lum(s))),
    }
}

/// Integer source-over, used for `Normal`.
pub(crate) fn premul_over_in_place_opacity(dst: &mut [u8], src: &[u8], opacity: f32) {
    let op = (opacity * 255.0).round().clamp(0.0, 255.0) as u16;
    if op == 0 {
        return;
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = mul_div255_u8(u16::from(s[3]), op);
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - u16::from(sa);

        d[3] = sa.saturating_add(mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            let sc = mul_div255_u8(u16::from(s[c]), op);
            let dc = mul_div255_u8(u16::from(d[c]), inv);
            d[c] = sc.saturating_add(dc);
        }
    }
}

fn hard_light(s: f32, d: f32) -> f32 {
    if s <= 0.5 {
        2.0 * s * d
    } else {
        1.0 - 2.0 * (1.0 - s) * (1.0 - d)
    }
}

#[inline(always)]
fn separable<F>(dst: &mut [u8], src: &[u8], opacity: f32, f: F) -> TypestampResult<()>
where
    F: Fn(f32, f32) -> f32,
{
    blend_rgb(dst, src, opacity, |s, d| {
        [f(s[0], d[0]), f(s[1], d[1]), f(s[2], d[2])]
    })
}

#[inline(always)]
fn blend_rgb<F>(dst: &mut [u8], src: &[u8], opacity: f32, blend_fn: F) -> TypestampResult<()>
where
    F: Fn([f32; 3], [f32; 3]) -> [f32; 3],
{
    if opacity <= 0.0 {
        return Ok(());
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        // Source-over with the blend applied to unpremultiplied colors:
        // out_a = sa + da * (1 - sa)
        // out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da
        let sa = f32::from(s[3]) / 255.0 * opacity;
        let da = f32::from(d[3]) / 255.0;
        let sp = [0, 1, 2].map(|c| f32::from(s[c]) / 255.0 * opacity);
        let dp = [0, 1, 2].map(|c| f32::from(d[c]) / 255.0);

        let sc = sp.map(|p| if sa > 0.0 { (p / sa).clamp(0.0, 1.0) } else { 0.0 });
        let dc = dp.map(|p| if da > 0.0 { (p / da).clamp(0.0, 1.0) } else { 0.0 });
        let b = blend_fn(sc, dc).map(|v| v.clamp(0.0, 1.0));

        let out_a = (sa + da * (1.0 - sa)).clamp(0.0, 1.0);
        for c in 0..3 {
            let out = (sp[c] * (1.0 - da) + dp[c] * (1.0 - sa) + b[c] * sa * da).clamp(0.0, 1.0);
            d[c] = (out * 255.0).round() as u8;
        }
        d[3] = (out_a * 255.0).round() as u8;
    }

    Ok(())
}

fn lum(c: [f32; 3]) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_color(c: [f32; 3]) -> [f32; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 && l - n > f32::EPSILON {
        out = out.map(|v| l + (v - l) * l / (l - n));
    }
    if x > 1.0 && x - l > f32::EPSILON {
        out = out.map(|v| l + (v - l) * (1.0 - l) / (x - l));
    }
    out
}

fn set_lum(c: [f32; 3], l: f32) -> [f32; 3] {
    let d = l - lum(c);
    clip_color(c.map(|v| v + d))
}

fn sat(c: [f32; 3]) -> f32 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn set_sat(c: [f32; 3], s: f32) -> [f32; 3] {
    let mut idx = [0usize, 1, 2];
    idx.sort_by(|&a, &b| c[a].total_cmp(&c[b]));
    let [min_i, mid_i, max_i] = idx;

    let mut out = [0.0f32; 3];
    let range = c[max_i] - c[min_i];
    if range > 0.0 {
        out[mid_i] = (c[mid_i] - c[min_i]) * s / range;
        out[max_i] = s;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
