use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Canvas, Vec2};
use crate::foundation::error::{TypestampError, TypestampResult};
use crate::foundation::math::unit_vec;
use crate::layout::{GlyphPlacement, LayoutSpace, TextLayout};
use crate::render::blend::composite_in_place;
use crate::render::blur::blur_in_place;
use crate::render::surface_pool::SurfacePool;
use crate::render::{RenderOpts, affine_to_cpu};
use crate::scene::layer::{BlendMode, REFERENCE_FONT_PX, SpecialEffect, TextLayer};
use crate::text::fonts::{FaceId, FontBook, ShapedChar};

/// Canvas-shadow blur is matched to the CSS reference at half strength.
const SHADOW_BLUR_FACTOR: f64 = 0.5;
const ECHO_COPIES: u32 = 5;
const GLITCH_BLUR_PX: f64 = 1.0;
const RAINBOW_HUES: u32 = 8;
const RAINBOW_SPREAD: f64 = 3.0;
const HOLLOW_STROKE_EM: f64 = 0.02;
const GRADIENT_SPAN_EM: f64 = 10.0;
const GRADIENT_STEPS: u16 = 256;

/// Role of a pass in the fixed draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PassKind {
    Shadow,
    Echo,
    Glitch,
    Outline,
    Fill,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PassPaint {
    Solid(Color),
    /// Linear gradient in each glyph's own frame, centered on the glyph.
    Gradient {
        from: Color,
        to: Color,
        angle_deg: f64,
        length: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PassShape {
    Fill,
    Stroke { width: f64 },
}

/// One draw of every glyph in the layer, composited onto the layer's scratch surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPass {
    pub kind: PassKind,
    /// Image-space displacement.
    pub offset: Vec2,
    pub paint: PassPaint,
    pub shape: PassShape,
    /// Gaussian standard deviation in pixels; zero disables the blur.
    pub blur_sigma: f64,
    /// How the pass combines with earlier passes of the same layer.
    pub blend: BlendMode,
}

impl GlyphPass {
    fn solid(kind: PassKind, color: Color, shape: PassShape) -> Self {
        Self {
            kind,
            offset: Vec2::ZERO,
            paint: PassPaint::Solid(color),
            shape,
            blur_sigma: 0.0,
            blend: BlendMode::Normal,
        }
    }

    /// Plain passes can share one surface with their neighbours.
    fn is_plain(&self) -> bool {
        self.blur_sigma <= 0.0 && self.blend == BlendMode::Normal
    }
}

/// The ordered passes for one layer: shadow, effect copies, outline, fill.
pub fn plan_passes(layer: &TextLayer, font_px: f64, opts: &RenderOpts) -> Vec<GlyphPass> {
    let scale = font_px / REFERENCE_FONT_PX;
    let fill_shape = if layer.is_hollow {
        PassShape::Stroke {
            width: (font_px * HOLLOW_STROKE_EM).max(1.0),
        }
    } else {
        PassShape::Fill
    };

    let mut passes = Vec::new();

    if layer.has_shadow && opts.casts_shadow(&layer.font_family) {
        let sigma = layer.shadow_blur * scale * SHADOW_BLUR_FACTOR / 2.0;
        passes.push(GlyphPass {
            kind: PassKind::Shadow,
            offset: unit_vec(layer.shadow_angle) * (layer.shadow_offset * scale),
            paint: PassPaint::Solid(layer.shadow_color.with_opacity(layer.shadow_opacity)),
            shape: fill_shape,
            blur_sigma: finite_non_negative(sigma),
            blend: BlendMode::Normal,
        });
    }

    match layer.special_effect {
        SpecialEffect::Echo => echo_passes(layer, font_px, &mut passes),
        SpecialEffect::Glitch => glitch_passes(layer, font_px, scale, &mut passes),
        SpecialEffect::None | SpecialEffect::Gradient => {}
    }

    if layer.has_outline {
        passes.push(GlyphPass::solid(
            PassKind::Outline,
            layer.outline_color,
            PassShape::Stroke {
                width: finite_non_negative(layer.outline_width * scale),
            },
        ));
    }

    let fill_paint = if layer.special_effect == SpecialEffect::Gradient && !layer.is_hollow {
        PassPaint::Gradient {
            from: layer.text_color,
            to: layer.effect_color,
            angle_deg: layer.effect_angle - 90.0,
            length: font_px * GRADIENT_SPAN_EM,
        }
    } else {
        PassPaint::Solid(layer.text_color)
    };
    passes.push(GlyphPass {
        paint: fill_paint,
        ..GlyphPass::solid(PassKind::Fill, layer.text_color, fill_shape)
    });

    passes
}

fn effect_unit(layer: &TextLayer, font_px: f64) -> f64 {
    finite_non_negative(layer.effect_intensity / 100.0 * font_px * 0.1)
}

fn echo_passes(layer: &TextLayer, font_px: f64, out: &mut Vec<GlyphPass>) {
    let unit = effect_unit(layer, font_px);
    let dir = unit_vec(layer.effect_angle);
    for i in (1..=ECHO_COPIES).rev() {
        let alpha = f64::from(ECHO_COPIES + 1 - i) / f64::from(ECHO_COPIES + 1);
        out.push(GlyphPass {
            offset: dir * (f64::from(i) * unit),
            ..GlyphPass::solid(
                PassKind::Echo,
                layer.text_color.with_opacity(alpha),
                PassShape::Fill,
            )
        });
    }
}

fn glitch_passes(layer: &TextLayer, font_px: f64, scale: f64, out: &mut Vec<GlyphPass>) {
    let unit = effect_unit(layer, font_px);
    let dir = unit_vec(layer.effect_angle);
    let blend = if !layer.is_rainbow_glitch || layer.is_rainbow_lights {
        BlendMode::Screen
    } else {
        BlendMode::Normal
    };

    if layer.is_rainbow_glitch {
        let sigma = finite_non_negative(layer.rainbow_blur * scale);
        let mid = f64::from(RAINBOW_HUES - 1) / 2.0;
        for k in 0..RAINBOW_HUES {
            let hue = f64::from(k) * 360.0 / f64::from(RAINBOW_HUES);
            let spread = (f64::from(k) - mid) / mid * unit * RAINBOW_SPREAD;
            out.push(GlyphPass {
                kind: PassKind::Glitch,
                offset: dir * spread,
                paint: PassPaint::Solid(Color::from_hue(hue).with_opacity(layer.rainbow_opacity)),
                shape: PassShape::Fill,
                blur_sigma: sigma,
                blend,
            });
        }
    } else {
        for (sign, color) in [(1.0, layer.effect_color), (-1.0, layer.effect_color2)] {
            out.push(GlyphPass {
                kind: PassKind::Glitch,
                offset: dir * (sign * unit),
                paint: PassPaint::Solid(color),
                shape: PassShape::Fill,
                blur_sigma: GLITCH_BLUR_PX,
                blend,
            });
        }
    }
}

fn finite_non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Transform applied to every glyph of a standard-layout layer: anchor, rotation, flips.
/// Path layouts are already absolute.
pub(crate) fn layer_transform(layer: &TextLayer, layout: &TextLayout, canvas: Canvas) -> Affine {
    match layout.space {
        LayoutSpace::Absolute => Affine::IDENTITY,
        LayoutSpace::Local => layer.block_transform(canvas),
    }
}

struct PreparedGlyph {
    placement: GlyphPlacement,
    shaped: ShapedChar,
}

/// Executes pass plans with a reused vello_cpu context.
pub(crate) struct LayerPainter {
    ctx: Option<vello_cpu::RenderContext>,
    blur_tmp: Vec<u8>,
    gradients: HashMap<([u8; 4], [u8; 4]), vello_cpu::Image>,
}

impl LayerPainter {
    pub(crate) fn new() -> Self {
        Self {
            ctx: None,
            blur_tmp: Vec::new(),
            gradients: HashMap::new(),
        }
    }

    /// Render every pass of `layer` into `scratch`, which must be cleared and canvas-sized.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn paint(
        &mut self,
        pool: &mut SurfacePool,
        fonts: &mut FontBook,
        face: FaceId,
        layer: &TextLayer,
        layout: &TextLayout,
        canvas: Canvas,
        opts: &RenderOpts,
        scratch: &mut vello_cpu::Pixmap,
    ) -> TypestampResult<()> {
        let mut glyphs = Vec::with_capacity(layout.glyphs.len());
        for placement in &layout.glyphs {
            if placement.ch.is_whitespace() {
                continue;
            }
            glyphs.push(PreparedGlyph {
                placement: *placement,
                shaped: fonts.shape(face, placement.ch)?.clone(),
            });
        }
        if glyphs.is_empty() {
            return Ok(());
        }
        let font = fonts
            .font_data(face)
            .cloned()
            .ok_or_else(|| TypestampError::render(format!("face {face:?} has no font data")))?;

        let passes = plan_passes(layer, layout.font_px, opts);
        let wrapper = layer_transform(layer, layout, canvas);

        let mut surface = pool.borrow(canvas)?;
        let result = self.run_passes(
            &passes,
            &glyphs,
            &font,
            wrapper,
            layout.font_px,
            canvas,
            &mut surface,
            scratch,
        );
        pool.release(surface);
        result
    }

    #[allow(clippy::too_many_arguments)]
    fn run_passes(
        &mut self,
        passes: &[GlyphPass],
        glyphs: &[PreparedGlyph],
        font: &vello_cpu::peniko::FontData,
        wrapper: Affine,
        font_px: f64,
        canvas: Canvas,
        surface: &mut vello_cpu::Pixmap,
        scratch: &mut vello_cpu::Pixmap,
    ) -> TypestampResult<()> {
        let mut i = 0;
        while i < passes.len() {
            let mut end = i + 1;
            if passes[i].is_plain() {
                while end < passes.len() && passes[end].is_plain() {
                    end += 1;
                }
            }
            let group = &passes[i..end];
            self.draw_group(group, glyphs, font, wrapper, font_px, surface)?;

            let first = group[0];
            if first.blur_sigma > 0.0 {
                blur_in_place(
                    surface.data_as_u8_slice_mut(),
                    canvas.width,
                    canvas.height,
                    first.blur_sigma,
                    &mut self.blur_tmp,
                )?;
            }
            composite_in_place(
                scratch.data_as_u8_slice_mut(),
                surface.data_as_u8_slice(),
                1.0,
                first.blend,
            )?;
            i = end;
        }
        Ok(())
    }

    fn draw_group(
        &mut self,
        group: &[GlyphPass],
        glyphs: &[PreparedGlyph],
        font: &vello_cpu::peniko::FontData,
        wrapper: Affine,
        font_px: f64,
        surface: &mut vello_cpu::Pixmap,
    ) -> TypestampResult<()> {
        let (w, h) = (surface.width(), surface.height());
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        let mut result = Ok(());
        for pass in group {
            if let Err(err) = self.draw_pass(&mut ctx, pass, glyphs, font, wrapper, font_px) {
                result = Err(err);
                break;
            }
        }

        surface.data_as_u8_slice_mut().fill(0);
        ctx.flush();
        ctx.render_to_pixmap(surface);
        self.ctx = Some(ctx);
        result
    }

    fn draw_pass(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        pass: &GlyphPass,
        glyphs: &[PreparedGlyph],
        font: &vello_cpu::peniko::FontData,
        wrapper: Affine,
        font_px: f64,
    ) -> TypestampResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match pass.paint {
            PassPaint::Solid(color) => ctx.set_paint(color.to_cpu()),
            PassPaint::Gradient {
                from,
                to,
                angle_deg,
                length,
            } => {
                let image = self.gradient_image(from, to)?;
                ctx.set_paint(image);
                ctx.set_paint_transform(affine_to_cpu(gradient_paint_transform(
                    angle_deg, length,
                )));
            }
        }
        if let PassShape::Stroke { width } = pass.shape {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        }

        let base = Affine::translate(pass.offset) * wrapper;
        let size = font_px as f32;
        for g in glyphs {
            let p = &g.placement;
            let t = base
                * Affine::translate((p.x, p.y))
                * Affine::rotate(p.rotation_deg.to_radians());
            ctx.set_transform(affine_to_cpu(t));

            let pen_x = (-p.advance / 2.0) as f32;
            let pen_y = g.shaped.middle_baseline_offset(font_px) as f32;
            let run = g.shaped.glyphs.iter().map(|r| vello_cpu::Glyph {
                id: r.id,
                x: pen_x + r.x * size,
                y: pen_y + r.y * size,
            });
            let builder = ctx.glyph_run(font).font_size(size);
            match pass.shape {
                PassShape::Fill => builder.fill_glyphs(run),
                PassShape::Stroke { .. } => builder.stroke_glyphs(run),
            }
        }
        Ok(())
    }

    /// A 256x1 premultiplied ramp, cached per color pair.
    fn gradient_image(&mut self, from: Color, to: Color) -> TypestampResult<vello_cpu::Image> {
        let key = (from.to_premul(), to.to_premul());
        if let Some(img) = self.gradients.get(&key) {
            return Ok(img.clone());
        }

        let steps = usize::from(GRADIENT_STEPS);
        let mut pixels = Vec::with_capacity(steps);
        for i in 0..steps {
            let t = i as f64 / (steps - 1) as f64;
            let lerp = |a: u8, b: u8| -> u8 {
                (f64::from(a) + (f64::from(b) - f64::from(a)) * t)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            let c = Color::rgba(
                lerp(from.r, to.r),
                lerp(from.g, to.g),
                lerp(from.b, to.b),
                lerp(from.a, to.a),
            );
            pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array(
                c.to_premul(),
            ));
        }
        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, GRADIENT_STEPS, 1, true);
        let img = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.gradients.insert(key, img.clone());
        Ok(img)
    }
}

/// Map the ramp image onto a `length`-long axis through the glyph center at `angle_deg`.
fn gradient_paint_transform(angle_deg: f64, length: f64) -> Affine {
    let steps = f64::from(GRADIENT_STEPS);
    let length = if length.is_finite() && length > 0.0 {
        length
    } else {
        1.0
    };
    Affine::rotate(angle_deg.to_radians())
        * Affine::scale_non_uniform(length / steps, length)
        * Affine::translate((-steps / 2.0, -0.5))
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
