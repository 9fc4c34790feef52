//! Per-character placement for text layers.
//!
//! Two algorithms share one output type: [`standard::standard_layout`] produces block-local
//! positions around the layer anchor, [`path::path_layout`] produces absolute image positions
//! along a smoothed stroke.

pub mod measure;
pub mod path;
pub mod standard;

use crate::foundation::core::{Canvas, Point, Rect};
use crate::scene::layer::{TextAlign, TextLayer};

pub use measure::{FixedAdvance, FontRequest, GlyphMeasure};

/// Coordinate space of a layout's glyph positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutSpace {
    /// Relative to the layer anchor; the layer transform still applies.
    Local,
    /// Intrinsic image pixels.
    Absolute,
}

/// Draw position of a single character. `(x, y)` is the visual center of its box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    pub ch: char,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
    /// Advance without letter spacing.
    pub advance: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    pub space: LayoutSpace,
    pub font_px: f64,
    pub glyphs: Vec<GlyphPlacement>,
    /// Block box (local space) or smoothed path box (absolute space).
    pub bounds: Rect,
}

impl TextLayout {
    pub fn empty(space: LayoutSpace, font_px: f64) -> Self {
        Self {
            space,
            font_px,
            glyphs: Vec::new(),
            bounds: Rect::ZERO,
        }
    }

    /// `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Inputs shared by both layout algorithms, resolved against a canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
    pub text: String,
    pub font: FontRequest,
    pub font_px: f64,
    /// Letter spacing already scaled to `font_px`.
    pub letter_spacing: f64,
    pub letter_rotation: f64,
    pub align: TextAlign,
    pub path_points: Vec<Point>,
    pub path_smoothing: u32,
}

impl LayoutParams {
    pub fn from_layer(layer: &TextLayer, canvas: Canvas) -> Self {
        let scale = layer.px_scale(canvas);
        Self {
            text: layer.display_text(),
            font: layer.font_request(),
            font_px: layer.font_px(canvas),
            letter_spacing: finite_or_zero(layer.letter_spacing * scale),
            letter_rotation: finite_or_zero(layer.letter_rotation),
            align: layer.text_align,
            path_points: layer.path_points.clone(),
            path_smoothing: layer.path_smoothing,
        }
    }
}

/// Lay out a layer with whichever algorithm its data selects.
pub fn layout_layer(
    layer: &TextLayer,
    canvas: Canvas,
    measure: &mut dyn GlyphMeasure,
) -> TextLayout {
    let params = LayoutParams::from_layer(layer, canvas);
    if layer.uses_path_layout() {
        path::path_layout(&params, measure)
    } else {
        standard::standard_layout(&params, measure)
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

pub(crate) fn measure_chars(
    chars: impl Iterator<Item = char>,
    params: &LayoutParams,
    measure: &mut dyn GlyphMeasure,
) -> Vec<(char, f64)> {
    chars
        .map(|ch| {
            let w = measure.advance(&params.font, ch, params.font_px);
            (ch, finite_or_zero(w).max(0.0))
        })
        .collect()
}
