use crate::geometry::path::{ArcLengthTable, PathBounds, smooth_points};
use crate::layout::{
    GlyphMeasure, GlyphPlacement, LayoutParams, LayoutSpace, TextLayout, measure_chars,
};
use crate::scene::layer::TextAlign;

/// Single-line layout along the smoothed path, in absolute image coordinates.
///
/// Characters whose center would fall before the start or past the end of the path are dropped.
pub fn path_layout(params: &LayoutParams, measure: &mut dyn GlyphMeasure) -> TextLayout {
    let points = smooth_points(&params.path_points, params.path_smoothing);
    let Some(bounds) = PathBounds::of(&points) else {
        return TextLayout::empty(LayoutSpace::Absolute, params.font_px);
    };
    if points.len() < 2 {
        tracing::debug!("path has fewer than two points, nothing to lay out");
        return TextLayout::empty(LayoutSpace::Absolute, params.font_px);
    }

    let table = ArcLengthTable::new(&points);
    let path_len = table.len();

    let chars = measure_chars(
        params.text.chars().map(|c| if c == '\n' { ' ' } else { c }),
        params,
        measure,
    );
    let text_width = match chars.len() {
        0 => 0.0,
        n => chars.iter().map(|&(_, w)| w).sum::<f64>() + params.letter_spacing * (n - 1) as f64,
    };

    let mut cursor = match params.align {
        TextAlign::Left => 0.0,
        TextAlign::Center => (path_len - text_width) / 2.0,
        TextAlign::Right => path_len - text_width,
    };

    let mut glyphs = Vec::with_capacity(chars.len());
    for &(ch, w) in &chars {
        let center = cursor + w / 2.0;
        if let Some(sample) = table.sample(center) {
            glyphs.push(GlyphPlacement {
                ch,
                x: sample.point.x,
                y: sample.point.y,
                rotation_deg: sample.tangent_deg + params.letter_rotation,
                advance: w,
            });
        }
        cursor += w + params.letter_spacing;
    }

    TextLayout {
        space: LayoutSpace::Absolute,
        font_px: params.font_px,
        glyphs,
        bounds: bounds.rect,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/path.rs"]
mod tests;
