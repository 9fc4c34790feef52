use crate::foundation::core::Rect;
use crate::layout::{
    GlyphMeasure, GlyphPlacement, LayoutParams, LayoutSpace, TextLayout, measure_chars,
};
use crate::scene::layer::TextAlign;

/// Multi-line block layout centered on the layer anchor.
///
/// Lines are `font_px` tall and the block is vertically centered on the origin. Each glyph
/// center sits halfway across its advance box (`advance + spacing`), so trailing spacing is part
/// of every line's width.
pub fn standard_layout(params: &LayoutParams, measure: &mut dyn GlyphMeasure) -> TextLayout {
    let line_height = params.font_px;
    let lines: Vec<Vec<(char, f64)>> = params
        .text
        .split('\n')
        .map(|line| measure_chars(line.chars(), params, measure))
        .collect();

    let line_widths: Vec<f64> = lines
        .iter()
        .map(|line| {
            line.iter()
                .map(|&(_, w)| w + params.letter_spacing)
                .sum::<f64>()
        })
        .collect();
    let max_width = line_widths.iter().copied().fold(0.0f64, f64::max);

    let top = -(lines.len() as f64 * line_height) / 2.0;
    let mut glyphs = Vec::with_capacity(lines.iter().map(Vec::len).sum());

    for (i, (line, &line_width)) in lines.iter().zip(&line_widths).enumerate() {
        let mut cursor = match params.align {
            TextAlign::Left => -max_width / 2.0,
            TextAlign::Center => -line_width / 2.0,
            TextAlign::Right => max_width / 2.0 - line_width,
        };
        let y = top + (i as f64 + 0.5) * line_height;

        for &(ch, w) in line {
            let cell = w + params.letter_spacing;
            glyphs.push(GlyphPlacement {
                ch,
                x: cursor + cell / 2.0,
                y,
                rotation_deg: params.letter_rotation,
                advance: w,
            });
            cursor += cell;
        }
    }

    TextLayout {
        space: LayoutSpace::Local,
        font_px: params.font_px,
        glyphs,
        bounds: Rect::new(-max_width / 2.0, top, max_width / 2.0, -top),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/standard.rs"]
mod tests;
