use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use anyhow::Context as _;
use smallvec::SmallVec;

use crate::foundation::error::{TypestampError, TypestampResult};
use crate::layout::measure::{FontRequest, GlyphMeasure};

/// Size every character is shaped at before scaling to the requested size.
const SHAPE_PX: f32 = 100.0;

/// Advance used for families that are not registered yet.
pub const FALLBACK_ADVANCE_EM: f64 = 0.6;

/// Weight and slope of a registered face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceStyle {
    pub weight: u16,
    pub italic: bool,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            weight: 400,
            italic: false,
        }
    }
}

impl FaceStyle {
    /// Guess weight and slope from a conventional file name such as `Inter-SemiBoldItalic`.
    pub fn from_file_stem(stem: &str) -> Self {
        let s = stem.to_ascii_lowercase();
        let weight = [
            ("thin", 100),
            ("hairline", 100),
            ("extralight", 200),
            ("ultralight", 200),
            ("light", 300),
            ("medium", 500),
            ("semibold", 600),
            ("demibold", 600),
            ("extrabold", 800),
            ("ultrabold", 800),
            ("black", 900),
            ("heavy", 900),
            ("bold", 700),
        ]
        .into_iter()
        .find(|(needle, _)| s.contains(needle))
        .map_or(400, |(_, w)| w);
        Self {
            weight,
            italic: s.contains("italic") || s.contains("oblique"),
        }
    }
}

/// Glyph of a shaped character, in em units relative to the pen position and baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphRef {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// Cached shaping result for one character of one face, in em units.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedChar {
    pub glyphs: SmallVec<[GlyphRef; 2]>,
    pub advance: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl ShapedChar {
    /// Distance from the em-box middle down to the baseline, for `size_px`.
    pub fn middle_baseline_offset(&self, size_px: f64) -> f64 {
        (self.ascent - self.descent) / 2.0 * size_px
    }
}

/// Handle to a registered face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceId(usize);

struct Face {
    family: String,
    stack_name: String,
    style: FaceStyle,
    data: vello_cpu::peniko::FontData,
    font_ctx: parley::FontContext,
}

/// Registered faces plus per-character shaping caches.
///
/// This is the measurement context for layout and the glyph source for rendering. A family is
/// ready once at least one of its faces is registered; every registration bumps
/// [`generation`](Self::generation) so callers can tell that earlier measurements may have used
/// fallback metrics.
pub struct FontBook {
    faces: Vec<Face>,
    layout_ctx: parley::LayoutContext<()>,
    shaped: HashMap<(FaceId, char), ShapedChar>,
    generation: u64,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("families", &self.families())
            .field("generation", &self.generation)
            .finish()
    }
}

impl FontBook {
    pub fn new() -> Self {
        Self {
            faces: Vec::new(),
            layout_ctx: parley::LayoutContext::new(),
            shaped: HashMap::new(),
            generation: 0,
        }
    }

    /// Register a face under the family name stored in the font itself.
    pub fn register(&mut self, bytes: Vec<u8>, style: FaceStyle) -> TypestampResult<String> {
        self.register_inner(None, bytes, style)
    }

    /// Register a face under an explicit family name (as layers refer to it).
    pub fn register_as(
        &mut self,
        family: &str,
        bytes: Vec<u8>,
        style: FaceStyle,
    ) -> TypestampResult<String> {
        self.register_inner(Some(family), bytes, style)
    }

    fn register_inner(
        &mut self,
        family: Option<&str>,
        bytes: Vec<u8>,
        style: FaceStyle,
    ) -> TypestampResult<String> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            TypestampError::invalid_input("no font families registered from font bytes")
        })?;
        let stack_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TypestampError::invalid_input("registered font family has no name"))?
            .to_string();

        let family = family.map_or_else(|| stack_name.clone(), str::to_owned);
        tracing::debug!(
            family = %family,
            weight = style.weight,
            italic = style.italic,
            "registered face"
        );

        self.faces.push(Face {
            family: family.clone(),
            stack_name,
            style,
            data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
            font_ctx,
        });
        self.generation = self.generation.wrapping_add(1);
        Ok(family)
    }

    /// Register every `.ttf`/`.otf` file in `dir`, guessing styles from file names.
    pub fn load_dir(&mut self, dir: &Path) -> TypestampResult<Vec<String>> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("read font dir {}", dir.display()))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.context("read font dir entry")?.path();
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"));
            if is_font {
                paths.push(path);
            }
        }
        // Registration order decides ties between equally good faces.
        paths.sort();

        let mut families = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read font file {}", path.display()))?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            families.push(self.register(bytes, FaceStyle::from_file_stem(stem))?);
        }
        Ok(families)
    }

    /// Incremented on every registration.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_ready(&self, family: &str) -> bool {
        self.faces
            .iter()
            .any(|f| f.family.eq_ignore_ascii_case(family))
    }

    /// Distinct family names in registration order.
    pub fn families(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for f in &self.faces {
            if !out.iter().any(|n| n.eq_ignore_ascii_case(&f.family)) {
                out.push(&f.family);
            }
        }
        out
    }

    /// Closest registered face: matching slope first, then nearest weight.
    pub fn resolve(&self, req: &FontRequest) -> Option<FaceId> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.family.eq_ignore_ascii_case(&req.family))
            .min_by_key(|(_, f)| {
                (
                    f.style.italic != req.italic,
                    f.style.weight.abs_diff(req.weight),
                )
            })
            .map(|(i, _)| FaceId(i))
    }

    pub fn font_data(&self, face: FaceId) -> Option<&vello_cpu::peniko::FontData> {
        self.faces.get(face.0).map(|f| &f.data)
    }

    /// Shape a single character, caching the result.
    pub fn shape(&mut self, face: FaceId, ch: char) -> TypestampResult<&ShapedChar> {
        if !self.shaped.contains_key(&(face, ch)) {
            let shaped = self.shape_uncached(face, ch)?;
            self.shaped.insert((face, ch), shaped);
        }
        self.shaped
            .get(&(face, ch))
            .ok_or_else(|| TypestampError::render("shaping cache miss"))
    }

    fn shape_uncached(&mut self, face: FaceId, ch: char) -> TypestampResult<ShapedChar> {
        let f = self
            .faces
            .get_mut(face.0)
            .ok_or_else(|| TypestampError::render(format!("unknown face {face:?}")))?;

        let mut buf = [0u8; 4];
        let text: &str = ch.encode_utf8(&mut buf);

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut f.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(f.stack_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(SHAPE_PX));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let em = f64::from(SHAPE_PX);
        let mut out = ShapedChar {
            glyphs: SmallVec::new(),
            advance: 0.0,
            ascent: 0.0,
            descent: 0.0,
        };
        for line in layout.lines() {
            let metrics = line.metrics();
            out.ascent = out.ascent.max(f64::from(metrics.ascent.abs()) / em);
            out.descent = out.descent.max(f64::from(metrics.descent.abs()) / em);
            let mut pen = 0.0;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                place_glyphs(
                    &mut out,
                    &mut pen,
                    run.glyphs().map(|g| (g.id, g.x, g.y, g.advance)),
                );
            }
        }
        Ok(out)
    }
}

/// Append `(id, x_offset, y_offset, advance)` glyphs at a running pen, in em units.
///
/// Shaper offsets are relative to the pen and the baseline; the pen moves by each advance.
fn place_glyphs(
    out: &mut ShapedChar,
    pen: &mut f32,
    glyphs: impl Iterator<Item = (u32, f32, f32, f32)>,
) {
    for (id, x, y, advance) in glyphs {
        out.glyphs.push(GlyphRef {
            id,
            x: (*pen + x) / SHAPE_PX,
            y: y / SHAPE_PX,
        });
        *pen += advance;
        out.advance += f64::from(advance) / f64::from(SHAPE_PX);
    }
}

impl GlyphMeasure for FontBook {
    fn advance(&mut self, font: &FontRequest, ch: char, size_px: f64) -> f64 {
        let Some(face) = self.resolve(font) else {
            return FALLBACK_ADVANCE_EM * size_px;
        };
        match self.shape(face, ch) {
            Ok(s) => s.advance * size_px,
            Err(err) => {
                tracing::warn!(
                    %err,
                    family = %font.family,
                    "shaping failed, using fallback advance"
                );
                FALLBACK_ADVANCE_EM * size_px
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
