use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Canvas, Point};
use crate::layout::measure::FontRequest;

/// Stable identity of a layer inside a [`DesignState`](crate::scene::design::DesignState).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Extra rendering pass selected per layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialEffect {
    #[default]
    None,
    Glitch,
    Gradient,
    Echo,
}

/// Separable and non-separable blend modes used to composite a flattened layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    pub const ALL: [BlendMode; 16] = [
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
        Self::Difference,
        Self::Exclusion,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
    ];

    /// CSS name of the mode.
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }

    /// Look up a mode by CSS name. Unknown names (including `source-over`) map to `Normal`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }
}

impl Serialize for BlendMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for BlendMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_name(&s))
    }
}

/// Which path interaction, if any, the layer is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathMode {
    #[default]
    Off,
    Draw,
    Move,
}

/// One independently transformable, blendable text object.
///
/// Field names serialize in camelCase. `overlay_position` is in percent of the image, path
/// points are in intrinsic pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextLayer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    pub locked: bool,

    pub text_overlay: String,
    pub is_uppercase: bool,

    pub font_family: String,
    pub is_bold: bool,
    pub is_italic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_variations: Option<BTreeMap<String, f64>>,

    pub overlay_position: Point,
    pub rotation: f64,
    pub flip_x: bool,
    pub flip_y: bool,

    pub text_size: f64,
    pub letter_spacing: f64,
    pub letter_rotation: f64,
    pub text_align: TextAlign,

    pub path_points: Vec<Point>,
    pub path_smoothing: u32,
    pub is_path_input_mode: bool,
    pub is_path_move_mode: bool,

    pub text_color: Color,
    pub has_shadow: bool,
    pub shadow_color: Color,
    pub shadow_blur: f64,
    pub shadow_offset: f64,
    pub shadow_angle: f64,
    pub shadow_opacity: f64,

    pub is_hollow: bool,
    pub has_outline: bool,
    pub outline_width: f64,
    pub outline_color: Color,

    pub special_effect: SpecialEffect,
    pub effect_intensity: f64,
    pub effect_color: Color,
    pub effect_color2: Color,
    pub effect_angle: f64,
    pub is_rainbow_glitch: bool,
    pub is_rainbow_lights: bool,
    pub rainbow_opacity: f64,
    pub rainbow_blur: f64,

    pub blend_mode: BlendMode,
    pub opacity: f64,
}

impl Default for TextLayer {
    fn default() -> Self {
        Self {
            id: LayerId(0),
            name: "Text".to_owned(),
            visible: true,
            locked: false,
            text_overlay: String::new(),
            is_uppercase: false,
            font_family: "Inter".to_owned(),
            is_bold: false,
            is_italic: false,
            font_variations: None,
            overlay_position: Point::new(50.0, 50.0),
            rotation: 0.0,
            flip_x: false,
            flip_y: false,
            text_size: 10.0,
            letter_spacing: 0.0,
            letter_rotation: 0.0,
            text_align: TextAlign::Center,
            path_points: Vec::new(),
            path_smoothing: 3,
            is_path_input_mode: false,
            is_path_move_mode: false,
            text_color: Color::WHITE,
            has_shadow: true,
            shadow_color: Color::BLACK,
            shadow_blur: 10.0,
            shadow_offset: 5.0,
            shadow_angle: 45.0,
            shadow_opacity: 0.5,
            is_hollow: false,
            has_outline: false,
            outline_width: 2.0,
            outline_color: Color::BLACK,
            special_effect: SpecialEffect::None,
            effect_intensity: 50.0,
            effect_color: Color::rgb(255, 0, 255),
            effect_color2: Color::rgb(0, 255, 255),
            effect_angle: 0.0,
            is_rainbow_glitch: false,
            is_rainbow_lights: false,
            rainbow_opacity: 0.5,
            rainbow_blur: 0.0,
            blend_mode: BlendMode::Normal,
            opacity: 1.0,
        }
    }
}

/// Reference font size that every "scaled" pixel quantity is expressed at.
pub const REFERENCE_FONT_PX: f64 = 50.0;

impl TextLayer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text_overlay: text.into(),
            ..Self::default()
        }
    }

    /// Content after the uppercase transform.
    pub fn display_text(&self) -> String {
        if self.is_uppercase {
            self.text_overlay.to_uppercase()
        } else {
            self.text_overlay.clone()
        }
    }

    /// Path layout is used whenever there are path points, regardless of other fields.
    pub fn uses_path_layout(&self) -> bool {
        !self.path_points.is_empty()
    }

    pub fn font_px(&self, canvas: Canvas) -> f64 {
        let px = self.text_size / 100.0 * canvas.w();
        if px.is_finite() { px.max(0.0) } else { 0.0 }
    }

    /// Multiplier applied to quantities authored at [`REFERENCE_FONT_PX`].
    pub fn px_scale(&self, canvas: Canvas) -> f64 {
        self.font_px(canvas) / REFERENCE_FONT_PX
    }

    /// Anchor of a standard-layout block in intrinsic pixels.
    pub fn anchor_px(&self, canvas: Canvas) -> Point {
        canvas.percent_to_px(self.overlay_position)
    }

    /// Block-local to image transform of a standard layout: anchor, rotation, then flips.
    pub fn block_transform(&self, canvas: Canvas) -> Affine {
        let sx = if self.flip_x { -1.0 } else { 1.0 };
        let sy = if self.flip_y { -1.0 } else { 1.0 };
        Affine::translate(self.anchor_px(canvas).to_vec2())
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(sx, sy)
    }

    pub fn path_mode(&self) -> PathMode {
        match (self.is_path_input_mode, self.is_path_move_mode) {
            (true, _) => PathMode::Draw,
            (false, true) => PathMode::Move,
            (false, false) => PathMode::Off,
        }
    }

    /// Set the path interaction mode; the two flags are never both set.
    pub fn set_path_mode(&mut self, mode: PathMode) {
        self.is_path_input_mode = mode == PathMode::Draw;
        self.is_path_move_mode = mode == PathMode::Move;
    }

    /// Drop path data and leave any path mode.
    pub fn clear_path(&mut self) {
        self.path_points.clear();
        self.set_path_mode(PathMode::Off);
    }

    /// Face selection derived from bold/italic, with variable axes taking precedence.
    pub fn font_request(&self) -> FontRequest {
        let mut weight: u16 = if self.is_bold { 700 } else { 400 };
        let mut italic = self.is_italic;
        if let Some(axes) = &self.font_variations {
            if let Some(w) = axes.get("wght").copied().filter(|w| w.is_finite()) {
                weight = w.round().clamp(1.0, 1000.0) as u16;
            }
            let ital = axes.get("ital").copied().filter(|v| v.is_finite());
            let slnt = axes.get("slnt").copied().filter(|v| v.is_finite());
            if ital.is_some() || slnt.is_some() {
                italic = ital.is_some_and(|v| v >= 0.5) || slnt.is_some_and(|v| v < 0.0);
            }
        }
        FontRequest::new(self.font_family.clone(), weight, italic)
    }

    pub(crate) fn normalize_modes(&mut self) {
        if self.is_path_input_mode && self.is_path_move_mode {
            self.is_path_move_mode = false;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layer.rs"]
mod tests;
