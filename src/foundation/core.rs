use std::sync::Arc;

use crate::foundation::error::{TypestampError, TypestampResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Pixel dimensions of the intrinsic image space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas; both sides must be in `1..=u16::MAX` (raster backend limit).
    pub fn new(width: u32, height: u32) -> TypestampResult<Self> {
        if width == 0 || height == 0 {
            return Err(TypestampError::invalid_input(
                "canvas dimensions must be non-zero",
            ));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(TypestampError::invalid_input(format!(
                "canvas {width}x{height} exceeds the {} px raster limit",
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64`.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }

    /// Convert a percentage-space point (0..100 on both axes) into intrinsic pixels.
    pub fn percent_to_px(self, p: Point) -> Point {
        Point::new(p.x / 100.0 * self.w(), p.y / 100.0 * self.h())
    }

    /// Convert an intrinsic pixel point into percentage space.
    pub fn px_to_percent(self, p: Point) -> Point {
        Point::new(p.x / self.w() * 100.0, p.y / self.h() * 100.0)
    }
}

/// Decoded raster in premultiplied RGBA8, row-major.
///
/// Construction requires the pixels to be fully decoded, so holding a `RasterImage` means the
/// intrinsic dimensions are known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    canvas: Canvas,
    rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Wrap premultiplied RGBA8 pixels.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> TypestampResult<Self> {
        let canvas = Canvas::new(width, height)?;
        if rgba8_premul.len() != canvas.rgba_len() {
            return Err(TypestampError::invalid_input(format!(
                "raster byte length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            canvas,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight(width: u32, height: u32, mut rgba8: Vec<u8>) -> TypestampResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul(width, height, rgba8)
    }

    /// Intrinsic dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Premultiplied pixel bytes.
    pub fn premul_bytes(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Straight-alpha copy of the pixels, suitable for encoders.
    pub fn to_straight(&self) -> Vec<u8> {
        let mut out = self.rgba8_premul.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
