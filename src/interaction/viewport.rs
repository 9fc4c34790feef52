use crate::foundation::core::{Canvas, Point, Vec2};

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 32.0;

/// Maps between screen pixels, intrinsic image pixels and percent of the image.
///
/// At zoom 1 and zero pan the image's top-left sits at `origin` and spans `display_width`
/// screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    canvas: Canvas,
    origin: Point,
    display_width: f64,
    zoom: f64,
    pan: Vec2,
    zoom_enabled: bool,
}

impl Viewport {
    /// Fit the image into `display_width` screen pixels at the screen origin.
    pub fn fit(canvas: Canvas, display_width: f64) -> Self {
        let display_width = if display_width.is_finite() && display_width > 0.0 {
            display_width
        } else {
            canvas.w()
        };
        Self {
            canvas,
            origin: Point::ORIGIN,
            display_width,
            zoom: 1.0,
            pan: Vec2::ZERO,
            zoom_enabled: false,
        }
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_zoom_enabled(mut self, enabled: bool) -> Self {
        self.zoom_enabled = enabled;
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn zoom_enabled(&self) -> bool {
        self.zoom_enabled
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        if pan.is_finite() {
            self.pan = pan;
        }
    }

    /// Zoom by `factor` keeping the image point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.screen_to_intrinsic(screen);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let moved = self.intrinsic_to_screen(anchor);
        self.pan += screen - moved;
    }

    /// Displayed width of the image in screen pixels.
    pub fn displayed_width(&self) -> f64 {
        self.display_width * self.zoom
    }

    /// Intrinsic pixels per screen pixel.
    pub fn intrinsic_per_screen(&self) -> f64 {
        self.canvas.w() / self.displayed_width()
    }

    pub fn screen_to_intrinsic(&self, p: Point) -> Point {
        let local = p - self.origin - self.pan;
        (local * self.intrinsic_per_screen()).to_point()
    }

    pub fn intrinsic_to_screen(&self, p: Point) -> Point {
        self.origin + self.pan + p.to_vec2() / self.intrinsic_per_screen()
    }

    pub fn screen_delta_to_intrinsic(&self, d: Vec2) -> Vec2 {
        d * self.intrinsic_per_screen()
    }

    pub fn intrinsic_to_percent(&self, p: Point) -> Point {
        self.canvas.px_to_percent(p)
    }

    pub fn percent_to_intrinsic(&self, p: Point) -> Point {
        self.canvas.percent_to_px(p)
    }

    pub fn screen_delta_to_percent(&self, d: Vec2) -> Vec2 {
        let i = self.screen_delta_to_intrinsic(d);
        Vec2::new(i.x / self.canvas.w() * 100.0, i.y / self.canvas.h() * 100.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/viewport.rs"]
mod tests;
