//! Pointer-driven editing: viewport mapping, gizmo hit testing, snapshot transforms and the
//! interaction state machine tying them together.

pub mod controller;
pub mod gizmo;
pub mod transform;
pub mod viewport;

pub use controller::{Controller, InteractionMode, PointerEvent};
pub use gizmo::{Corner, GizmoFrame, GizmoHandle};
pub use viewport::Viewport;

/// Tunables for the interaction controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionOpts {
    /// Rotation snap step in degrees when the snap modifier is held.
    pub rotation_snap_deg: f64,
    pub min_text_size: f64,
    pub max_text_size: f64,
    /// Hit radius of gizmo handles in screen pixels.
    pub handle_radius_px: f64,
    /// Distance of the rotate handle above the top edge in screen pixels.
    pub rotate_handle_offset_px: f64,
}

impl Default for InteractionOpts {
    fn default() -> Self {
        Self {
            rotation_snap_deg: 15.0,
            min_text_size: 0.1,
            max_text_size: 50.0,
            handle_radius_px: 10.0,
            rotate_handle_offset_px: 24.0,
        }
    }
}

impl InteractionOpts {
    pub fn with_rotation_snap(mut self, deg: f64) -> Self {
        self.rotation_snap_deg = deg;
        self
    }

    pub fn with_text_size_range(mut self, min: f64, max: f64) -> Self {
        self.min_text_size = min.min(max);
        self.max_text_size = max.max(min);
        self
    }

    pub fn with_handle_radius(mut self, px: f64) -> Self {
        self.handle_radius_px = px;
        self
    }
}
