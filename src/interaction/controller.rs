use crate::foundation::core::{Point, Vec2};
use crate::interaction::InteractionOpts;
use crate::interaction::gizmo::{GizmoFrame, GizmoHandle};
use crate::interaction::transform::{
    edits_path, rotated, rotation_delta, scale_ratio, scaled, translated,
};
use crate::interaction::viewport::Viewport;
use crate::layout::GlyphMeasure;
use crate::scene::design::DesignState;
use crate::scene::layer::{LayerId, PathMode, TextLayer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    None,
    Pan,
    DrawPath,
    MovePath,
    GizmoMove,
    GizmoScale,
    GizmoRotate,
}

/// A pointer sample in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub screen: Point,
    /// Snap modifier held (rotation snaps to the configured step).
    pub snap: bool,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            screen: Point::new(x, y),
            snap: false,
        }
    }

    pub fn snapped(mut self) -> Self {
        self.snap = true;
        self
    }
}

/// State captured at pointer-down and held until pointer-up.
#[derive(Clone, Debug, Default)]
struct Drag {
    start_screen: Point,
    start_intrinsic: Point,
    pivot: Point,
    /// Unlocked selected layers as they were at pointer-down.
    snapshot: Vec<TextLayer>,
    path_target: Option<LayerId>,
    path_buffer: Vec<Point>,
    pan_start: Vec2,
}

/// Pointer state machine. One drag at a time; pointer-up always returns to
/// [`InteractionMode::None`].
#[derive(Clone, Debug, Default)]
pub struct Controller {
    opts: InteractionOpts,
    mode: InteractionMode,
    drag: Drag,
}

impl Controller {
    pub fn new(opts: InteractionOpts) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn opts(&self) -> &InteractionOpts {
        &self.opts
    }

    /// Points collected so far by an in-progress path draw, in intrinsic pixels.
    pub fn path_preview(&self) -> &[Point] {
        &self.drag.path_buffer
    }

    /// Choose the next mode from what the pointer landed on.
    pub fn pointer_down(
        &mut self,
        design: &DesignState,
        viewport: &Viewport,
        measure: &mut dyn GlyphMeasure,
        ev: PointerEvent,
    ) -> InteractionMode {
        if self.mode != InteractionMode::None {
            return self.mode;
        }
        let start_intrinsic = viewport.screen_to_intrinsic(ev.screen);
        self.drag = Drag {
            start_screen: ev.screen,
            start_intrinsic,
            ..Drag::default()
        };

        let active = design.active_layer();
        let hit = active.and_then(|layer| {
            let frame = GizmoFrame::for_layer(layer, viewport, measure)?;
            let handle = frame.hit_test(ev.screen, viewport, &self.opts)?;
            Some((layer, frame, handle))
        });

        self.mode = if let Some((layer, frame, handle)) = hit {
            self.drag.pivot = frame.pivot;
            self.drag.snapshot = design
                .selected_layers()
                .filter(|l| !l.locked)
                .cloned()
                .collect();
            match handle {
                GizmoHandle::Rotate => InteractionMode::GizmoRotate,
                GizmoHandle::Corner(_) => InteractionMode::GizmoScale,
                GizmoHandle::Body if edits_path(layer) => InteractionMode::MovePath,
                GizmoHandle::Body => InteractionMode::GizmoMove,
            }
        } else if let Some(layer) =
            active.filter(|l| l.path_mode() == PathMode::Draw && !l.locked)
        {
            self.drag.path_target = Some(layer.id);
            self.drag.path_buffer.push(start_intrinsic);
            InteractionMode::DrawPath
        } else if viewport.zoom_enabled() {
            self.drag.pan_start = viewport.pan();
            InteractionMode::Pan
        } else {
            InteractionMode::None
        };

        tracing::trace!(mode = ?self.mode, "pointer down");
        self.mode
    }

    /// Advance the current drag. Returns the edited design when layers changed.
    pub fn pointer_move(
        &mut self,
        design: &DesignState,
        viewport: &mut Viewport,
        ev: PointerEvent,
    ) -> Option<DesignState> {
        let canvas = viewport.canvas();
        let current = viewport.screen_to_intrinsic(ev.screen);
        let drag = &mut self.drag;
        match self.mode {
            InteractionMode::None => None,
            InteractionMode::Pan => {
                viewport.set_pan(drag.pan_start + (ev.screen - drag.start_screen));
                None
            }
            InteractionMode::DrawPath => {
                if drag.path_buffer.last() != Some(&current) {
                    drag.path_buffer.push(current);
                }
                None
            }
            InteractionMode::GizmoMove | InteractionMode::MovePath => {
                let delta = viewport.screen_delta_to_intrinsic(ev.screen - drag.start_screen);
                apply(design, &drag.snapshot, |l| translated(l, delta, canvas))
            }
            InteractionMode::GizmoScale => {
                let ratio = scale_ratio(drag.pivot, drag.start_intrinsic, current);
                let pivot = drag.pivot;
                let opts = self.opts;
                apply(design, &drag.snapshot, |l| scaled(l, pivot, ratio, canvas, &opts))
            }
            InteractionMode::GizmoRotate => {
                let snap = ev.snap.then_some(self.opts.rotation_snap_deg);
                let delta = rotation_delta(drag.pivot, drag.start_intrinsic, current, snap);
                let pivot = drag.pivot;
                apply(design, &drag.snapshot, |l| rotated(l, pivot, delta, canvas))
            }
        }
    }

    /// End the drag. A path draw commits its buffer and leaves draw mode.
    pub fn pointer_up(&mut self, design: &DesignState) -> Option<DesignState> {
        let mode = std::mem::take(&mut self.mode);
        let drag = std::mem::take(&mut self.drag);
        if mode != InteractionMode::DrawPath {
            return None;
        }
        let id = drag.path_target?;
        let points = drag.path_buffer;
        let committed = design.with_layer_updated(id, move |l| {
            if points.len() >= 2 {
                l.path_points = points;
            }
            l.set_path_mode(PathMode::Off);
        });
        match committed {
            Ok(next) => Some(next),
            Err(err) => {
                tracing::debug!(%err, "path target vanished before commit");
                None
            }
        }
    }
}

fn apply<F>(design: &DesignState, snapshot: &[TextLayer], f: F) -> Option<DesignState>
where
    F: Fn(&TextLayer) -> TextLayer,
{
    let mut next = design.clone();
    for snap in snapshot {
        let edited = f(snap);
        next = match next.with_layer_updated(snap.id, |l| {
            l.overlay_position = edited.overlay_position;
            l.text_size = edited.text_size;
            l.rotation = edited.rotation;
            l.path_points = edited.path_points;
        }) {
            Ok(n) => n,
            // Removed mid-drag.
            Err(_) => continue,
        };
    }
    Some(next)
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
