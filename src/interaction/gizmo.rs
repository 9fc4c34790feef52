use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::geometry::path::PathBounds;
use crate::interaction::InteractionOpts;
use crate::interaction::viewport::Viewport;
use crate::layout::{GlyphMeasure, LayoutSpace, layout_layer};
use crate::scene::layer::TextLayer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];
}

/// What a pointer-down landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GizmoHandle {
    Rotate,
    Corner(Corner),
    Body,
}

/// Oriented box around a layer: a local rectangle plus its transform into intrinsic pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GizmoFrame {
    pub local: Rect,
    pub transform: Affine,
    /// Scale/rotate pivot in intrinsic pixels.
    pub pivot: Point,
}

impl GizmoFrame {
    /// Frame for `layer`, or `None` when it has nothing to draw.
    ///
    /// Standard layouts use the block box under the layer transform and pivot on the anchor.
    /// Path layouts use the smoothed path box and pivot on the raw path's box center.
    pub fn for_layer(
        layer: &TextLayer,
        viewport: &Viewport,
        measure: &mut dyn GlyphMeasure,
    ) -> Option<Self> {
        let canvas = viewport.canvas();
        let layout = layout_layer(layer, canvas, measure);
        if layout.is_empty() {
            return None;
        }
        match layout.space {
            LayoutSpace::Local => Some(Self {
                local: layout.bounds,
                transform: layer.block_transform(canvas),
                pivot: layer.anchor_px(canvas),
            }),
            LayoutSpace::Absolute => {
                let pivot = PathBounds::of(&layer.path_points)?.center();
                Some(Self {
                    local: layout.bounds,
                    transform: Affine::IDENTITY,
                    pivot,
                })
            }
        }
    }

    pub fn corner(&self, c: Corner) -> Point {
        let r = self.local;
        let p = match c {
            Corner::TopLeft => Point::new(r.x0, r.y0),
            Corner::TopRight => Point::new(r.x1, r.y0),
            Corner::BottomRight => Point::new(r.x1, r.y1),
            Corner::BottomLeft => Point::new(r.x0, r.y1),
        };
        self.transform * p
    }

    /// Rotate handle in screen space: above the middle of the top edge, pushed outward.
    pub fn rotate_handle(&self, viewport: &Viewport, opts: &InteractionOpts) -> Point {
        let top_mid = viewport
            .intrinsic_to_screen(self.transform * Point::new(self.local.center().x, self.local.y0));
        let center = viewport.intrinsic_to_screen(self.transform * self.local.center());
        let out = top_mid - center;
        let dir = if out.hypot() > f64::EPSILON {
            out.normalize()
        } else {
            Vec2::new(0.0, -1.0)
        };
        top_mid + dir * opts.rotate_handle_offset_px
    }

    /// Hit test a screen point: rotate handle, then corners, then body.
    pub fn hit_test(
        &self,
        screen: Point,
        viewport: &Viewport,
        opts: &InteractionOpts,
    ) -> Option<GizmoHandle> {
        let r = opts.handle_radius_px;
        if screen.distance(self.rotate_handle(viewport, opts)) <= r {
            return Some(GizmoHandle::Rotate);
        }
        let quad = Corner::ALL.map(|c| viewport.intrinsic_to_screen(self.corner(c)));
        for (c, p) in Corner::ALL.into_iter().zip(quad) {
            if screen.distance(p) <= r {
                return Some(GizmoHandle::Corner(c));
            }
        }
        point_in_convex_quad(screen, &quad).then_some(GizmoHandle::Body)
    }
}

/// Winding-agnostic containment; flips reverse the corner order.
fn point_in_convex_quad(p: Point, quad: &[Point; 4]) -> bool {
    let mut pos = false;
    let mut neg = false;
    for i in 0..4 {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        let cross = (b - a).cross(p - a);
        pos |= cross > 0.0;
        neg |= cross < 0.0;
    }
    !(pos && neg)
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/gizmo.rs"]
mod tests;
