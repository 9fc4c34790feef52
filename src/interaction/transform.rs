//! Snapshot-relative transform math for gizmo and path drags.
//!
//! Every function takes the layer as it was at pointer-down and returns the transformed copy, so
//! repeated moves during one drag never compound.

use crate::foundation::core::{Affine, Canvas, Point, Vec2};
use crate::foundation::math::{snap_degrees, wrap_degrees};
use crate::interaction::InteractionOpts;
use crate::scene::layer::TextLayer;

/// Whether drags on this layer edit its path points instead of its anchor.
pub fn edits_path(layer: &TextLayer) -> bool {
    layer.is_path_move_mode && !layer.path_points.is_empty()
}

/// Translate by `delta_px` intrinsic pixels.
pub fn translated(snapshot: &TextLayer, delta_px: Vec2, canvas: Canvas) -> TextLayer {
    let mut out = snapshot.clone();
    if edits_path(snapshot) {
        for p in &mut out.path_points {
            *p += delta_px;
        }
    } else {
        let anchor = snapshot.anchor_px(canvas) + delta_px;
        out.overlay_position = canvas.px_to_percent(anchor);
    }
    out
}

/// Scale by `ratio` about `pivot_px`.
///
/// Text size is clamped; the anchor orbit uses the ratio that survived the clamp so the layer
/// stays attached to its size.
pub fn scaled(
    snapshot: &TextLayer,
    pivot_px: Point,
    ratio: f64,
    canvas: Canvas,
    opts: &InteractionOpts,
) -> TextLayer {
    let ratio = if ratio.is_finite() && ratio >= 0.0 {
        ratio
    } else {
        1.0
    };
    let mut out = snapshot.clone();
    if edits_path(snapshot) {
        let t = about(pivot_px, Affine::scale(ratio));
        for p in &mut out.path_points {
            *p = t * *p;
        }
        return out;
    }

    out.text_size = (snapshot.text_size * ratio).clamp(opts.min_text_size, opts.max_text_size);
    let effective = if snapshot.text_size > 0.0 {
        out.text_size / snapshot.text_size
    } else {
        ratio
    };
    let anchor = about(pivot_px, Affine::scale(effective)) * snapshot.anchor_px(canvas);
    out.overlay_position = canvas.px_to_percent(anchor);
    out
}

/// Rotate by `delta_deg` (clockwise in image space) about `pivot_px`.
pub fn rotated(snapshot: &TextLayer, pivot_px: Point, delta_deg: f64, canvas: Canvas) -> TextLayer {
    let delta_deg = if delta_deg.is_finite() { delta_deg } else { 0.0 };
    let t = about(pivot_px, Affine::rotate(delta_deg.to_radians()));
    let mut out = snapshot.clone();
    if edits_path(snapshot) {
        for p in &mut out.path_points {
            *p = t * *p;
        }
        return out;
    }
    out.rotation = wrap_degrees(snapshot.rotation + delta_deg);
    out.overlay_position = canvas.px_to_percent(t * snapshot.anchor_px(canvas));
    out
}

/// Ratio of the pointer's current to initial distance from the pivot.
pub fn scale_ratio(pivot: Point, start: Point, current: Point) -> f64 {
    let d0 = start.distance(pivot);
    if d0 <= f64::EPSILON {
        return 1.0;
    }
    current.distance(pivot) / d0
}

/// Angle swept by the pointer around the pivot, optionally snapped.
pub fn rotation_delta(pivot: Point, start: Point, current: Point, snap_step: Option<f64>) -> f64 {
    let a0 = (start - pivot).atan2();
    let a1 = (current - pivot).atan2();
    let delta = (a1 - a0).to_degrees();
    match snap_step {
        Some(step) => snap_degrees(delta, step),
        None => delta,
    }
}

fn about(pivot: Point, t: Affine) -> Affine {
    Affine::translate(pivot.to_vec2()) * t * Affine::translate(-pivot.to_vec2())
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/transform.rs"]
mod tests;
