pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let w = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if w >= 360.0 { 0.0 } else { w }
}

/// Snap an angle in degrees to the nearest multiple of `step`.
pub fn snap_degrees(deg: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return deg;
    }
    (deg / step).round() * step
}

/// Unit vector for an angle in degrees (0° = +x, clockwise in y-down image space).
pub(crate) fn unit_vec(deg: f64) -> kurbo::Vec2 {
    let r = deg.to_radians();
    kurbo::Vec2::new(r.cos(), r.sin())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
