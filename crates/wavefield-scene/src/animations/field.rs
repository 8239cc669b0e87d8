//! Per-point functions of the particle field.
//!
//! Each function is pure: the height of a point depends only on its origin,
//! the elapsed time and the pointer, and its color only on that height.

use wavefield_core::{FieldParams, Pointer, Rgb};

/// Height of the pointer-independent travelling wave at an origin.
///
/// Always within `[-amplitude, amplitude]`.
pub fn ambient_height(x0: f32, z0: f32, t: f32, params: &FieldParams) -> f32 {
    (x0 * params.frequency + t).sin() * (z0 * params.frequency + t).cos() * params.amplitude
}

/// Pointer position on the XZ plane.
///
/// Screen up maps to negative z, away from the camera.
pub fn project_pointer(pointer: Pointer, world_scale: f32) -> (f32, f32) {
    (pointer.x * world_scale, -pointer.y * world_scale)
}

/// Extra height for a point `distance` away from the pointer.
///
/// Decays linearly from `strength` at the pointer to zero at `radius`
/// and stays zero beyond it. A non-positive radius disables the lift.
pub fn pointer_lift(distance: f32, radius: f32, strength: f32) -> f32 {
    if radius > 0.0 && distance < radius {
        (radius - distance) / radius * strength
    } else {
        0.0
    }
}

/// Color of a point at height `y`.
///
/// Above the threshold the point takes the highlight; below it a grey
/// that brightens from `grey_min` at the wave trough to `grey_max` at the
/// threshold.
pub fn height_color(y: f32, params: &FieldParams, highlight: Rgb) -> Rgb {
    if y > params.highlight_threshold {
        return highlight;
    }
    let low = -params.amplitude;
    let span = params.highlight_threshold - low;
    let s = if span > 0.0 { (y - low) / span } else { 1.0 };
    // max/min rather than clamp so a NaN height maps to the trough.
    let s = s.max(0.0).min(1.0);
    Rgb::grey(params.grey_min + s * (params.grey_max - params.grey_min))
}
