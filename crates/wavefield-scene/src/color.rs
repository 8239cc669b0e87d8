//! Color helpers shared by the scenes.

use wavefield_core::Rgb;

/// Depth at which fog starts to fade particles.
pub const FOG_NEAR: f32 = 10.0;

/// Depth at which particles vanish into the fog.
pub const FOG_FAR: f32 = 50.0;

/// Opacity applied to every particle.
pub const POINT_OPACITY: f32 = 0.8;

/// Linear fog visibility for a depth: 1.0 up to `near`, 0.0 from `far` on.
pub fn fog_factor(depth: f32, near: f32, far: f32) -> f32 {
    if far <= near {
        return if depth < far { 1.0 } else { 0.0 };
    }
    ((far - depth) / (far - near)).clamp(0.0, 1.0)
}

/// Fade a particle color into the black fog.
pub fn fogged(color: Rgb, depth: f32) -> Rgb {
    color.scale(fog_factor(depth, FOG_NEAR, FOG_FAR) * POINT_OPACITY)
}

/// Interpolate between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
