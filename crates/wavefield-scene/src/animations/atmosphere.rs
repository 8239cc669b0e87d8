//! Cloud atmosphere lit by a pointer-following flashlight (stateful).
//!
//! Four cloud banks drift at different depths. The whole group sways and
//! tilts toward the pointer while a point light eases after it, so the
//! clouds nearest the pointer glow.

use ratatui::{
    style::{Color, Style},
    text::Span,
};
use wavefield_core::{Pointer, Rgb};

use crate::camera::CELL_ASPECT;
use crate::chars::CLOUD_CHARS;
use crate::color::lerp;

/// Vertical field of view of the atmosphere camera, in degrees.
const FOV_DEGREES: f32 = 55.0;

/// Resting distance of the camera from the cloud group's origin.
const CAMERA_Z: f32 = 18.0;

/// Flat light applied everywhere.
const AMBIENT_LIGHT: f32 = 0.5;

/// Flashlight depth, slightly in front of the clouds.
const LIGHT_Z: f32 = 5.0;
const LIGHT_RANGE: f32 = 20.0;
const LIGHT_DECAY: i32 = 2;
const LIGHT_INTENSITY: f32 = 8.0;

/// Per-frame easing of the flashlight toward the pointer.
const LIGHT_FOLLOW: f32 = 0.1;
/// Per-frame easing of the group tilt toward the pointer.
const TILT_FOLLOW: f32 = 0.05;
/// Maximum tilt in radians at the edge of the screen.
const TILT_STRENGTH: f32 = 0.1;

/// Cloud opacities are tuned for a blended GPU scene; terminal glyphs need
/// them amplified.
const DENSITY_GAIN: f32 = 5.0;

/// One drifting bank of cloud.
#[derive(Debug, Clone, Copy)]
struct CloudBank {
    seed: u32,
    /// Extent of the bank along x, y and z.
    bounds: [f32; 3],
    /// How far puffs spill beyond the bounds.
    volume: f32,
    color: Rgb,
    opacity: f32,
    position: [f32; 3],
    /// Drift speed of the bank's texture.
    speed: f32,
    scale: f32,
}

const CLOUD_BANKS: [CloudBank; 4] = [
    // Base mist
    CloudBank {
        seed: 1,
        bounds: [30.0, 10.0, 5.0],
        volume: 20.0,
        color: Rgb::WHITE,
        opacity: 0.05,
        position: [0.0, 0.0, -10.0],
        speed: 0.1,
        scale: 1.0,
    },
    // Left anchor
    CloudBank {
        seed: 2,
        bounds: [10.0, 5.0, 2.0],
        volume: 8.0,
        color: Rgb::grey(0.918), // #eaeaea
        opacity: 0.12,
        position: [-12.0, 2.0, -8.0],
        speed: 0.5,
        scale: 1.0,
    },
    // Right anchor
    CloudBank {
        seed: 3,
        bounds: [10.0, 5.0, 2.0],
        volume: 8.0,
        color: Rgb::grey(0.918),
        opacity: 0.12,
        position: [12.0, -2.0, -8.0],
        speed: 0.5,
        scale: 1.0,
    },
    // Central flow
    CloudBank {
        seed: 4,
        bounds: [20.0, 4.0, 2.0],
        volume: 12.0,
        color: Rgb::WHITE,
        opacity: 0.15,
        position: [0.0, 0.0, -5.0],
        speed: 1.0,
        scale: 1.2,
    },
];

/// Animated state of the atmosphere scene.
#[derive(Debug, Clone)]
pub struct Atmosphere {
    /// Elapsed animation seconds at the last update.
    t: f32,
    /// Flashlight position on its plane.
    light: [f32; 2],
    /// Group rotation about x, y and z.
    rotation: [f32; 3],
    /// Current camera distance.
    camera_z: f32,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self::new()
    }
}

impl Atmosphere {
    pub fn new() -> Self {
        Self {
            t: 0.0,
            light: [0.0, 0.0],
            rotation: [0.0; 3],
            camera_z: CAMERA_Z,
        }
    }

    /// Advance one frame toward the pointer at elapsed time `t`.
    pub fn update(&mut self, t: f32, pointer: Pointer) {
        self.t = t;
        self.camera_z = CAMERA_Z + (t * 0.1).sin();

        self.light[0] = lerp(self.light[0], pointer.x * 20.0, LIGHT_FOLLOW);
        self.light[1] = lerp(self.light[1], pointer.y * 10.0, LIGHT_FOLLOW);

        self.rotation[0] = lerp(self.rotation[0], -pointer.y * TILT_STRENGTH, TILT_FOLLOW);
        self.rotation[1] = lerp(self.rotation[1], pointer.x * TILT_STRENGTH, TILT_FOLLOW);
        self.rotation[2] = (t * 0.05).sin() * 0.02;
    }

    /// Flashlight position in world space.
    pub fn light_position(&self) -> [f32; 3] {
        [self.light[0], self.light[1], LIGHT_Z]
    }

    /// Group rotation about x, y and z in radians.
    pub fn rotation(&self) -> [f32; 3] {
        self.rotation
    }

    /// Light reaching a world point: ambient plus the flashlight's
    /// contribution, which fades to nothing at its range.
    pub fn illumination(&self, point: [f32; 3]) -> f32 {
        let [lx, ly, lz] = self.light_position();
        let (dx, dy, dz) = (point[0] - lx, point[1] - ly, point[2] - lz);
        let distance = (dx * dx + dy * dy + dz * dz).sqrt();
        let falloff = (1.0 - distance / LIGHT_RANGE).max(0.0).powi(LIGHT_DECAY);
        AMBIENT_LIGHT + falloff * LIGHT_INTENSITY
    }

    /// Cloud density and lit color seen through a cell's view ray.
    ///
    /// `ndc` is the cell centre in normalized device coordinates.
    pub fn sample(&self, ndc: [f32; 2], aspect: f32) -> (f32, Rgb) {
        let tan_half_fov = (FOV_DEGREES.to_radians() / 2.0).tan();
        let [rot_x, rot_y, rot_z] = self.rotation;
        let (sin_z, cos_z) = rot_z.sin_cos();

        let mut density = 0.0;
        let mut tint = Rgb::BLACK;
        let mut light = 0.0;
        for bank in &CLOUD_BANKS {
            let z = bank.position[2];
            let half_height = tan_half_fov * (self.camera_z - z);
            let wx = ndc[0] * half_height * aspect;
            let wy = ndc[1] * half_height;

            // Undo the group's roll, then its small-angle tilt.
            let rx = wx * cos_z + wy * sin_z;
            let ry = -wx * sin_z + wy * cos_z;
            let lx = rx - z * rot_y;
            let ly = ry + z * rot_x;

            let d = bank.density(lx, ly, self.t);
            if d <= 0.0 {
                continue;
            }
            density += d;
            tint = Rgb::new(
                tint.r + bank.color.r * d,
                tint.g + bank.color.g * d,
                tint.b + bank.color.b * d,
            );
            light += self.illumination([wx, wy, z]) * d;
        }

        if density <= 0.0 {
            return (0.0, Rgb::BLACK);
        }
        let tint = tint.scale(1.0 / density);
        let light = light / density;
        // Ambient alone gives half brightness; the flashlight pushes to full.
        let shade = (0.25 + 0.5 * light).min(1.0);
        (density.min(1.0), tint.scale(shade))
    }

    /// Render an atmosphere character.
    pub fn render_char(&self, x: u16, y: u16, width: u16, height: u16) -> Span<'static> {
        if width == 0 || height == 0 {
            return Span::raw(" ");
        }
        let ndc = [
            (x as f32 + 0.5) / width as f32 * 2.0 - 1.0,
            1.0 - (y as f32 + 0.5) / height as f32 * 2.0,
        ];
        let aspect = width as f32 / (height as f32 * CELL_ASPECT);
        let (density, color) = self.sample(ndc, aspect);

        let ch = if density > 0.45 {
            CLOUD_CHARS[2]
        } else if density > 0.25 {
            CLOUD_CHARS[1]
        } else if density > 0.08 {
            CLOUD_CHARS[0]
        } else {
            return Span::raw(" ");
        };
        let color: Color = color.into();
        Span::styled(ch.to_string(), Style::new().fg(color))
    }
}

impl CloudBank {
    /// Density of this bank at a point on its plane at time `t`.
    fn density(&self, x: f32, y: f32, t: f32) -> f32 {
        let spread = self.volume * 0.25;
        let half_w = self.bounds[0] * self.scale * 0.5 + spread;
        let half_h = self.bounds[1] * self.scale * 0.5 + spread * 0.5;
        let nx = (x - self.position[0]) / half_w;
        let ny = (y - self.position[1]) / half_h;
        let r2 = nx * nx + ny * ny;
        if r2 >= 1.0 {
            return 0.0;
        }
        let envelope = smoothstep(1.0 - r2);

        let seed = self.seed as f32;
        let drift = t * self.speed * 0.5;
        let texture = value_noise(x * 0.35 + drift + seed * 17.0, y * 0.6 + seed * 31.0, self.seed)
            * 0.65
            + value_noise(x * 0.9 - drift * 1.5, y * 1.4, self.seed.wrapping_add(101)) * 0.35;

        envelope * texture * self.opacity * DENSITY_GAIN
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Smooth 2D value noise in 0.0-1.0.
fn value_noise(x: f32, y: f32, seed: u32) -> f32 {
    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (smoothstep(x - x0), smoothstep(y - y0));
    let (ix, iy) = (x0 as i32, y0 as i32);

    let a = lattice_value(ix, iy, seed);
    let b = lattice_value(ix.wrapping_add(1), iy, seed);
    let c = lattice_value(ix, iy.wrapping_add(1), seed);
    let d = lattice_value(ix.wrapping_add(1), iy.wrapping_add(1), seed);

    lerp(lerp(a, b, fx), lerp(c, d, fx), fy).clamp(0.0, 1.0)
}

/// Deterministic pseudo-random value in 0.0-1.0 for a lattice corner.
fn lattice_value(x: i32, y: i32, seed: u32) -> f32 {
    let mut h = (x as u32)
        .wrapping_mul(374_761_393)
        .wrapping_add((y as u32).wrapping_mul(668_265_263))
        .wrapping_add(seed.wrapping_mul(2_654_435_761));
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^= h >> 16;
    (h & 0x00ff_ffff) as f32 / 0x00ff_ffff as f32
}
