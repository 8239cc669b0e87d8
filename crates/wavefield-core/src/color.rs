//! Linear RGB color in the 0.0-1.0 range.

use ratatui::style::Color;

/// An RGB color with components in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    /// Create a color from its components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a neutral grey with the given luminance.
    pub const fn grey(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Multiply every component by `k`.
    pub fn scale(self, k: f32) -> Self {
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
        }
    }

    /// Convert to a terminal color, clamping out-of-gamut components.
    pub fn to_color(self) -> Color {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::Rgb(byte(self.r), byte(self.g), byte(self.b))
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        rgb.to_color()
    }
}
