//! Normalized pointer position.

use ratatui::layout::Rect;

/// Pointer position normalized to [-1, 1] on both axes, with +y pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    /// Pointer resting at the centre of the surface.
    pub const CENTER: Pointer = Pointer { x: 0.0, y: 0.0 };

    /// Create a pointer from normalized coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Normalize a terminal cell against the area it was reported in.
    ///
    /// Cells outside the area clamp to the nearest edge.
    pub fn from_cell(column: u16, row: u16, area: Rect) -> Self {
        Self {
            x: normalize(column, area.x, area.width),
            y: -normalize(row, area.y, area.height),
        }
    }

    /// Map back to the terminal cell nearest to this pointer.
    pub fn to_cell(self, area: Rect) -> (u16, u16) {
        (
            denormalize(self.x, area.x, area.width),
            denormalize(-self.y, area.y, area.height),
        )
    }
}

fn normalize(cell: u16, origin: u16, extent: u16) -> f32 {
    if extent <= 1 {
        return 0.0;
    }
    let offset = cell.saturating_sub(origin).min(extent - 1);
    offset as f32 / (extent - 1) as f32 * 2.0 - 1.0
}

fn denormalize(v: f32, origin: u16, extent: u16) -> u16 {
    if extent <= 1 {
        return origin;
    }
    let offset = ((v.clamp(-1.0, 1.0) + 1.0) / 2.0 * (extent - 1) as f32).round() as u16;
    origin + offset
}
