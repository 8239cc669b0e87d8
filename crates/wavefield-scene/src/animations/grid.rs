//! Fixed lattice of particle origins.

/// Immutable origins of the particle field on the XZ plane.
///
/// The number of points is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    origins: Box<[[f32; 2]]>,
}

impl Grid {
    /// Lay out `count` points on a square lattice centred on the origin.
    ///
    /// Rows hold `ceil(sqrt(count))` points each, so the last row may be
    /// partial.
    pub fn lattice(count: usize, spacing: f32) -> Self {
        let side = lattice_side(count);
        let offset = side as f32 * spacing / 2.0;
        let origins = (0..count)
            .map(|i| {
                let x = (i % side) as f32 * spacing - offset;
                let z = (i / side) as f32 * spacing - offset;
                [x, z]
            })
            .collect();
        Self { origins }
    }

    /// Build a grid from explicit origins.
    pub fn from_origins(origins: impl Into<Vec<[f32; 2]>>) -> Self {
        Self {
            origins: origins.into().into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Origin of point `i` as `[x0, z0]`.
    pub fn origin(&self, i: usize) -> Option<[f32; 2]> {
        self.origins.get(i).copied()
    }

    /// All origins in point order.
    pub fn origins(&self) -> &[[f32; 2]] {
        &self.origins
    }
}

/// Points per lattice row.
fn lattice_side(count: usize) -> usize {
    let mut side = (count as f64).sqrt().ceil() as usize;
    // Guard against sqrt rounding below an exact square.
    while side * side < count {
        side += 1;
    }
    side.max(1)
}
