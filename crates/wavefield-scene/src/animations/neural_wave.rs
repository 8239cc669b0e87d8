//! Pointer-reactive particle field (stateful).

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Span,
};
use wavefield_core::{FieldParams, Pointer, Rgb};

use super::field::{ambient_height, height_color, pointer_lift, project_pointer};
use super::grid::Grid;
use crate::camera::Camera;
use crate::chars::POINT_CHARS;
use crate::color::fogged;

/// Owns the particle buffers and advances them once per frame.
///
/// Origins never change after construction; each update rewrites every
/// height and color in place.
#[derive(Debug, Clone)]
pub struct ParticleFieldAnimator {
    /// Particle origins.
    grid: Grid,
    /// Current height of each particle.
    heights: Vec<f32>,
    /// Current color of each particle.
    colors: Vec<Rgb>,
    /// Field tuning.
    params: FieldParams,
    /// Color for particles above the highlight threshold.
    highlight: Rgb,
    /// Set by [`update`](Self::update), cleared by the renderer.
    dirty: bool,
}

impl ParticleFieldAnimator {
    /// Create an animator over an existing grid. Heights start flat.
    pub fn new(grid: Grid, params: FieldParams, highlight: Rgb) -> Self {
        let len = grid.len();
        let resting = height_color(0.0, &params, highlight);
        Self {
            grid,
            heights: vec![0.0; len],
            colors: vec![resting; len],
            params,
            highlight,
            dirty: true,
        }
    }

    /// Create an animator over the lattice described by `params`.
    pub fn lattice(params: FieldParams, highlight: Rgb) -> Self {
        Self::new(Grid::lattice(params.count, params.spacing), params, highlight)
    }

    /// Recompute every height and color for time `t` and the pointer.
    pub fn update(&mut self, t: f32, pointer: Pointer) {
        let (mx, mz) = project_pointer(pointer, self.params.world_scale);
        let params = &self.params;

        for ((origin, height), color) in self
            .grid
            .origins()
            .iter()
            .zip(self.heights.iter_mut())
            .zip(self.colors.iter_mut())
        {
            let [x0, z0] = *origin;
            let mut y = ambient_height(x0, z0, t, params);

            let dx = x0 - mx;
            let dz = z0 - mz;
            let distance = (dx * dx + dz * dz).sqrt();
            y += pointer_lift(distance, params.influence_radius, params.lift_strength);

            *height = y;
            *color = height_color(y, params, self.highlight);
        }

        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Origin of point `i` as `[x0, z0]`.
    pub fn origin(&self, i: usize) -> Option<[f32; 2]> {
        self.grid.origin(i)
    }

    /// Current height of point `i`.
    pub fn height(&self, i: usize) -> Option<f32> {
        self.heights.get(i).copied()
    }

    /// Current color of point `i`.
    pub fn color(&self, i: usize) -> Option<Rgb> {
        self.colors.get(i).copied()
    }

    /// Current `[x, y, z]` positions in point order.
    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.grid
            .origins()
            .iter()
            .zip(&self.heights)
            .map(|(&[x, z], &y)| [x, y, z])
    }

    /// Current colors in point order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Borrow the buffers for drawing.
    pub fn snapshot(&self) -> FieldSnapshot<'_> {
        FieldSnapshot {
            origins: self.grid.origins(),
            heights: &self.heights,
            colors: &self.colors,
        }
    }

    /// Change the highlight color used by subsequent updates.
    pub fn set_highlight(&mut self, highlight: Rgb) {
        self.highlight = highlight;
    }

    /// Whether the buffers changed since the last [`mark_clean`](Self::mark_clean).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// Read-only view of the particle buffers for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FieldSnapshot<'a> {
    pub origins: &'a [[f32; 2]],
    pub heights: &'a [f32],
    pub colors: &'a [Rgb],
}

impl FieldSnapshot<'_> {
    /// `([x, y, z], color)` for every particle.
    pub fn points(&self) -> impl Iterator<Item = ([f32; 3], Rgb)> + '_ {
        self.origins
            .iter()
            .zip(self.heights)
            .zip(self.colors)
            .map(|((&[x, z], &y), &color)| ([x, y, z], color))
    }
}

/// A particle drawn into a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldCell {
    pub ch: char,
    pub color: Color,
    pub depth: f32,
}

/// Project the snapshot into a per-cell buffer for `area`.
///
/// `raster` is resized to the area and reused across frames. When several
/// particles land in one cell, the nearest wins.
pub fn rasterize(
    snapshot: &FieldSnapshot<'_>,
    camera: &Camera,
    area: Rect,
    raster: &mut Vec<Option<FieldCell>>,
) {
    raster.clear();
    raster.resize(area.width as usize * area.height as usize, None);

    for (position, color) in snapshot.points() {
        let Some(projected) = camera.project(position, area) else {
            continue;
        };
        let idx = (projected.row - area.y) as usize * area.width as usize
            + (projected.column - area.x) as usize;
        if let Some(existing) = &raster[idx]
            && existing.depth <= projected.depth
        {
            continue;
        }
        raster[idx] = Some(FieldCell {
            ch: point_char(projected.depth),
            color: fogged(color, projected.depth).to_color(),
            depth: projected.depth,
        });
    }
}

/// Render a particle field character from the raster.
pub fn render_char(raster: &[Option<FieldCell>], x: u16, y: u16, width: u16) -> Span<'static> {
    let idx = y as usize * width as usize + x as usize;
    match raster.get(idx).copied().flatten() {
        Some(cell) => Span::styled(cell.ch.to_string(), Style::new().fg(cell.color)),
        None => Span::raw(" "),
    }
}

/// Glyph for a particle at `depth`: larger when nearer.
fn point_char(depth: f32) -> char {
    if depth < 20.0 {
        POINT_CHARS[0]
    } else if depth < 32.0 {
        POINT_CHARS[1]
    } else {
        POINT_CHARS[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIME: Rgb = Rgb::new(0.64, 0.9, 0.2);

    fn square_field() -> ParticleFieldAnimator {
        let grid = Grid::from_origins(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        ParticleFieldAnimator::new(grid, FieldParams::default(), LIME)
    }

    #[test]
    fn test_four_point_scenario() {
        let mut field = square_field();
        field.update(0.0, Pointer::CENTER);

        // Ambient 0, lift (6 - 0) / 6 * 5.
        assert!((field.height(0).unwrap() - 5.0).abs() < 1e-5);
        assert_eq!(field.color(0), Some(LIME));

        let expected = (0.3f32).sin() * (0.3f32).cos() * 2.0
            + (6.0 - 2.0f32.sqrt()) / 6.0 * 5.0;
        let y = field.height(3).unwrap();
        assert!((y - expected).abs() < 1e-5);
        assert!((y - 4.38).abs() < 0.01);
        assert_eq!(field.color(3), Some(LIME));
    }

    #[test]
    fn test_point_count_is_fixed() {
        let mut field = ParticleFieldAnimator::lattice(FieldParams::default(), LIME);
        assert_eq!(field.len(), 8000);
        field.update(1.0, Pointer::new(0.3, -0.7));
        field.update(2.0, Pointer::new(-1.0, 1.0));
        assert_eq!(field.len(), 8000);
        assert_eq!(field.positions().count(), 8000);
        assert_eq!(field.colors().len(), 8000);
    }

    #[test]
    fn test_update_keeps_origins() {
        let mut field = square_field();
        field.update(4.2, Pointer::new(0.1, 0.1));
        let positions: Vec<_> = field.positions().collect();
        assert_eq!(positions[3][0], 1.0);
        assert_eq!(positions[3][2], 1.0);
        assert_eq!(field.origin(2), Some([0.0, 1.0]));
    }

    #[test]
    fn test_restart_reproduces_first_frame() {
        let mut field = ParticleFieldAnimator::lattice(
            FieldParams {
                count: 900,
                ..Default::default()
            },
            LIME,
        );
        let pointer = Pointer::new(0.2, -0.4);
        field.update(0.0, pointer);
        let heights: Vec<f32> = field.positions().map(|p| p[1]).collect();
        let colors = field.colors().to_vec();

        field.update(7.5, Pointer::new(-0.9, 0.9));
        field.update(0.0, pointer);

        let replay: Vec<f32> = field.positions().map(|p| p[1]).collect();
        assert_eq!(heights, replay);
        assert_eq!(colors, field.colors());
    }

    #[test]
    fn test_color_is_function_of_height() {
        let grid = Grid::from_origins(vec![[0.0, 0.0]]);
        let params = FieldParams::default();
        let mut field = ParticleFieldAnimator::new(grid, params, LIME);

        // Different pointer states, both out of reach: identical height and color.
        field.update(0.0, Pointer::new(1.0, 1.0));
        let (y1, c1) = (field.height(0).unwrap(), field.color(0).unwrap());
        field.update(0.0, Pointer::new(-1.0, -1.0));
        let (y2, c2) = (field.height(0).unwrap(), field.color(0).unwrap());
        assert_eq!(y1, y2);
        assert_eq!(c1, c2);

        // Any other frame: the stored color is recomputable from the height alone.
        field.update(std::f32::consts::PI, Pointer::new(0.1, 0.0));
        let y3 = field.height(0).unwrap();
        assert_eq!(field.color(0), Some(height_color(y3, &params, LIME)));
    }

    #[test]
    fn test_pointer_at_radius_adds_no_lift() {
        let params = FieldParams {
            world_scale: 24.0,
            ..Default::default()
        };
        let grid = Grid::from_origins(vec![[0.0, 0.0]]);
        let mut field = ParticleFieldAnimator::new(grid, params, LIME);
        // 0.25 * 24 lands exactly one radius away along x.
        field.update(0.0, Pointer::new(0.25, 0.0));
        assert_eq!(field.height(0), Some(0.0));
    }

    #[test]
    fn test_pointer_y_maps_to_far_side() {
        let grid = Grid::from_origins(vec![[0.0, -10.0], [0.0, 10.0]]);
        let mut field = ParticleFieldAnimator::new(grid, FieldParams::default(), LIME);
        field.update(0.0, Pointer::new(0.0, 0.4));
        let far = field.height(0).unwrap();
        let near = field.height(1).unwrap();
        assert!(far > near);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut field = square_field();
        assert!(field.is_dirty());
        field.mark_clean();
        assert!(!field.is_dirty());
        field.update(0.5, Pointer::CENTER);
        assert!(field.is_dirty());
    }

    #[test]
    fn test_set_highlight_applies_on_next_update() {
        let mut field = square_field();
        field.update(0.0, Pointer::CENTER);
        field.set_highlight(Rgb::WHITE);
        assert_eq!(field.color(0), Some(LIME));
        field.update(0.0, Pointer::CENTER);
        assert_eq!(field.color(0), Some(Rgb::WHITE));
    }

    #[test]
    fn test_snapshot_matches_buffers() {
        let mut field = square_field();
        field.update(1.0, Pointer::CENTER);
        let snapshot = field.snapshot();
        let points: Vec<_> = snapshot.points().collect();
        assert_eq!(points.len(), 4);
        for (i, (position, color)) in points.into_iter().enumerate() {
            assert_eq!(Some(position[1]), field.height(i));
            assert_eq!(Some(color), field.color(i));
        }
    }

    #[test]
    fn test_rasterize_keeps_nearest() {
        let grid = Grid::from_origins(vec![[0.0, 0.0], [0.0, -0.01]]);
        let field = ParticleFieldAnimator::new(grid, FieldParams::default(), LIME);
        let camera = Camera::field();
        let area = Rect::new(0, 0, 41, 21);
        let mut raster = Vec::new();
        rasterize(&field.snapshot(), &camera, area, &mut raster);

        assert_eq!(raster.len(), 861);
        let drawn: Vec<_> = raster.iter().flatten().collect();
        assert_eq!(drawn.len(), 1);
        let near = camera.project([0.0, 0.0, 0.0], area).unwrap();
        assert!((drawn[0].depth - near.depth).abs() < 1e-5);
    }

    #[test]
    fn test_rasterize_empty_area() {
        let field = square_field();
        let mut raster = vec![None; 12];
        rasterize(&field.snapshot(), &Camera::field(), Rect::new(0, 0, 0, 0), &mut raster);
        assert!(raster.is_empty());
        assert_eq!(render_char(&raster, 0, 0, 0), Span::raw(" "));
    }
}
