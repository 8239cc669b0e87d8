//! Scene state management.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use wavefield_core::{FieldParams, Pointer, Rgb, Scene};

use crate::animations::{atmosphere::Atmosphere, cursor::CursorFollower, neural_wave};
use crate::animations::neural_wave::{FieldCell, ParticleFieldAnimator};
use crate::camera::Camera;
use crate::chars::{CURSOR_DOT, CURSOR_RING};

/// Everything needed to animate and draw the scenes.
#[derive(Debug)]
pub struct SceneState {
    /// Particle field buffers.
    field: ParticleFieldAnimator,
    /// View onto the particle field.
    camera: Camera,
    /// Projected particles, one slot per cell of the last rendered area.
    raster: Vec<Option<FieldCell>>,
    /// Cloud scene.
    atmosphere: Atmosphere,
    /// Cursor dot and follower ring.
    cursor: CursorFollower,
    /// Accent for highlights and the cursor.
    accent: Rgb,
    /// Whether to draw the cursor.
    show_cursor: bool,
    /// Time and pointer of the last field update.
    last_input: Option<(f32, Pointer)>,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
    /// Something other than the field changed since the last render.
    dirty: bool,
}

impl SceneState {
    /// Create the scene state and build the particle lattice.
    pub fn new(params: FieldParams, accent: Rgb) -> Self {
        let field = ParticleFieldAnimator::lattice(params, accent);
        tracing::debug!(points = field.len(), "built particle lattice");
        Self {
            field,
            camera: Camera::field(),
            raster: Vec::new(),
            atmosphere: Atmosphere::new(),
            cursor: CursorFollower::new(),
            accent,
            show_cursor: true,
            last_input: None,
            last_width: 0,
            last_height: 0,
            dirty: true,
        }
    }

    /// Replace the field parameters, rebuilding the lattice.
    pub fn set_params(&mut self, params: FieldParams) {
        if *self.field.params() == params {
            return;
        }
        self.field = ParticleFieldAnimator::lattice(params, self.accent);
        self.last_input = None;
        tracing::debug!(points = self.field.len(), "rebuilt particle lattice");
    }

    /// Change the accent color.
    pub fn set_accent(&mut self, accent: Rgb) {
        self.accent = accent;
        self.field.set_highlight(accent);
        // Force the next tick to recolor even if nothing else moved.
        self.last_input = None;
        self.dirty = true;
    }

    pub fn set_show_cursor(&mut self, show: bool) {
        self.show_cursor = show;
        self.dirty = true;
    }

    pub fn field(&self) -> &ParticleFieldAnimator {
        &self.field
    }

    pub fn atmosphere(&self) -> &Atmosphere {
        &self.atmosphere
    }

    pub fn cursor(&self) -> &CursorFollower {
        &self.cursor
    }

    /// Record a pointer sample for the cursor. Field and atmosphere read
    /// the pointer passed to [`tick`](Self::tick).
    pub fn pointer_moved(&mut self, pointer: Pointer) {
        self.cursor.set_target(pointer);
        self.dirty = true;
    }

    /// Advance the active scene to `elapsed` seconds and the cursor by `dt`
    /// wall-clock seconds.
    pub fn tick(&mut self, scene: Scene, elapsed: f32, dt: f32, pointer: Pointer) {
        if self.cursor.update(dt) {
            self.dirty = true;
        }

        match scene {
            Scene::NeuralWave => {
                if self.last_input != Some((elapsed, pointer)) {
                    self.field.update(elapsed, pointer);
                    self.last_input = Some((elapsed, pointer));
                }
            }
            Scene::Atmosphere => {
                // The flashlight and tilt keep easing even while time is paused.
                self.atmosphere.update(elapsed, pointer);
                self.dirty = true;
            }
            Scene::None => {}
        }
    }

    /// Whether the next render would differ from the last one.
    pub fn needs_redraw(&self) -> bool {
        self.dirty || self.field.is_dirty()
    }

    /// Render the scene and cursor to the frame.
    pub fn render(&mut self, frame: &mut Frame, scene: Scene) {
        let area = frame.area();
        let width = area.width;
        let height = area.height;

        if width != self.last_width || height != self.last_height {
            tracing::debug!(width, height, "scene area resized");
            self.last_width = width;
            self.last_height = height;
        }

        if scene == Scene::NeuralWave {
            neural_wave::rasterize(&self.field.snapshot(), &self.camera, area, &mut self.raster);
        }

        let lines: Vec<Line> = (0..height)
            .map(|y| {
                let spans: Vec<Span> = (0..width)
                    .map(|x| self.render_char(x, y, area, scene))
                    .collect();
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);

        self.field.mark_clean();
        self.dirty = false;
    }

    /// Render a single character at the given position, cursor first.
    fn render_char(&self, x: u16, y: u16, area: Rect, scene: Scene) -> Span<'static> {
        if let Some(span) = self.render_cursor_char(x, y, area) {
            return span;
        }
        match scene {
            Scene::NeuralWave => neural_wave::render_char(&self.raster, x, y, area.width),
            Scene::Atmosphere => self.atmosphere.render_char(x, y, area.width, area.height),
            Scene::None => Span::raw(" "),
        }
    }

    fn render_cursor_char(&self, x: u16, y: u16, area: Rect) -> Option<Span<'static>> {
        if !self.show_cursor || !self.cursor.is_active() {
            return None;
        }
        let local = Rect::new(0, 0, area.width, area.height);
        let accent = self.accent.to_color();
        if self.cursor.dot().to_cell(local) == (x, y) {
            return Some(Span::styled(CURSOR_DOT.to_string(), Style::new().fg(accent)));
        }
        if self.cursor.ring().to_cell(local) == (x, y) {
            return Some(Span::styled(
                CURSOR_RING.to_string(),
                Style::new().fg(accent).bold(),
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    const LIME: Rgb = Rgb::new(0.64, 0.9, 0.2);

    fn small_params() -> FieldParams {
        FieldParams {
            count: 2500,
            ..Default::default()
        }
    }

    fn draw(state: &mut SceneState, scene: Scene) -> ratatui::buffer::Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|frame| state.render(frame, scene)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn non_blank(buffer: &ratatui::buffer::Buffer) -> usize {
        buffer.content().iter().filter(|c| c.symbol() != " ").count()
    }

    #[test]
    fn test_neural_wave_draws_particles() {
        let mut state = SceneState::new(small_params(), LIME);
        state.set_show_cursor(false);
        state.tick(Scene::NeuralWave, 0.0, 0.0, Pointer::CENTER);
        let buffer = draw(&mut state, Scene::NeuralWave);
        assert!(non_blank(&buffer) > 100);
        assert!(!state.needs_redraw());
    }

    #[test]
    fn test_none_scene_is_blank() {
        let mut state = SceneState::new(small_params(), LIME);
        state.set_show_cursor(false);
        state.tick(Scene::None, 1.0, 0.016, Pointer::CENTER);
        let buffer = draw(&mut state, Scene::None);
        assert_eq!(non_blank(&buffer), 0);
    }

    #[test]
    fn test_unchanged_input_skips_field_update() {
        let mut state = SceneState::new(small_params(), LIME);
        state.tick(Scene::NeuralWave, 1.0, 0.0, Pointer::CENTER);
        draw(&mut state, Scene::NeuralWave);
        state.tick(Scene::NeuralWave, 1.0, 0.0, Pointer::CENTER);
        assert!(!state.needs_redraw());
        state.tick(Scene::NeuralWave, 1.1, 0.0, Pointer::CENTER);
        assert!(state.needs_redraw());
    }

    #[test]
    fn test_accent_change_forces_recolor() {
        let mut state = SceneState::new(small_params(), LIME);
        state.tick(Scene::NeuralWave, 0.0, 0.0, Pointer::CENTER);
        draw(&mut state, Scene::NeuralWave);

        state.set_accent(Rgb::WHITE);
        state.tick(Scene::NeuralWave, 0.0, 0.0, Pointer::CENTER);
        assert!(state.needs_redraw());
        assert!(state.field().colors().contains(&Rgb::WHITE));
        assert!(!state.field().colors().contains(&LIME));
    }

    #[test]
    fn test_set_params_rebuilds_lattice() {
        let mut state = SceneState::new(small_params(), LIME);
        state.set_params(FieldParams {
            count: 100,
            ..Default::default()
        });
        assert_eq!(state.field().len(), 100);
    }

    #[test]
    fn test_cursor_drawn_over_scene() {
        let mut state = SceneState::new(small_params(), LIME);
        let area = Rect::new(0, 0, 60, 24);
        let pointer = Pointer::from_cell(10, 5, area);
        state.pointer_moved(pointer);
        state.tick(Scene::Atmosphere, 0.0, 0.016, pointer);
        let buffer = draw(&mut state, Scene::Atmosphere);
        assert_eq!(buffer[(10, 5)].symbol(), CURSOR_DOT.to_string());
    }

    #[test]
    fn test_atmosphere_renders_clouds() {
        let mut state = SceneState::new(small_params(), LIME);
        state.set_show_cursor(false);
        for frame in 0..30 {
            state.tick(Scene::Atmosphere, frame as f32 / 30.0, 1.0 / 30.0, Pointer::CENTER);
        }
        let buffer = draw(&mut state, Scene::Atmosphere);
        assert!(non_blank(&buffer) > 0);
    }
}
