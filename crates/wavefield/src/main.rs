use std::{
    io::stdout,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::Line,
};
use wavefield_config::Config;
use wavefield_core::{AccentTheme, AnimationSpeed, Pointer, Scene};
use wavefield_scene::{Clock, SceneState};

mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    match logging::init() {
        Ok(path) => tracing::info!(path = %path.display(), "logging started"),
        Err(e) => eprintln!("wavefield: logging disabled: {e}"),
    }
    let config = Config::load()?;

    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|()| App::new(config).run(terminal));
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded configuration, updated when settings are saved.
    config: Config,
    /// Active scene.
    scene: Scene,
    /// Playback speed.
    speed: AnimationSpeed,
    /// Accent for highlights and the cursor.
    accent: AccentTheme,
    /// Whether the help line is drawn.
    show_help: bool,
    /// Animation time.
    clock: Clock,
    /// Latest pointer sample.
    pointer: Pointer,
    /// Area of the last drawn frame, used to normalize mouse positions.
    area: Rect,
    /// Scene buffers.
    state: SceneState,
    /// Status or help changed since the last draw.
    ui_dirty: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let mut state = SceneState::new(config.field, config.accent.rgb());
        state.set_show_cursor(config.show_cursor);
        Self {
            running: false,
            scene: config.scene,
            speed: config.speed,
            accent: config.accent,
            show_help: config.show_help,
            clock: Clock::new(),
            pointer: Pointer::CENTER,
            area: Rect::default(),
            state,
            ui_dirty: true,
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let frame_budget = Duration::from_secs_f64(1.0 / self.config.fps.max(1) as f64);
        tracing::info!(
            fps = self.config.fps,
            scene = self.scene.name(),
            points = self.state.field().len(),
            "starting"
        );

        let mut last_frame = Instant::now();
        while self.running {
            let frame_start = Instant::now();
            let dt = frame_start - last_frame;
            last_frame = frame_start;

            self.clock.advance(dt, self.speed);
            self.state
                .tick(self.scene, self.clock.elapsed(), dt.as_secs_f32(), self.pointer);

            if self.ui_dirty || self.state.needs_redraw() {
                terminal.draw(|frame| self.render(frame))?;
                self.ui_dirty = false;
            }

            self.handle_crossterm_events(frame_budget.saturating_sub(frame_start.elapsed()))?;
        }
        tracing::info!("exiting");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        self.area = frame.area();
        self.state.render(frame, self.scene);

        if !self.show_help {
            return;
        }
        let color = self.accent.rgb().to_color();
        let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(self.area);
        let mut status = format!("{} · {}", self.scene.name(), self.speed.name());
        if self.clock.is_paused() {
            status.push_str(" · paused");
        }
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "s".bold().fg(color),
            " scene  ".dark_gray(),
            "c".bold().fg(color),
            " color  ".dark_gray(),
            "␣".bold().fg(color),
            " pause  ".dark_gray(),
            "r".bold().fg(color),
            " restart  ".dark_gray(),
            "+/-".bold().fg(color),
            " speed  ".dark_gray(),
            "w".bold().fg(color),
            " save  ".dark_gray(),
            "h".bold().fg(color),
            " hide help   ".dark_gray(),
            status.fg(color),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits up to `timeout` for the first event, then drains whatever
    /// else is already queued so only the latest pointer sample counts.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(_, _) => self.ui_dirty = true,
                _ => {}
            }
            if !self.running || !event::poll(Duration::ZERO)? {
                break;
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('s')) => self.cycle_scene(),
            (_, KeyCode::Char('c')) => self.cycle_accent(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('r')) => self.restart(),
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => self.set_speed(self.speed.faster()),
            (_, KeyCode::Char('-')) => self.set_speed(self.speed.slower()),
            (_, KeyCode::Char('h')) => self.toggle_help(),
            (_, KeyCode::Char('w')) => self.save_config(),
            _ => {}
        }
    }

    /// Track the pointer from mouse movement.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                self.pointer = Pointer::from_cell(mouse.column, mouse.row, self.area);
                self.state.pointer_moved(self.pointer);
            }
            _ => {}
        }
    }

    /// Cycle through available scenes.
    fn cycle_scene(&mut self) {
        self.scene = self.scene.next();
        tracing::debug!(scene = self.scene.name(), "scene changed");
        self.ui_dirty = true;
    }

    /// Cycle through available accents.
    fn cycle_accent(&mut self) {
        self.accent = self.accent.next();
        self.state.set_accent(self.accent.rgb());
        self.ui_dirty = true;
    }

    fn toggle_pause(&mut self) {
        self.clock.toggle_pause();
        self.ui_dirty = true;
    }

    /// Restart the animation from time zero.
    fn restart(&mut self) {
        self.clock.reset();
        self.ui_dirty = true;
    }

    fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
        self.ui_dirty = true;
    }

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.ui_dirty = true;
    }

    /// Persist the current scene, speed, accent and help setting.
    fn save_config(&mut self) {
        self.config.scene = self.scene;
        self.config.speed = self.speed;
        self.config.accent = self.accent;
        self.config.show_help = self.show_help;
        match Config::default_path().and_then(|path| {
            self.config.save_to(&path)?;
            Ok(path)
        }) {
            Ok(path) => tracing::info!(path = %path.display(), "saved config"),
            Err(e) => tracing::warn!(error = %e, "failed to save config"),
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = App::new(Config::default());
            app.running = true;
            app.on_key_event(key);
            assert!(!app.running);
        }
    }

    #[test]
    fn test_cycle_keys() {
        let mut app = App::new(Config::default());
        app.on_key_event(press(KeyCode::Char('s')));
        assert_eq!(app.scene, Scene::Atmosphere);
        app.on_key_event(press(KeyCode::Char('c')));
        assert_eq!(app.accent, AccentTheme::Cyan);
        app.on_key_event(press(KeyCode::Char('+')));
        assert_eq!(app.speed, AnimationSpeed::Fast);
        app.on_key_event(press(KeyCode::Char('-')));
        app.on_key_event(press(KeyCode::Char('-')));
        assert_eq!(app.speed, AnimationSpeed::Slow);
    }

    #[test]
    fn test_pause_and_restart() {
        let mut app = App::new(Config::default());
        app.clock.advance(Duration::from_secs(2), AnimationSpeed::Medium);
        app.on_key_event(press(KeyCode::Char(' ')));
        assert!(app.clock.is_paused());
        app.on_key_event(press(KeyCode::Char('r')));
        assert_eq!(app.clock.elapsed(), 0.0);
    }

    #[test]
    fn test_mouse_moves_pointer() {
        let mut app = App::new(Config::default());
        app.area = Rect::new(0, 0, 81, 41);
        app.on_mouse_event(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 80,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.pointer, Pointer::new(1.0, 1.0));
        assert!(app.state.cursor().is_active());

        app.on_mouse_event(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 40,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.pointer, Pointer::new(1.0, 1.0));
    }
}
