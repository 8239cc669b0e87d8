//! Animation clock.

use std::time::Duration;

use wavefield_core::AnimationSpeed;

/// Monotonic animation time, advanced explicitly once per frame.
///
/// Time only moves forward through [`Clock::advance`]; a paused clock
/// ignores advances and [`Clock::reset`] restarts from zero.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    /// Elapsed animation seconds.
    elapsed: f64,
    /// Whether advances are currently ignored.
    paused: bool,
}

impl Clock {
    /// Create a running clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by a wall-clock step scaled by `speed`.
    pub fn advance(&mut self, dt: Duration, speed: AnimationSpeed) {
        if self.paused {
            return;
        }
        self.elapsed += dt.as_secs_f64() * speed.time_scale() as f64;
    }

    /// Elapsed animation time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Restart from zero, keeping the paused flag.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scales_with_speed() {
        let mut clock = Clock::new();
        clock.advance(Duration::from_millis(500), AnimationSpeed::Medium);
        assert!((clock.elapsed() - 0.5).abs() < 1e-6);
        clock.advance(Duration::from_millis(500), AnimationSpeed::Fast);
        assert!((clock.elapsed() - 1.5).abs() < 1e-6);
        clock.advance(Duration::from_secs(1), AnimationSpeed::Slow);
        assert!((clock.elapsed() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_pause_freezes_time() {
        let mut clock = Clock::new();
        clock.advance(Duration::from_secs(1), AnimationSpeed::Medium);
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.advance(Duration::from_secs(5), AnimationSpeed::Medium);
        assert_eq!(clock.elapsed(), 1.0);
        clock.resume();
        clock.advance(Duration::from_secs(1), AnimationSpeed::Medium);
        assert_eq!(clock.elapsed(), 2.0);
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let mut clock = Clock::new();
        clock.advance(Duration::from_secs(3), AnimationSpeed::Fast);
        clock.pause();
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
        assert!(clock.is_paused());
    }
}
