//! Cursor dot with an eased follower ring.

use wavefield_core::Pointer;

/// Seconds the ring takes to catch up with the pointer.
pub const FOLLOW_DURATION: f32 = 0.6;

/// Tracks the pointer and a ring that tweens after it.
///
/// Each time the pointer moves, a new tween starts from wherever the ring
/// currently is, so rapid movement never makes the ring jump.
#[derive(Debug, Clone)]
pub struct CursorFollower {
    /// Latest pointer sample.
    target: Pointer,
    /// Ring position when the current tween started.
    from: Pointer,
    /// Current ring position.
    ring: Pointer,
    /// Seconds into the current tween.
    progress: f32,
    /// Whether any pointer sample has arrived.
    seen: bool,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorFollower {
    pub fn new() -> Self {
        Self {
            target: Pointer::CENTER,
            from: Pointer::CENTER,
            ring: Pointer::CENTER,
            progress: FOLLOW_DURATION,
            seen: false,
        }
    }

    /// Record the latest pointer sample.
    pub fn set_target(&mut self, pointer: Pointer) {
        if !self.seen {
            // First sample: snap instead of sweeping in from the centre.
            self.seen = true;
            self.target = pointer;
            self.from = pointer;
            self.ring = pointer;
            self.progress = FOLLOW_DURATION;
            return;
        }
        if pointer != self.target {
            self.from = self.ring;
            self.target = pointer;
            self.progress = 0.0;
        }
    }

    /// Advance the ring by `dt` seconds. Returns whether it moved.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.progress >= FOLLOW_DURATION {
            return false;
        }
        self.progress = (self.progress + dt.max(0.0)).min(FOLLOW_DURATION);
        let eased = ease_out_cubic(self.progress / FOLLOW_DURATION);
        let previous = self.ring;
        self.ring = Pointer::new(
            self.from.x + (self.target.x - self.from.x) * eased,
            self.from.y + (self.target.y - self.from.y) * eased,
        );
        self.ring != previous
    }

    /// Whether a pointer sample has been seen yet.
    pub fn is_active(&self) -> bool {
        self.seen
    }

    /// Position of the dot.
    pub fn dot(&self) -> Pointer {
        self.target
    }

    /// Position of the ring.
    pub fn ring(&self) -> Pointer {
        self.ring
    }
}

/// Cubic ease-out: fast start, gentle arrival.
pub fn ease_out_cubic(p: f32) -> f32 {
    let inv = 1.0 - p.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}
