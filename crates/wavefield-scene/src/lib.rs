//! Scene rendering for wavefield.
//!
//! This crate owns the pointer-reactive particle field (the "neural
//! wave"), the cloud atmosphere scene and the cursor follower, and renders
//! them into a ratatui frame. Everything is advanced once per frame from
//! an elapsed time and the latest pointer sample.

mod animations;
mod camera;
mod chars;
mod clock;
mod color;
mod state;

pub use animations::atmosphere::Atmosphere;
pub use animations::cursor::{CursorFollower, ease_out_cubic};
pub use animations::field::{ambient_height, height_color, pointer_lift, project_pointer};
pub use animations::grid::Grid;
pub use animations::neural_wave::{FieldSnapshot, ParticleFieldAnimator};
pub use camera::{Camera, Projected};
pub use clock::Clock;
pub use color::fog_factor;
pub use state::SceneState;
