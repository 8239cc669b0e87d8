//! Core types shared across the wavefield crates.

mod color;
mod params;
mod pointer;
mod style;

pub use color::Rgb;
pub use params::FieldParams;
pub use pointer::Pointer;
pub use style::{AccentTheme, AnimationSpeed, Scene};
