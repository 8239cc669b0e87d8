//! Tuning parameters for the particle field.

use serde::{Deserialize, Serialize};

/// Parameters of the pointer-reactive particle field.
///
/// Defaults reproduce the neural wave background: an 8000 point lattice
/// spaced 0.5 apart, a travelling interference wave of amplitude 2 and a
/// radial lift of 5 units within 6 units of the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Number of lattice points.
    pub count: usize,
    /// Distance between neighbouring lattice points.
    pub spacing: f32,
    /// Spatial frequency of the ambient wave.
    pub frequency: f32,
    /// Peak height of the ambient wave.
    pub amplitude: f32,
    /// World units spanned by a normalized pointer coordinate of 1.0.
    pub world_scale: f32,
    /// Radius around the pointer within which points are lifted.
    pub influence_radius: f32,
    /// Lift applied directly under the pointer.
    pub lift_strength: f32,
    /// Heights above this get the highlight color.
    pub highlight_threshold: f32,
    /// Grey luminance at the bottom of the wave.
    pub grey_min: f32,
    /// Grey luminance just below the highlight threshold.
    pub grey_max: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: 8000,
            spacing: 0.5,
            frequency: 0.3,
            amplitude: 2.0,
            world_scale: 25.0,
            influence_radius: 6.0,
            lift_strength: 5.0,
            highlight_threshold: 2.0,
            grey_min: 0.3,
            grey_max: 0.8,
        }
    }
}
