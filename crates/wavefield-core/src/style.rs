//! Scene, speed and accent selections.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Background scene to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scene {
    #[default]
    NeuralWave,
    Atmosphere,
    None,
}

impl Scene {
    /// Cycle to the next scene.
    pub fn next(self) -> Self {
        match self {
            Scene::NeuralWave => Scene::Atmosphere,
            Scene::Atmosphere => Scene::None,
            Scene::None => Scene::NeuralWave,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Scene::NeuralWave => "neural wave",
            Scene::Atmosphere => "atmosphere",
            Scene::None => "none",
        }
    }
}

/// Animation playback speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to wall-clock time.
    pub fn time_scale(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    /// One step faster, saturating at [`AnimationSpeed::Fast`].
    pub fn faster(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium | AnimationSpeed::Fast => AnimationSpeed::Fast,
        }
    }

    /// One step slower, saturating at [`AnimationSpeed::Slow`].
    pub fn slower(self) -> Self {
        match self {
            AnimationSpeed::Fast => AnimationSpeed::Medium,
            AnimationSpeed::Medium | AnimationSpeed::Slow => AnimationSpeed::Slow,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

/// Accent used for highlighted particles and the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccentTheme {
    #[default]
    Lime,
    Cyan,
    Magenta,
    Amber,
    Rose,
    White,
}

impl AccentTheme {
    /// Cycle to the next accent.
    pub fn next(self) -> Self {
        match self {
            AccentTheme::Lime => AccentTheme::Cyan,
            AccentTheme::Cyan => AccentTheme::Magenta,
            AccentTheme::Magenta => AccentTheme::Amber,
            AccentTheme::Amber => AccentTheme::Rose,
            AccentTheme::Rose => AccentTheme::White,
            AccentTheme::White => AccentTheme::Lime,
        }
    }

    /// Accent color.
    pub fn rgb(self) -> Rgb {
        match self {
            AccentTheme::Lime => Rgb::new(163.0 / 255.0, 230.0 / 255.0, 53.0 / 255.0),
            AccentTheme::Cyan => Rgb::new(0.13, 0.83, 0.93),
            AccentTheme::Magenta => Rgb::new(0.85, 0.27, 0.94),
            AccentTheme::Amber => Rgb::new(0.96, 0.62, 0.04),
            AccentTheme::Rose => Rgb::new(0.96, 0.25, 0.37),
            AccentTheme::White => Rgb::WHITE,
        }
    }
}
