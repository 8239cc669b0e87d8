//! Configuration file handling for wavefield.
//!
//! The configuration lives in a TOML file under the platform config
//! directory. A missing file yields the defaults; a present file only
//! needs the keys it wants to override.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wavefield_core::{AccentTheme, AnimationSpeed, FieldParams, Scene};

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "wavefield.log";

/// Upper bound on lattice size, keeps a frame well under a millisecond.
const MAX_POINTS: usize = 200_000;

/// Errors raised while loading, validating or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no home directory found to place the config in")]
    NoProjectDirs,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scene shown at startup.
    pub scene: Scene,
    /// Playback speed.
    pub speed: AnimationSpeed,
    /// Accent for highlighted particles and the cursor.
    pub accent: AccentTheme,
    /// Target frames per second.
    pub fps: u32,
    /// Draw the cursor dot and follower ring.
    pub show_cursor: bool,
    /// Draw the key help line.
    pub show_help: bool,
    /// Particle field tuning.
    pub field: FieldParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: Scene::default(),
            speed: AnimationSpeed::default(),
            accent: AccentTheme::default(),
            fps: 30,
            show_cursor: true,
            show_help: true,
            field: FieldParams::default(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, falling back to defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let contents = toml::to_string_pretty(self)?;
        let io_err = |source: io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, contents).map_err(io_err)?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Default config file path, e.g. `~/.config/wavefield/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
    }

    /// Log file path under the platform data directory.
    pub fn log_path() -> Result<PathBuf> {
        Ok(project_dirs()?.data_local_dir().join(LOG_FILE))
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !(1..=240).contains(&self.fps) {
            return Err(invalid("fps", format!("{} is outside 1..=240", self.fps)));
        }

        let f = &self.field;
        if f.count == 0 || f.count > MAX_POINTS {
            return Err(invalid(
                "field.count",
                format!("{} is outside 1..={MAX_POINTS}", f.count),
            ));
        }
        for (field, value) in [
            ("field.spacing", f.spacing),
            ("field.frequency", f.frequency),
            ("field.amplitude", f.amplitude),
            ("field.world_scale", f.world_scale),
            ("field.influence_radius", f.influence_radius),
            ("field.lift_strength", f.lift_strength),
            ("field.highlight_threshold", f.highlight_threshold),
            ("field.grey_min", f.grey_min),
            ("field.grey_max", f.grey_max),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not a finite number")));
            }
        }
        if f.spacing <= 0.0 {
            return Err(invalid("field.spacing", "must be positive".into()));
        }
        if f.amplitude < 0.0 {
            return Err(invalid("field.amplitude", "must not be negative".into()));
        }
        if f.influence_radius < 0.0 {
            return Err(invalid("field.influence_radius", "must not be negative".into()));
        }
        if !(0.0..=1.0).contains(&f.grey_min) || !(0.0..=1.0).contains(&f.grey_max) {
            return Err(invalid("field.grey_min", "greys must lie in 0.0..=1.0".into()));
        }
        if f.grey_min > f.grey_max {
            return Err(invalid(
                "field.grey_min",
                format!("{} exceeds grey_max {}", f.grey_min, f.grey_max),
            ));
        }
        Ok(())
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "wavefield").ok_or(ConfigError::NoProjectDirs)
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
