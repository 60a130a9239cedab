use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Largest accepted grid side length; larger configured values are clamped
pub const MAX_GRID_SIZE: usize = 100;

/// Default grid side length (10x10 cells)
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Default auto-run speed in generations per second
pub const DEFAULT_SIMULATION_SPEED: u32 = 12;

/// Default window size in logical pixels
pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 500;

/// Redraw rate while no auto-run is active
pub const IDLE_FPS: u32 = 15;

/// Number of trailing history snapshots compared against during auto-run.
/// Cycles with a longer period are not detected.
pub const STAGNATION_WINDOW: usize = 4;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the config file path
pub const CONFIG_PATH_ENV: &str = "LIFE_CONFIG";

// ============================================
// Colours (linear RGBA)
// ============================================

pub const ALIVE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const DEAD_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const GRID_LINE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Errors raised while reading a config file. Callers recover from all of
/// them by falling back to [`Config::default`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Flat key-value layout of `config.json`. All four keys are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawConfig {
    gridsize: u64,
    simulation_speed: u32,
    width: u32,
    height: u32,
}

/// Startup options, read once and never written back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub grid_size: usize,
    pub simulation_speed: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            simulation_speed: DEFAULT_SIMULATION_SPEED,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Config {
    /// Load the config file named by `LIFE_CONFIG`, or `config.json`.
    pub fn load() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| CONFIG_FILE.to_string());
        Self::load_or_default(path)
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or unusable. Never fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let config = if path.exists() {
            log::info!("Config file found, using values from {}", path.display());
            match Self::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Invalid config file ({}), using default values", e);
                    Self::default()
                }
            }
        } else {
            log::info!(
                "Config file {} not found, using default values",
                path.display()
            );
            Self::default()
        };

        log::info!("Grid size: {}x{}", config.grid_size, config.grid_size);
        log::info!("Simulation speed: {} FPS", config.simulation_speed);
        log::info!("Window size: {}x{}", config.width, config.height);
        config
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON document. `GRIDSIZE` above the maximum is
    /// clamped; zero values are rejected.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;

        if raw.gridsize == 0 {
            return Err(ConfigError::Invalid("GRIDSIZE must be at least 1".into()));
        }
        if raw.simulation_speed == 0 {
            return Err(ConfigError::Invalid(
                "SIMULATION_SPEED must be at least 1".into(),
            ));
        }
        if raw.width == 0 || raw.height == 0 {
            return Err(ConfigError::Invalid(
                "WIDTH and HEIGHT must be at least 1".into(),
            ));
        }

        let grid_size = raw.gridsize.min(MAX_GRID_SIZE as u64) as usize;
        if grid_size as u64 != raw.gridsize {
            log::warn!(
                "GRIDSIZE {} exceeds the maximum, clamped to {}",
                raw.gridsize,
                MAX_GRID_SIZE
            );
        }

        Ok(Self {
            grid_size,
            simulation_speed: raw.simulation_speed,
            width: raw.width,
            height: raw.height,
        })
    }

    /// Cell size in logical pixels as `(width, height)`, never zero
    pub fn cell_size(&self) -> (u32, u32) {
        let cells = self.grid_size as u32;
        ((self.width / cells).max(1), (self.height / cells).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.simulation_speed, 12);
        assert_eq!((config.width, config.height), (500, 500));
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_json(
            r#"{"GRIDSIZE": 40, "SIMULATION_SPEED": 30, "WIDTH": 800, "HEIGHT": 600}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            Config {
                grid_size: 40,
                simulation_speed: 30,
                width: 800,
                height: 600,
            }
        );
    }

    #[test]
    fn test_grid_size_clamped() {
        let config = Config::from_json(
            r#"{"GRIDSIZE": 250, "SIMULATION_SPEED": 12, "WIDTH": 500, "HEIGHT": 500}"#,
        )
        .unwrap();
        assert_eq!(config.grid_size, MAX_GRID_SIZE);
    }

    #[test]
    fn test_missing_key_is_error() {
        let err = Config::from_json(r#"{"GRIDSIZE": 20, "WIDTH": 500, "HEIGHT": 500}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_wrong_type_is_error() {
        let err = Config::from_json(
            r#"{"GRIDSIZE": "big", "SIMULATION_SPEED": 12, "WIDTH": 500, "HEIGHT": 500}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_values_rejected() {
        let err = Config::from_json(
            r#"{"GRIDSIZE": 0, "SIMULATION_SPEED": 12, "WIDTH": 500, "HEIGHT": 500}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_json(
            r#"{"GRIDSIZE": 10, "SIMULATION_SPEED": 0, "WIDTH": 500, "HEIGHT": 500}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_malformed_file_falls_back() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, "{{ not json").unwrap();
        let config = Config::load_or_default(file.path());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(
            file,
            r#"{{"GRIDSIZE": 25, "SIMULATION_SPEED": 5, "WIDTH": 300, "HEIGHT": 400}}"#
        )
        .unwrap();
        let config = Config::load_or_default(file.path());
        assert_eq!(config.grid_size, 25);
        assert_eq!(config.simulation_speed, 5);
        assert_eq!((config.width, config.height), (300, 400));
    }

    #[test]
    fn test_cell_size() {
        let config = Config::default();
        assert_eq!(config.cell_size(), (50, 50));

        // More cells than pixels still yields a usable divisor
        let tiny = Config {
            grid_size: 100,
            simulation_speed: 12,
            width: 50,
            height: 50,
        };
        assert_eq!(tiny.cell_size(), (1, 1));
    }
}
