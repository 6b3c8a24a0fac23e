//! Configuration file: key, output routing, mapper and sensor constants

use std::path::{Path, PathBuf};

use movements_core::{MotionConfig, REFERENCE_PITCH};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::orientation::SensorConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Engine(#[from] movements_core::MovementsError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementsConfig {
    /// Tonic the degree numerals are built on
    #[serde(default = "default_key_root")]
    pub key_root: i32,
    /// Semitones added on the way out, never inside the engine
    #[serde(default)]
    pub transpose: i32,
    /// Forward the bass pitch with each voicing
    #[serde(default = "default_bass")]
    pub bass: bool,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub sensor: SensorConfig,
}

fn default_key_root() -> i32 {
    REFERENCE_PITCH
}

fn default_bass() -> bool {
    true
}

impl Default for MovementsConfig {
    fn default() -> Self {
        Self {
            key_root: default_key_root(),
            transpose: 0,
            bass: default_bass(),
            motion: MotionConfig::default(),
            sensor: SensorConfig::default(),
        }
    }
}

impl MovementsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.motion.validate()?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movements")
        .join("config.toml")
}

/// Read the user config, falling back to defaults when missing or broken
pub fn load_config() -> MovementsConfig {
    let path = config_path();
    match load_from(&path) {
        Ok(config) => config,
        Err(ConfigError::Read { .. }) => {
            debug!(path = %path.display(), "No config file, using defaults");
            MovementsConfig::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring config file");
            MovementsConfig::default()
        }
    }
}

/// Strict load for an explicitly named file
pub fn load_from(path: &Path) -> Result<MovementsConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: MovementsConfig = toml::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

pub fn save_to(path: &Path, config: &MovementsConfig) -> Result<(), ConfigError> {
    let text = config.to_toml()?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::SignPolicy;

    #[test]
    fn test_empty_file_is_default() {
        let config: MovementsConfig = toml::from_str("").unwrap();
        assert_eq!(config, MovementsConfig::default());
        assert_eq!(config.key_root, 60);
        assert!(config.bass);
        assert_eq!(config.motion.roll_span, 72);
        assert_eq!(config.sensor.throttle_ms, 50);
    }

    #[test]
    fn test_partial_tables() {
        let config: MovementsConfig = toml::from_str(
            r#"
            key_root = 57
            transpose = -12

            [motion]
            deadzone = 0.1

            [sensor]
            sign = "negative_only"
            "#,
        )
        .unwrap();
        assert_eq!(config.key_root, 57);
        assert_eq!(config.transpose, -12);
        assert_eq!(config.motion.deadzone, 0.1);
        assert_eq!(config.motion.pivot_span, 24);
        assert_eq!(config.sensor.sign, SignPolicy::NegativeOnly);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = std::env::temp_dir().join(format!("movements-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let config = MovementsConfig {
            key_root: 65,
            bass: false,
            ..Default::default()
        };
        save_to(&path, &config).unwrap();
        assert_eq!(load_from(&path).unwrap(), config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_motion_is_rejected() {
        let dir = std::env::temp_dir().join(format!("movements-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[motion]\nroll_span = 0\n").unwrap();

        assert!(matches!(load_from(&path), Err(ConfigError::Engine(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let path = Path::new("/nonexistent/movements/config.toml");
        assert!(matches!(load_from(path), Err(ConfigError::Read { .. })));
    }
}
