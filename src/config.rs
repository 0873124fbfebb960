//! Configuration loading and management

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::messages::Messages;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV: &str = "NARRATOR_CONFIG";
/// Environment override for the duplicate window
pub const DUPLICATE_WINDOW_ENV: &str = "NARRATOR_DUPLICATE_WINDOW_MS";

/// Connection-count bands for the dot puzzle hint
///
/// A count below `first_shape_from` means nothing is drawn yet; counts at or
/// above `done_from` mean both shapes are complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintBands {
    pub first_shape_from: usize,
    pub second_shape_from: usize,
    pub done_from: usize,
}

impl Default for HintBands {
    fn default() -> Self {
        Self {
            first_shape_from: 1,
            second_shape_from: 3,
            done_from: 6,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Identical announcements inside this window collapse to one
    pub duplicate_window_ms: u64,

    /// Minimum change of the one-decimal zoom ratio worth announcing
    pub zoom_threshold: f64,

    pub hint_bands: HintBands,

    /// Expected piece index for each step of the rotation puzzle
    pub rotate_solution: Vec<usize>,

    /// Child objects whose name contains any of these (case-insensitive)
    /// are not dots or hotspots
    pub exclusion_patterns: Vec<String>,

    /// Replay driver frame interval
    pub tick_interval_ms: u64,

    /// Message template overrides, keyed by message id
    pub messages: HashMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            duplicate_window_ms: 500,
            zoom_threshold: 0.05,
            hint_bands: HintBands::default(),
            rotate_solution: vec![2, 0, 3, 1],
            exclusion_patterns: vec![
                "marker".to_string(),
                "ignore".to_string(),
                "collider".to_string(),
            ],
            tick_interval_ms: 16,
            messages: HashMap::new(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };

        if let Ok(value) = std::env::var(DUPLICATE_WINDOW_ENV) {
            config.duplicate_window_ms = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: DUPLICATE_WINDOW_ENV,
                value,
            })?;
        }

        Ok(config)
    }

    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn duplicate_window(&self) -> Duration {
        Duration::from_millis(self.duplicate_window_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn message_catalog(&self) -> Messages {
        Messages::with_overrides(self.messages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.duplicate_window(), Duration::from_millis(500));
        assert_eq!(config.hint_bands.second_shape_from, 3);
        assert_eq!(config.rotate_solution, vec![2, 0, 3, 1]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"zoom_threshold": 0.1, "hint_bands": {"done_from": 8}}"#).unwrap();
        assert_eq!(config.zoom_threshold, 0.1);
        assert_eq!(config.hint_bands.done_from, 8);
        assert_eq!(config.hint_bands.first_shape_from, 1);
        assert_eq!(config.duplicate_window_ms, 500);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = EngineConfig::from_file(PathBuf::from("/nonexistent/narrator.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
