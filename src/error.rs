//! Error types
//!
//! None of these ever reach the host: the engine degrades the feature
//! instead. They exist for configuration loading and for the speech
//! boundary.

use std::path::PathBuf;

/// Errors raised while loading [`EngineConfig`](crate::config::EngineConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Errors reported by a speech backend
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// The underlying engine is not installed or not reachable
    #[error("speech engine is not available")]
    Unavailable,

    /// A single request failed; later requests may still succeed
    #[error("speech request failed: {0}")]
    Failed(String),
}
