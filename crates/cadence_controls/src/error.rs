//! Error types for cadence_controls

use thiserror::Error;

/// Errors that can occur while configuring or driving the controls
#[derive(Error, Debug)]
pub enum ControlsError {
    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text is not valid TOML for `ControlsConfig`
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration parsed but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for cadence_controls operations
pub type Result<T> = std::result::Result<T, ControlsError>;
