//! Controls configuration
//!
//! All fields have defaults matching the stock look, so a configuration
//! file only needs to name what it changes:
//!
//! ```toml
//! button_size = 40.0
//! color = 0xffcc00
//!
//! [seek_spring]
//! stiffness = 5000.0
//! ```

use std::fs;
use std::path::Path;

use cadence_animation::SpringConfig;
use cadence_core::{Color, Stroke};
use serde::{Deserialize, Serialize};

use crate::error::{ControlsError, Result};

/// Spring parameters as they appear in configuration
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpringSettings {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Initial velocity
    pub velocity: f32,
}

impl SpringSettings {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
            velocity: 0.0,
        }
    }

    pub fn to_config(&self) -> SpringConfig {
        SpringConfig::new(self.stiffness, self.damping, self.mass)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !(self.stiffness > 0.0) {
            return Err(ControlsError::InvalidConfig(format!(
                "{name}.stiffness must be positive, got {}",
                self.stiffness
            )));
        }
        if !(self.damping >= 0.0) {
            return Err(ControlsError::InvalidConfig(format!(
                "{name}.damping must not be negative, got {}",
                self.damping
            )));
        }
        if !(self.mass > 0.0) {
            return Err(ControlsError::InvalidConfig(format!(
                "{name}.mass must be positive, got {}",
                self.mass
            )));
        }
        if !self.velocity.is_finite() {
            return Err(ControlsError::InvalidConfig(format!(
                "{name}.velocity must be finite"
            )));
        }
        Ok(())
    }
}

impl Default for SpringSettings {
    fn default() -> Self {
        Self::new(100.0, 20.0)
    }
}

/// Visual and motion configuration for `TimelineControls`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Side of the square toggle buttons; the seek bar is as tall and is
    /// inset by one button on the left and two on the right
    pub button_size: f32,
    /// Stroke width for glyphs, track, ticks and cursor
    pub stroke_width: f32,
    /// Foreground color as 0xRRGGBB
    pub color: u32,
    /// Opacity of the seek-bar track and marker ticks
    pub track_opacity: f32,
    /// Spring driving the toggle cross-fade
    pub toggle_spring: SpringSettings,
    /// Spring driving the seek-bar time and duration
    pub seek_spring: SpringSettings,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            button_size: 32.0,
            stroke_width: 2.0,
            color: 0xffffff,
            track_opacity: 0.5,
            toggle_spring: SpringSettings::new(100.0, 20.0),
            seek_spring: SpringSettings::new(7000.0, 400.0),
        }
    }
}

impl ControlsConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ControlsConfig = toml::from_str(source)?;
        config.validate()?;
        tracing::debug!("ControlsConfig: loaded {:?}", config);
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|err| ControlsError::InvalidConfig(err.to_string()))
    }

    /// Reject values the controls cannot draw or animate with
    pub fn validate(&self) -> Result<()> {
        if !(self.button_size > 0.0) {
            return Err(ControlsError::InvalidConfig(format!(
                "button_size must be positive, got {}",
                self.button_size
            )));
        }
        if !(self.stroke_width > 0.0) {
            return Err(ControlsError::InvalidConfig(format!(
                "stroke_width must be positive, got {}",
                self.stroke_width
            )));
        }
        if self.color > 0xffffff {
            return Err(ControlsError::InvalidConfig(format!(
                "color must be 0xRRGGBB, got {:#x}",
                self.color
            )));
        }
        if !(0.0..=1.0).contains(&self.track_opacity) {
            return Err(ControlsError::InvalidConfig(format!(
                "track_opacity must be within [0, 1], got {}",
                self.track_opacity
            )));
        }
        self.toggle_spring.validate("toggle_spring")?;
        self.seek_spring.validate("seek_spring")?;
        Ok(())
    }

    /// Foreground color
    pub fn foreground(&self) -> Color {
        Color::from_hex(self.color)
    }

    /// Stroke shared by every control
    pub fn stroke(&self) -> Stroke {
        Stroke::rounded(self.stroke_width)
    }

    /// Resolved drawing style
    pub fn style(&self) -> ControlStyle {
        ControlStyle {
            color: self.foreground(),
            stroke: self.stroke(),
            track_opacity: self.track_opacity,
        }
    }
}

/// Paint settings shared by all controls
#[derive(Clone, Debug, PartialEq)]
pub struct ControlStyle {
    pub color: Color,
    pub stroke: Stroke,
    pub track_opacity: f32,
}

impl Default for ControlStyle {
    fn default() -> Self {
        ControlsConfig::default().style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ControlsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.foreground(), Color::WHITE);
        assert_eq!(config.seek_spring.stiffness, 7000.0);
        assert_eq!(config.toggle_spring.damping, 20.0);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = ControlsConfig::from_toml_str(
            r#"
            button_size = 40.0
            color = 0xffcc00

            [seek_spring]
            stiffness = 5000.0
            "#,
        )
        .expect("valid config");

        assert_eq!(config.button_size, 40.0);
        assert_eq!(config.color, 0xffcc00);
        assert_eq!(config.seek_spring.stiffness, 5000.0);
        assert_eq!(config.seek_spring.mass, 1.0);
        assert_eq!(config.stroke_width, 2.0);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = ControlsConfig::from_toml_str("").expect("valid config");
        assert_eq!(config, ControlsConfig::default());
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = ControlsConfig::from_toml_str("button_size = ").unwrap_err();
        assert!(matches!(err, ControlsError::Config(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = ControlsConfig::from_toml_str("button_size = 0.0").unwrap_err();
        assert!(matches!(err, ControlsError::InvalidConfig(_)));

        let err = ControlsConfig::from_toml_str("[toggle_spring]\ndamping = -1.0").unwrap_err();
        assert!(matches!(err, ControlsError::InvalidConfig(_)));

        let err = ControlsConfig::from_toml_str("track_opacity = 1.5").unwrap_err();
        assert!(matches!(err, ControlsError::InvalidConfig(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ControlsConfig {
            stroke_width: 3.0,
            ..Default::default()
        };
        let text = config.to_toml_string().expect("serializable");
        assert_eq!(ControlsConfig::from_toml_str(&text).expect("valid"), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ControlsConfig::load(Path::new("/nonexistent/cadence.toml")).unwrap_err();
        assert!(matches!(err, ControlsError::Io(_)));
    }
}
