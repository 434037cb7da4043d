//! Editor configuration.

use crate::camera::{MAX_SCALE, MIN_SCALE, ZOOM_STEP};
use crate::snap::GRID_SIZE;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Defaults applied to texts created with the text tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    /// Placeholder content of a freshly placed text.
    pub content: String,
    /// Font size in world units.
    pub font_size: f64,
    /// Fill color.
    pub fill: String,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            content: "Text".to_string(),
            font_size: 16.0,
            fill: "#000000".to_string(),
        }
    }
}

/// Tunable constants of the editor. Every field has a default, so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Seat placement grid, in world units.
    pub grid_size: f64,
    /// Minimum camera scale.
    pub min_scale: f64,
    /// Maximum camera scale.
    pub max_scale: f64,
    /// Zoom factor per wheel event.
    pub zoom_step: f64,
    /// World distance from the first vertex that closes a polygon.
    pub polygon_close_tolerance: f64,
    /// Radius of the in-progress polygon vertex handles, in screen pixels.
    pub polygon_handle_radius: f64,
    /// Seat marker radius, in world units.
    pub seat_radius: f64,
    /// Pointer travel (screen pixels) below which a press/release is a click.
    pub click_tolerance: f64,
    /// Extra slack for hit testing, in screen pixels.
    pub hit_tolerance: f64,
    /// Initial viewport size in screen pixels.
    pub viewport: Size,
    /// Defaults for new texts.
    pub text: TextDefaults,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
            polygon_close_tolerance: 20.0,
            polygon_handle_radius: 4.0,
            seat_radius: 10.0,
            click_tolerance: 3.0,
            hit_tolerance: 4.0,
            viewport: Size::new(1000.0, 800.0),
            text: TextDefaults::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the invariants the editor relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if !(self.min_scale <= self.max_scale) {
            return Err(ConfigError::Invalid(format!(
                "min_scale ({}) exceeds max_scale ({})",
                self.min_scale, self.max_scale
            )));
        }
        if !(self.zoom_step > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "zoom_step must be greater than 1, got {}",
                self.zoom_step
            )));
        }
        if !(self.grid_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }
        let tolerances = [
            ("polygon_close_tolerance", self.polygon_close_tolerance),
            ("polygon_handle_radius", self.polygon_handle_radius),
            ("seat_radius", self.seat_radius),
            ("click_tolerance", self.click_tolerance),
            ("hit_tolerance", self.hit_tolerance),
        ];
        for (name, value) in tolerances {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.grid_size - 25.0).abs() < f64::EPSILON);
        assert!((config.polygon_close_tolerance - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "grid_size": 50.0, "text": { "font_size": 24.0 } }"#).unwrap();
        assert!((config.grid_size - 50.0).abs() < f64::EPSILON);
        assert!((config.max_scale - MAX_SCALE).abs() < f64::EPSILON);
        assert!((config.text.font_size - 24.0).abs() < f64::EPSILON);
        assert_eq!(config.text.fill, "#000000");
    }

    #[test]
    fn test_rejects_inverted_scale_limits() {
        let result = EditorConfig::from_json(r#"{ "min_scale": 3.0, "max_scale": 2.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_non_growing_zoom_step() {
        let result = EditorConfig::from_json(r#"{ "zoom_step": 1.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let result = EditorConfig::from_json(r#"{ "click_tolerance": -1.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = EditorConfig::from_json("{ grid_size: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.json");
        let mut config = EditorConfig::default();
        config.seat_radius = 14.0;
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        let loaded = EditorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
