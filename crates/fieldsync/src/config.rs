//! Field configuration loaded from YAML.
//!
//! ```yaml
//! play_field:
//!   client_space:
//!     rect: { x: 0, y: 0, width: 150, height: 600 }
//!     spread: column
//!   component_space:
//!     rect: { x: 150, y: 0, width: 700, height: 600 }
//!     spread: row
//!     relayout_existing: false
//!   endpoint_space:
//!     rect: { x: 850, y: 0, width: 150, height: 600 }
//!     spread: column
//!   bounds: { x: 0, y: 0, width: 1000, height: 600 }
//! component_size: { width: 48, height: 48 }
//! connection:
//!   width: 4
//!   color: "#3495eb"
//!   opacity: 0.8
//! ```

use fieldsync_core::{Rect, Size};
use fieldsync_layout::{PlayField, Region};
use fieldsync_widgets::ConnectionDisplay;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

impl ConfigError {
    fn invalid(field: &str, message: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// How connections are drawn, with the colour written as hex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Line width
    #[serde(default = "default_width")]
    pub width: f32,
    /// Line colour
    #[serde(with = "hex_color", default = "default_color")]
    pub color: fieldsync_core::Color,
    /// Line opacity
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_width() -> f32 {
    ConnectionDisplay::default().width
}

fn default_color() -> fieldsync_core::Color {
    ConnectionDisplay::default().color
}

fn default_opacity() -> f32 {
    ConnectionDisplay::default().opacity
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionDisplay::default().into()
    }
}

impl From<ConnectionDisplay> for ConnectionConfig {
    fn from(display: ConnectionDisplay) -> Self {
        Self {
            width: display.width,
            color: display.color,
            opacity: display.opacity,
        }
    }
}

impl From<ConnectionConfig> for ConnectionDisplay {
    fn from(config: ConnectionConfig) -> Self {
        Self {
            width: config.width,
            color: config.color,
            opacity: config.opacity,
        }
    }
}

mod hex_color {
    use fieldsync_core::Color;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Everything the controller needs to lay out and draw the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Staging regions and movement bounds
    #[serde(default)]
    pub play_field: PlayField,
    /// Size of every component box
    #[serde(default = "default_component_size")]
    pub component_size: Size,
    /// Connection display
    #[serde(default)]
    pub connection: ConnectionConfig,
}

fn default_component_size() -> Size {
    Size::new(48.0, 48.0)
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            play_field: PlayField::default(),
            component_size: default_component_size(),
            connection: ConnectionConfig::default(),
        }
    }
}

impl FieldConfig {
    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a value is out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check sizes and ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let regions = [
            ("play_field.client_space", &self.play_field.client_space),
            ("play_field.component_space", &self.play_field.component_space),
            ("play_field.endpoint_space", &self.play_field.endpoint_space),
        ];
        for (field, region) in regions {
            check_region(field, region)?;
        }
        if let Some(bounds) = self.play_field.bounds {
            check_rect("play_field.bounds", bounds)?;
        }
        if !(positive(self.component_size.width) && positive(self.component_size.height)) {
            return Err(ConfigError::invalid("component_size", "must be positive"));
        }
        if !positive(self.connection.width) {
            return Err(ConfigError::invalid("connection.width", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.connection.opacity) {
            return Err(ConfigError::invalid(
                "connection.opacity",
                "must be between 0 and 1",
            ));
        }
        Ok(())
    }

    /// Display parameters for new connections.
    #[must_use]
    pub fn connection_display(&self) -> ConnectionDisplay {
        self.connection.into()
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn check_region(field: &str, region: &Region) -> Result<(), ConfigError> {
    check_rect(field, region.rect)
}

fn check_rect(field: &str, rect: Rect) -> Result<(), ConfigError> {
    if !(rect.x.is_finite() && rect.y.is_finite()) {
        return Err(ConfigError::invalid(field, "origin must be finite"));
    }
    if positive(rect.width) && positive(rect.height) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "width and height must be positive"))
    }
}
