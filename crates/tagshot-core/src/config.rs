//! Editor configuration.
//!
//! Every field has a default, so a partial object from the UI (or an empty
//! one) deserializes into a usable configuration. Field names are camelCase
//! on the wire to match the TypeScript side.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned by [`EditorConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Pinch scale bounds are inverted or non-positive.
    #[error("Invalid pinch scale range: min ({min}) must be positive and not exceed max ({max})")]
    InvalidScaleRange { min: f64, max: f64 },

    /// A numeric value is NaN or infinite.
    #[error("Invalid {field}: {value} is not a finite number")]
    NotFinite { field: &'static str, value: f64 },

    /// A value that must be non-negative is negative.
    #[error("Invalid {field}: {value} must not be negative")]
    Negative { field: &'static str, value: f64 },

    /// The publish separator must be a path segment such as `/image/`.
    #[error("Invalid publish separator {0:?}: must start and end with '/'")]
    InvalidSeparator(String),
}

/// Complete configuration for one editor session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub crop: CropConfig,
    pub labels: LabelDefaults,
    pub pinch: PinchConfig,
    pub viewport: ViewportConfig,
    pub publish: PublishConfig,
}

/// Crop box rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConfig {
    /// Distance the edge handles sit outside the crop box border.
    pub handle_offset: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            handle_offset: 20.0,
        }
    }
}

/// Geometry and font given to a newly added label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelDefaults {
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
    pub font_size: f64,
    pub font_family: String,
}

impl Default for LabelDefaults {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 25.0,
            top: 20.0,
            left: 20.0,
            font_size: 16.0,
            font_family: String::new(),
        }
    }
}

/// Bounds for the two-finger scale preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PinchConfig {
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 4.0,
        }
    }
}

/// Crop commit options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Maximum relative difference allowed between the width-based and
    /// height-based render ratios of an image.
    pub ratio_tolerance: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            ratio_tolerance: 0.01,
        }
    }
}

/// Publish path layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublishConfig {
    /// Segment between the label numbers and the remote image path.
    pub separator: String,
    /// Prefix of the host's display URLs, stripped to get the remote path.
    pub viewer_domain: String,
    /// Prefix of the view route, stripped before parsing.
    pub route_prefix: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            separator: "/image/".to_string(),
            viewer_domain: String::new(),
            route_prefix: "/".to_string(),
        }
    }
}

impl EditorConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [
            ("handle offset", self.crop.handle_offset),
            ("label width", self.labels.width),
            ("label height", self.labels.height),
            ("label top", self.labels.top),
            ("label left", self.labels.left),
            ("label font size", self.labels.font_size),
            ("minimum pinch scale", self.pinch.min_scale),
            ("maximum pinch scale", self.pinch.max_scale),
            ("ratio tolerance", self.viewport.ratio_tolerance),
        ];
        if let Some(&(field, value)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::NotFinite { field, value });
        }

        let PinchConfig {
            min_scale,
            max_scale,
        } = self.pinch;
        if min_scale <= 0.0 || min_scale > max_scale {
            return Err(ConfigError::InvalidScaleRange {
                min: min_scale,
                max: max_scale,
            });
        }

        if self.crop.handle_offset < 0.0 {
            return Err(ConfigError::Negative {
                field: "handle offset",
                value: self.crop.handle_offset,
            });
        }

        if self.viewport.ratio_tolerance < 0.0 {
            return Err(ConfigError::Negative {
                field: "ratio tolerance",
                value: self.viewport.ratio_tolerance,
            });
        }

        let separator = &self.publish.separator;
        if separator.len() < 2 || !separator.starts_with('/') || !separator.ends_with('/') {
            return Err(ConfigError::InvalidSeparator(separator.clone()));
        }

        Ok(())
    }
}
