//! Configuration for measurement and overlay display
//!
//! Settings are plain values passed explicitly to the code that needs them.
//! Supports JSON and TOML files, chosen by file extension.
//!
//! Configuration is organized into two sections:
//! - Measurement settings (display unit, position calibration)
//! - Overlay settings (default fill, line and color of segmentation regions)

use overlaykit_contour::{Color, RenderAttributes};
use overlaykit_core::Unit;
use overlaykit_measure::{CoordinateCalibrator, PixelSpacing};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// How measurements are reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementSettings {
    /// Unit measurements are displayed in when the image is calibrated
    pub display_unit: Unit,
    /// When false, absolute positions stay in pixels while lengths are calibrated
    pub calibrate_positions: bool,
}

impl Default for MeasurementSettings {
    fn default() -> Self {
        Self {
            display_unit: Unit::Millimeter,
            calibrate_positions: true,
        }
    }
}

impl MeasurementSettings {
    /// Calibrator for an image with the given pixel spacing and view origin
    pub fn calibrator(
        &self,
        spacing: Option<PixelSpacing>,
        view_offset: Option<(i32, i32)>,
    ) -> SettingsResult<CoordinateCalibrator> {
        let calibrator =
            CoordinateCalibrator::from_pixel_spacing(spacing, Some(self.display_unit), view_offset)?;
        if self.calibrate_positions {
            Ok(calibrator)
        } else {
            Ok(calibrator.with_uncalibrated_positions())
        }
    }
}

/// Default look of segmentation regions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    pub fill_opacity: f32,
    pub line_thickness: f32,
    pub filled: bool,
    pub color: Color,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            fill_opacity: 0.5,
            line_thickness: 1.0,
            filled: true,
            color: Color::default(),
        }
    }
}

impl OverlaySettings {
    pub fn render_attributes(&self) -> RenderAttributes {
        RenderAttributes {
            visible: true,
            filled: self.filled,
            line_thickness: self.line_thickness,
            fill_opacity: self.fill_opacity,
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

/// Complete settings
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub measurement: MeasurementSettings,
    pub overlay: OverlaySettings,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/overlaykit/config.toml` for the current user
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        path.push("overlaykit");
        path.push("config.toml");
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = Format::of(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let opacity = self.overlay.fill_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(reject("overlay.fill_opacity", opacity));
        }

        let thickness = self.overlay.line_thickness;
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(reject("overlay.line_thickness", thickness));
        }

        Ok(())
    }
}

fn reject(key: &str, value: f32) -> ConfigError {
    tracing::warn!(key, value, "rejected setting");
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}
