//! OverlayKit Settings Crate
//!
//! Handles measurement and overlay display configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{Config, MeasurementSettings, OverlaySettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
