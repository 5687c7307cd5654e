//! # OverlayKit
//!
//! Geometry and identity core for drawing overlays on medical images:
//! - Pixel to calibrated coordinate transforms and measurement units
//! - Stable series/instance/frame references for annotated images
//! - Segmentation contour trees turned into renderable region paths
//!
//! ## Architecture
//!
//! OverlayKit is organized as a workspace with multiple crates:
//!
//! 1. **overlaykit-core** - Errors, units, points, tag store, identifier generation
//! 2. **overlaykit-measure** - Calibration context and coordinate calibrator
//! 3. **overlaykit-reference** - Image references and their JSON encoding
//! 4. **overlaykit-contour** - Segment trees, region paths, region measurements
//! 5. **overlaykit-settings** - Measurement and overlay display settings
//! 6. **overlaykit** - This facade, re-exporting the crates above
//!
//! Nothing here draws or touches the network. Settings are the only part
//! that reads or writes files.

pub use overlaykit_contour as contour;
pub use overlaykit_measure as measure;
pub use overlaykit_reference as reference;
pub use overlaykit_settings as settings;

pub use overlaykit_core::{
    CalibrationError, ContourError, Error, MemoryTagStore, Point, ReferenceError, Result,
    SequenceUidGenerator, TagKey, TagStore, TagValue, UidGenerator, Unit, UuidGenerator,
};

pub use overlaykit_measure::{
    CalibrationBuilder, CalibrationContext, CoordinateCalibrator, MeasureItem, PixelSpacing,
};

pub use overlaykit_reference::{
    ImageElement, ImageReference, ImageReferenceIndex, ImageSource, MediaKey,
    PresentationReferences, SeriesReference,
};

pub use overlaykit_contour::{
    measure_region, Color, ContourPathBuilder, LayerType, RenderAttributes, RenderablePath,
    Segment, SegmentTree, SubPath, WindingRule,
};

pub use overlaykit_settings::{
    Config, ConfigError, MeasurementSettings, OverlaySettings, SettingsError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO otherwise
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Initialize logging as one JSON object per line, for log collectors
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .json();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(tracing::Level::INFO.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
        assert!(BUILD_DATE.ends_with("UTC"));
    }

    #[test]
    fn test_second_init_fails() {
        // Whichever call runs first wins; the other must report the conflict.
        let first = init_logging();
        let second = init_json_logging();
        assert!(first.is_err() || second.is_err());
    }
}
