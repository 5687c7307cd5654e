//! # OverlayKit Measure
//!
//! Converts between image pixel coordinates and calibrated real-world
//! coordinates, and scales pixel distances and areas into display units.
//!
//! A [`CoordinateCalibrator`] is created once per displayed image and never
//! changes afterwards. Positions and distances use independent ratios so a
//! view can report distances in millimeters while leaving absolute positions
//! in pixel space.
//!
//! ```rust,ignore
//! use overlaykit_measure::CoordinateCalibrator;
//!
//! let calibrator = CoordinateCalibrator::builder(0.5)
//!     .position_ratio(1.0)
//!     .offset(10, -5)
//!     .flipped_axis(512)
//!     .unit("mm")
//!     .build()?;
//! assert_eq!(calibrator.to_calibrated_y(100.0), 406.0);
//! ```

pub mod calibration;
pub mod measure_item;

pub use calibration::{CalibrationBuilder, CalibrationContext, CoordinateCalibrator, PixelSpacing};
pub use measure_item::MeasureItem;
