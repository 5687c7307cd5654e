//! Calibrated coordinate transform
//!
//! Pixel coordinates come from image decoding and annotation tools; the
//! calibrated values are what the measurement panels display. The transform
//! is a shift by a fixed pixel offset followed by a scale, with an optional
//! vertical mirror for sources whose Y axis grows upward.

use overlaykit_core::units::area_label;
use overlaykit_core::{CalibrationError, Unit};
use serde::{Deserialize, Serialize};

/// Immutable calibration parameters for one displayed image
///
/// Deserialized contexts go through [`CalibrationBuilder::build`], so they
/// satisfy the same checks as constructed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCalibrationContext")]
pub struct CalibrationContext {
    ratio: f64,
    ratio_for_position: f64,
    offset_x: i32,
    offset_y: i32,
    axis_flipped: bool,
    image_height_minus_one: i32,
    unit: String,
}

impl CalibrationContext {
    /// Scale factor for distances (pixel units to calibrated units)
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Scale factor for absolute positions
    pub fn ratio_for_position(&self) -> f64 {
        self.ratio_for_position
    }

    pub fn offset_x(&self) -> i32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> i32 {
        self.offset_y
    }

    pub fn axis_flipped(&self) -> bool {
        self.axis_flipped
    }

    /// Mirror pivot for the flipped axis (`image_height - 1`)
    pub fn image_height_minus_one(&self) -> i32 {
        self.image_height_minus_one
    }

    /// Display unit label
    pub fn unit(&self) -> &str {
        &self.unit
    }
}

#[derive(Deserialize)]
struct RawCalibrationContext {
    ratio: f64,
    ratio_for_position: f64,
    offset_x: i32,
    offset_y: i32,
    axis_flipped: bool,
    image_height_minus_one: i32,
    unit: String,
}

impl TryFrom<RawCalibrationContext> for CalibrationContext {
    type Error = CalibrationError;

    fn try_from(raw: RawCalibrationContext) -> Result<Self, Self::Error> {
        CalibrationBuilder::new(raw.ratio)
            .position_ratio(raw.ratio_for_position)
            .offset(raw.offset_x, raw.offset_y)
            .image_height(i64::from(raw.image_height_minus_one) + 1)
            .axis_flipped(raw.axis_flipped)
            .unit(raw.unit)
            .build()
            .map(|calibrator| calibrator.context)
    }
}

/// Physical size of one pixel as stored with the image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSpacing {
    /// Size of one pixel in `unit`
    pub size: f64,
    /// Unit of `size`
    pub unit: Unit,
}

impl PixelSpacing {
    pub fn new(size: f64, unit: Unit) -> Self {
        Self { size, unit }
    }
}

/// Builder for [`CoordinateCalibrator`]
///
/// The position ratio defaults to the distance ratio. The image height
/// defaults to 1 (pivot 0) and the axis is not flipped unless
/// [`axis_flipped`](Self::axis_flipped) or [`flipped_axis`](Self::flipped_axis)
/// is called.
#[derive(Debug, Clone)]
pub struct CalibrationBuilder {
    ratio: f64,
    ratio_for_position: Option<f64>,
    offset_x: i32,
    offset_y: i32,
    image_height: i64,
    axis_flipped: bool,
    unit: String,
}

impl CalibrationBuilder {
    fn new(ratio: f64) -> Self {
        Self {
            ratio,
            ratio_for_position: None,
            offset_x: 0,
            offset_y: 0,
            image_height: 1,
            axis_flipped: false,
            unit: Unit::Pixel.abbreviation().to_string(),
        }
    }

    /// Scale applied to absolute positions instead of the distance ratio
    pub fn position_ratio(mut self, ratio: f64) -> Self {
        self.ratio_for_position = Some(ratio);
        self
    }

    /// Pixel-space origin shift
    pub fn offset(mut self, x: i32, y: i32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Image row count; `image_height - 1` is kept as the mirror pivot
    pub fn image_height(mut self, image_height: i64) -> Self {
        self.image_height = image_height;
        self
    }

    pub fn axis_flipped(mut self, flipped: bool) -> Self {
        self.axis_flipped = flipped;
        self
    }

    /// Mirror Y around `image_height - 1`
    pub fn flipped_axis(self, image_height: i64) -> Self {
        self.image_height(image_height).axis_flipped(true)
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn build(self) -> Result<CoordinateCalibrator, CalibrationError> {
        if !(self.ratio.is_finite() && self.ratio > 0.0) {
            return Err(CalibrationError::InvalidRatio { ratio: self.ratio });
        }
        let ratio_for_position = self.ratio_for_position.unwrap_or(self.ratio);
        if !(ratio_for_position.is_finite() && ratio_for_position > 0.0) {
            return Err(CalibrationError::InvalidPositionRatio {
                ratio: ratio_for_position,
            });
        }

        let pivot = self
            .image_height
            .checked_sub(1)
            .and_then(|pivot| i32::try_from(pivot).ok());
        let image_height_minus_one = match pivot {
            Some(pivot) if self.image_height >= 0 => pivot,
            _ => {
                return Err(CalibrationError::InvalidImageHeight {
                    height: self.image_height,
                })
            }
        };

        Ok(CoordinateCalibrator {
            context: CalibrationContext {
                ratio: self.ratio,
                ratio_for_position,
                offset_x: self.offset_x,
                offset_y: self.offset_y,
                axis_flipped: self.axis_flipped,
                image_height_minus_one,
                unit: self.unit,
            },
        })
    }
}

/// Transform between pixel space and calibrated space
///
/// All conversions are pure. Non-finite inputs propagate through the
/// arithmetic unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateCalibrator {
    context: CalibrationContext,
}

impl CoordinateCalibrator {
    pub fn builder(ratio: f64) -> CalibrationBuilder {
        CalibrationBuilder::new(ratio)
    }

    /// Calibrator with a single ratio for distances and positions
    pub fn new(
        ratio: f64,
        offset_x: i32,
        offset_y: i32,
        axis_flipped: bool,
        image_height: i64,
        unit: impl Into<String>,
    ) -> Result<Self, CalibrationError> {
        Self::builder(ratio)
            .offset(offset_x, offset_y)
            .image_height(image_height)
            .axis_flipped(axis_flipped)
            .unit(unit)
            .build()
    }

    /// Identity calibrator reporting pixels
    pub fn pixel() -> Self {
        Self {
            context: CalibrationContext {
                ratio: 1.0,
                ratio_for_position: 1.0,
                offset_x: 0,
                offset_y: 0,
                axis_flipped: false,
                image_height_minus_one: 0,
                unit: Unit::Pixel.abbreviation().to_string(),
            },
        }
    }

    /// Calibrator derived from an image's stored pixel spacing.
    ///
    /// Falls back to pixels with ratio 1.0 when no display unit is requested,
    /// the spacing is unknown, or the spacing itself is expressed in pixels.
    /// `view_offset` is the image origin in view space; it is negated into
    /// the pixel offset.
    pub fn from_pixel_spacing(
        spacing: Option<PixelSpacing>,
        display_unit: Option<Unit>,
        view_offset: Option<(i32, i32)>,
    ) -> Result<Self, CalibrationError> {
        let calibrated = match (spacing, display_unit) {
            (Some(spacing), Some(unit)) if !spacing.unit.is_pixel() && !unit.is_pixel() => {
                Some((spacing, unit))
            }
            _ => None,
        };

        let (ratio, unit) = match calibrated {
            Some((spacing, unit)) => {
                if !(spacing.size.is_finite() && spacing.size > 0.0) {
                    return Err(CalibrationError::InvalidPixelSpacing {
                        spacing: spacing.size,
                    });
                }
                let ratio =
                    spacing.size * unit.conversion_ratio(spacing.unit.conversion_factor());
                (ratio, unit)
            }
            None => (1.0, Unit::Pixel),
        };

        let (ox, oy) = view_offset.unwrap_or((0, 0));
        tracing::trace!(ratio, unit = %unit, "calibrator from pixel spacing");
        Self::builder(ratio)
            .offset(-ox, -oy)
            .unit(unit.abbreviation())
            .build()
    }

    /// Same calibration with absolute positions left in pixel space
    pub fn with_uncalibrated_positions(&self) -> Self {
        let mut context = self.context.clone();
        context.ratio_for_position = 1.0;
        Self { context }
    }

    pub fn context(&self) -> &CalibrationContext {
        &self.context
    }

    pub fn ratio(&self) -> f64 {
        self.context.ratio
    }

    pub fn unit(&self) -> &str {
        &self.context.unit
    }

    /// Label for squared values ("pix" stays "pix")
    pub fn area_unit(&self) -> String {
        area_label(&self.context.unit)
    }

    fn mirror_y(&self, y: f64) -> f64 {
        if self.context.axis_flipped {
            f64::from(self.context.image_height_minus_one) - y
        } else {
            y
        }
    }

    /// Calibrated X of a pixel column
    pub fn to_calibrated_x(&self, x_pixel: f64) -> f64 {
        self.context.ratio_for_position * (x_pixel + f64::from(self.context.offset_x))
    }

    /// Calibrated Y of a pixel row, mirrored first when the axis is flipped
    pub fn to_calibrated_y(&self, y_pixel: f64) -> f64 {
        self.context.ratio_for_position * (self.mirror_y(y_pixel) + f64::from(self.context.offset_y))
    }

    /// Offset-shifted X without scaling, for placing on-screen widgets
    pub fn to_pixel_x(&self, x: f64) -> f64 {
        x + f64::from(self.context.offset_x)
    }

    /// Offset-shifted, mirrored Y without scaling, for drawing handles
    pub fn to_pixel_y(&self, y: f64) -> f64 {
        self.mirror_y(y) + f64::from(self.context.offset_y)
    }

    /// Distance in calibrated units
    pub fn calibrated_length(&self, pixel_length: f64) -> f64 {
        self.context.ratio * pixel_length
    }

    /// Area in squared calibrated units
    pub fn calibrated_area(&self, pixel_area: f64) -> f64 {
        self.context.ratio * self.context.ratio * pixel_area
    }
}
