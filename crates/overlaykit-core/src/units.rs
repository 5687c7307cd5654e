//! Display units for calibrated measurements
//!
//! Every length unit carries its size in meters so that pixel spacing stored
//! in one unit can be displayed in another. `Pixel` is the uncalibrated unit
//! and converts with a factor of 1.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalibrationError;

/// Length unit used to display measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Uncalibrated image pixels
    Pixel,
    Nanometer,
    Micrometer,
    Millimeter,
    Centimeter,
    Meter,
    Kilometer,
    Microinch,
    /// Thousandth of an inch
    Mil,
    Inch,
    Feet,
    Yard,
    Mile,
}

impl Default for Unit {
    fn default() -> Self {
        Self::Pixel
    }
}

impl Unit {
    /// All units, in display order
    pub const ALL: [Unit; 13] = [
        Unit::Pixel,
        Unit::Nanometer,
        Unit::Micrometer,
        Unit::Millimeter,
        Unit::Centimeter,
        Unit::Meter,
        Unit::Kilometer,
        Unit::Microinch,
        Unit::Mil,
        Unit::Inch,
        Unit::Feet,
        Unit::Yard,
        Unit::Mile,
    ];

    /// Size of one unit in meters (1.0 for pixels)
    pub fn conversion_factor(&self) -> f64 {
        match self {
            Self::Pixel => 1.0,
            Self::Nanometer => 1.0e-9,
            Self::Micrometer => 1.0e-6,
            Self::Millimeter => 1.0e-3,
            Self::Centimeter => 1.0e-2,
            Self::Meter => 1.0,
            Self::Kilometer => 1.0e3,
            Self::Microinch => 2.54e-8,
            Self::Mil => 2.54e-5,
            Self::Inch => 2.54e-2,
            Self::Feet => 3.048e-1,
            Self::Yard => 9.144e-1,
            Self::Mile => 1.609344e3,
        }
    }

    /// Convert a size expressed in meters-per-source-unit into this unit.
    ///
    /// `calibration_ratio` is the conversion factor of the unit the value is
    /// currently stored in.
    pub fn conversion_ratio(&self, calibration_ratio: f64) -> f64 {
        calibration_ratio / self.conversion_factor()
    }

    /// Short label shown next to values
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Pixel => "pix",
            Self::Nanometer => "nm",
            Self::Micrometer => "µm",
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Kilometer => "km",
            Self::Microinch => "µin",
            Self::Mil => "mil",
            Self::Inch => "in",
            Self::Feet => "ft",
            Self::Yard => "yd",
            Self::Mile => "mi",
        }
    }

    /// Full lowercase name
    pub fn full_name(&self) -> &'static str {
        match self {
            Self::Pixel => "pixel",
            Self::Nanometer => "nanometer",
            Self::Micrometer => "micrometer",
            Self::Millimeter => "millimeter",
            Self::Centimeter => "centimeter",
            Self::Meter => "meter",
            Self::Kilometer => "kilometer",
            Self::Microinch => "microinch",
            Self::Mil => "mil",
            Self::Inch => "inch",
            Self::Feet => "feet",
            Self::Yard => "yard",
            Self::Mile => "mile",
        }
    }

    pub fn is_pixel(&self) -> bool {
        matches!(self, Self::Pixel)
    }

    /// Label for squared values of this unit ("pix" stays "pix")
    pub fn area_abbreviation(&self) -> String {
        area_label(self.abbreviation())
    }
}

/// Squared-unit label for an arbitrary unit label
pub fn area_label(unit: &str) -> String {
    if unit == Unit::Pixel.abbreviation() {
        unit.to_string()
    } else {
        format!("{}2", unit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for Unit {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Unit::ALL
            .iter()
            .copied()
            .find(|u| {
                u.abbreviation() == needle
                    || u.full_name() == needle
                    || format!("{}s", u.full_name()) == needle
            })
            .or_else(|| match needle.as_str() {
                "px" | "pixels" => Some(Unit::Pixel),
                "um" => Some(Unit::Micrometer),
                "uin" => Some(Unit::Microinch),
                "foot" => Some(Unit::Feet),
                _ => None,
            })
            .ok_or_else(|| CalibrationError::UnknownUnit {
                unit: s.to_string(),
            })
    }
}
