//! Error handling for OverlayKit
//!
//! Provides error types for each part of the overlay core:
//! - Calibration errors (invalid ratios, image geometry, units)
//! - Reference errors (identifiers, frame indices, encoding)
//! - Contour errors (segment tree structure, point values)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Absence of a result (an invisible contour, an empty region) is never an
//! error; those cases are reported through `Option`.

use thiserror::Error;

/// Calibration error type
///
/// Raised when a calibration context is constructed from values that
/// cannot describe a real image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Scale ratio is zero, negative, or not finite
    #[error("Invalid calibration ratio {ratio}: must be finite and > 0")]
    InvalidRatio {
        /// The rejected ratio.
        ratio: f64,
    },

    /// Position ratio is zero, negative, or not finite
    #[error("Invalid position ratio {ratio}: must be finite and > 0")]
    InvalidPositionRatio {
        /// The rejected ratio.
        ratio: f64,
    },

    /// Image height is negative
    #[error("Invalid image height {height}: must be >= 0")]
    InvalidImageHeight {
        /// The rejected height.
        height: i64,
    },

    /// Pixel spacing is zero, negative, or not finite
    #[error("Invalid pixel spacing {spacing}")]
    InvalidPixelSpacing {
        /// The rejected spacing.
        spacing: f64,
    },

    /// Unit label could not be resolved
    #[error("Unknown unit: {unit}")]
    UnknownUnit {
        /// The unknown unit label.
        unit: String,
    },
}

/// Image reference error type
///
/// Represents errors related to decoding or validating references between
/// an overlay and the images it annotates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReferenceError {
    /// Identifier is empty or blank
    #[error("Malformed {field} identifier: {value:?}")]
    MalformedIdentifier {
        /// Which identifier was malformed.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// Frame list contains a token that is not a frame index
    #[error("Invalid frame index {token:?}")]
    InvalidFrameIndex {
        /// The rejected token.
        token: String,
    },

    /// Reference record could not be encoded or decoded
    #[error("Reference encoding failed: {reason}")]
    Encoding {
        /// The reason the encoding failed.
        reason: String,
    },
}

/// Contour error type
///
/// Represents structural problems in a segment tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContourError {
    /// A node index does not exist in the tree
    #[error("Segment index {index} out of range (tree has {len} nodes)")]
    DanglingIndex {
        /// The requested index.
        index: usize,
        /// The number of nodes in the tree.
        len: usize,
    },

    /// A point coordinate is NaN or infinite
    #[error("Non-finite point ({x}, {y}) in segment {segment}")]
    NonFinitePoint {
        /// The segment holding the point.
        segment: usize,
        /// The point X value.
        x: f64,
        /// The point Y value.
        y: f64,
    },
}

/// Main error type for OverlayKit
///
/// A unified error type that can represent any error from the core crates.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Calibration error
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// Reference error
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Contour error
    #[error(transparent)]
    Contour(#[from] ContourError),

    /// A required argument violated the caller contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a contract-violation error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Check if this is a calibration error
    pub fn is_calibration_error(&self) -> bool {
        matches!(self, Error::Calibration(_))
    }

    /// Check if this is a reference error
    pub fn is_reference_error(&self) -> bool {
        matches!(self, Error::Reference(_))
    }

    /// Check if this is a contour error
    pub fn is_contour_error(&self) -> bool {
        matches!(self, Error::Contour(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
