//! # OverlayKit Core
//!
//! Core types, traits, and utilities for OverlayKit.
//! Provides the error taxonomy, display units, plane geometry primitives,
//! the tag-keyed metadata store abstraction, and identifier generation
//! shared by the measurement, reference, and contour crates.

pub mod error;
pub mod geometry;
pub mod tags;
pub mod uid;
pub mod units;

pub use error::{CalibrationError, ContourError, Error, ReferenceError, Result};

pub use geometry::Point;

pub use tags::{MemoryTagStore, TagKey, TagStore, TagValue};

pub use uid::{SequenceUidGenerator, UidGenerator, UuidGenerator};

pub use units::Unit;
