//! # OverlayKit Reference
//!
//! Links an annotation overlay to the exact series, instance, and frames it
//! annotates, so the overlay can be stored apart from the pixel data and
//! re-attached later.
//!
//! ## Components
//!
//! - [`ImageSource`]: what the index needs from a live image (metadata
//!   store, frame count, positional key)
//! - [`ImageReferenceIndex`]: builds a [`SeriesReference`] for one image,
//!   generating and persisting missing identifiers
//! - [`PresentationReferences`]: the reference list of a whole overlay model,
//!   merging per-image references by series
//! - [`encoding`]: JSON encoding with the frame list as an attribute string

pub mod encoding;
pub mod index;
pub mod model;
pub mod presentation;
pub mod source;

pub use encoding::{format_frames, parse_frames};
pub use index::ImageReferenceIndex;
pub use model::{ImageReference, SeriesReference};
pub use presentation::PresentationReferences;
pub use source::{ImageElement, ImageSource, MediaKey};
