//! # OverlayKit Contour
//!
//! Converts segmentation contour trees into renderable region paths.
//!
//! A region is a forest of closed contours where each child is a hole in its
//! parent. [`ContourPathBuilder`] flattens the forest into one path of closed
//! rings filled under the non-zero winding rule, so holes subtract from the
//! region they sit in. The result is plain data; [`RenderablePath::to_lyon_path`]
//! hands it to a `lyon` based renderer.

pub mod attributes;
pub mod builder;
pub mod measurements;
pub mod path;
pub mod segment;

pub use attributes::{Color, RenderAttributes};
pub use builder::ContourPathBuilder;
pub use measurements::measure_region;
pub use path::{Bounds, LayerType, RenderablePath, SubPath, WindingRule};
pub use segment::{Segment, SegmentId, SegmentTree};
