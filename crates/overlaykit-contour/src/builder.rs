//! Contour tree to region path conversion.

use crate::attributes::RenderAttributes;
use crate::path::{LayerType, RenderablePath, SubPath, WindingRule};
use crate::segment::SegmentTree;

/// Turns a segment tree into a single filled region.
///
/// Every non-empty contour becomes one closed ring. Holes are emitted as
/// additional rings and subtract from their parent under the non-zero
/// winding rule as long as they wind opposite to it, which is how
/// segmentation contours are delivered.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContourPathBuilder;

impl ContourPathBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the region for segment `id`, or `None` when there is nothing to draw.
    pub fn build(
        &self,
        id: u32,
        tree: &SegmentTree,
        attributes: &RenderAttributes,
    ) -> Option<RenderablePath> {
        if tree.roots().is_empty() {
            tracing::debug!(segment = id, "no contours, skipping region");
            return None;
        }
        if !attributes.visible {
            tracing::debug!(segment = id, "region hidden, skipping");
            return None;
        }

        let subpaths: Vec<SubPath> = tree
            .pre_order()
            .filter(|node| !node.points.is_empty())
            .map(|node| SubPath {
                points: node.points.to_vec(),
                depth: node.depth,
            })
            .collect();

        if subpaths.is_empty() {
            tracing::debug!(segment = id, "all contours empty, skipping region");
            return None;
        }
        tracing::trace!(segment = id, subpaths = subpaths.len(), "built region path");

        Some(RenderablePath {
            id,
            subpaths,
            winding: WindingRule::NonZero,
            filled: attributes.filled,
            line_thickness: attributes.line_thickness,
            fill_opacity: attributes.fill_opacity,
            color: attributes.color,
            layer: LayerType::Segmentation,
        })
    }
}
