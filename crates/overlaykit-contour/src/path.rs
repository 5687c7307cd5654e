//! Renderable region paths
//!
//! The output of contour building is plain data: closed rings with their
//! nesting depth, a winding rule and the display attributes. Drawing is left
//! to the consumer, which can take the rings directly or convert them into a
//! `lyon` path.

use lyon::algorithms::hit_test::hit_test_path;
use lyon::math::point;
use lyon::path::{FillRule, Path};
use overlaykit_core::Point;
use serde::{Deserialize, Serialize};

use crate::attributes::Color;

/// Fill rule deciding which rings cover a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindingRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl From<WindingRule> for FillRule {
    fn from(rule: WindingRule) -> Self {
        match rule {
            WindingRule::NonZero => FillRule::NonZero,
            WindingRule::EvenOdd => FillRule::EvenOdd,
        }
    }
}

/// Overlay layer a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerType {
    Segmentation,
    Measure,
    Annotation,
}

/// Areas at or below this fraction of the reference scale count as zero
pub(crate) const DEGENERATE_RATIO: f64 = 1e-12;

/// Cross product of `a` and `b` taken relative to `origin`
fn cross(a: Point, b: Point, origin: Point) -> f64 {
    (a.x - origin.x) * (b.y - origin.y) - (b.x - origin.x) * (a.y - origin.y)
}

/// One closed ring of a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPath {
    pub points: Vec<Point>,
    /// Nesting depth in the source tree; odd depths are holes
    pub depth: usize,
}

impl SubPath {
    pub fn is_hole(&self) -> bool {
        self.depth % 2 == 1
    }

    /// Length of the ring including the closing edge
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|(a, b)| a.distance_to(&b)).sum()
    }

    /// Shoelace area, positive for counter-clockwise rings in a y-up frame
    pub fn signed_area(&self) -> f64 {
        let Some(&origin) = self.points.first() else {
            return 0.0;
        };
        self.edges()
            .map(|(a, b)| cross(a, b, origin))
            .sum::<f64>()
            / 2.0
    }

    /// Centroid of the ring's interior, `None` for degenerate rings.
    ///
    /// A ring is degenerate when its area is negligible next to the square
    /// of its bounding-box diagonal, so tiny but well-formed rings still
    /// have a centroid.
    pub fn centroid(&self) -> Option<Point> {
        let origin = *self.points.first()?;
        let area = self.signed_area();
        if area.abs() <= DEGENERATE_RATIO * self.extent_squared() {
            return None;
        }
        let (cx, cy) = self.edges().fold((0.0, 0.0), |(cx, cy), (a, b)| {
            let c = cross(a, b, origin);
            (
                cx + (a.x - origin.x + b.x - origin.x) * c,
                cy + (a.y - origin.y + b.y - origin.y) * c,
            )
        });
        Some(Point::new(
            origin.x + cx / (6.0 * area),
            origin.y + cy / (6.0 * area),
        ))
    }

    /// Squared diagonal of the ring's bounding box
    fn extent_squared(&self) -> f64 {
        let mut points = self.points.iter();
        let Some(first) = points.next() else {
            return 0.0;
        };
        let (min, max) = points.fold((*first, *first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        let (w, h) = (max.x - min.x, max.y - min.y);
        w * w + h * h
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// Axis-aligned bounds in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// A segmentation region ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderablePath {
    /// Segment number the region was built for
    pub id: u32,
    pub subpaths: Vec<SubPath>,
    pub winding: WindingRule,
    pub filled: bool,
    pub line_thickness: f32,
    pub fill_opacity: f32,
    pub color: Color,
    pub layer: LayerType,
}

impl RenderablePath {
    pub fn subpath_count(&self) -> usize {
        self.subpaths.len()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.subpaths.iter().flat_map(|s| s.points.iter());
        let first = *points.next()?;
        let bounds = points.fold(
            Bounds {
                min: first,
                max: first,
            },
            |b, p| Bounds {
                min: Point::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                max: Point::new(b.max.x.max(p.x), b.max.y.max(p.y)),
            },
        );
        Some(bounds)
    }

    /// Convert the rings into a `lyon` path, one closed sub-path per ring
    pub fn to_lyon_path(&self) -> Path {
        let mut builder = Path::builder();
        for subpath in &self.subpaths {
            let mut first = true;
            for p in &subpath.points {
                let p = point(p.x as f32, p.y as f32);
                if first {
                    builder.begin(p);
                    first = false;
                } else {
                    builder.line_to(p);
                }
            }
            if !first {
                builder.close();
            }
        }
        builder.build()
    }

    /// Whether `p` lies inside the region under the path's winding rule
    pub fn contains_point(&self, p: &Point, tolerance: f64) -> bool {
        let path = self.to_lyon_path();
        hit_test_path(
            &point(p.x as f32, p.y as f32),
            path.iter(),
            self.winding.into(),
            tolerance as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)], depth: usize) -> SubPath {
        SubPath {
            points: points.iter().map(|&p| p.into()).collect(),
            depth,
        }
    }

    #[test]
    fn test_ring_measures() {
        let square = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)], 0);
        assert_eq!(square.signed_area(), 16.0);
        assert_eq!(square.perimeter(), 16.0);
        assert_eq!(square.centroid(), Some(Point::new(2.0, 2.0)));

        let reversed = ring(&[(0.0, 4.0), (4.0, 4.0), (4.0, 0.0), (0.0, 0.0)], 1);
        assert_eq!(reversed.signed_area(), -16.0);
        assert_eq!(reversed.centroid(), Some(Point::new(2.0, 2.0)));
        assert!(reversed.is_hole());
    }

    #[test]
    fn test_sub_pixel_ring_has_centroid() {
        let side = 1e-9;
        let tiny = ring(
            &[
                (100.0, 100.0),
                (100.0 + side, 100.0),
                (100.0 + side, 100.0 + side),
                (100.0, 100.0 + side),
            ],
            0,
        );
        assert!(tiny.signed_area() > 0.0);
        let c = tiny.centroid().expect("tiny ring keeps its centroid");
        assert!((c.x - (100.0 + 5e-10)).abs() < 1e-12);
        assert!((c.y - (100.0 + 5e-10)).abs() < 1e-12);
    }

    #[test]
    fn test_collinear_ring_is_degenerate() {
        let diagonal = ring(&[(1e4, 1e4), (1e4 + 3.0, 1e4 + 3.0), (1e4 + 7.0, 1e4 + 7.0)], 0);
        assert_eq!(diagonal.centroid(), None);
    }

    #[test]
    fn test_degenerate_ring() {
        let line = ring(&[(0.0, 0.0), (5.0, 0.0)], 0);
        assert_eq!(line.signed_area(), 0.0);
        assert_eq!(line.perimeter(), 10.0);
        assert_eq!(line.centroid(), None);
    }

    #[test]
    fn test_lyon_export_has_one_subpath_per_ring() {
        let path = RenderablePath {
            id: 1,
            subpaths: vec![
                ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], 0),
                ring(&[(20.0, 0.0)], 0),
            ],
            winding: WindingRule::NonZero,
            filled: true,
            line_thickness: 1.0,
            fill_opacity: 1.0,
            color: Color::default(),
            layer: LayerType::Segmentation,
        };
        let begins = path
            .to_lyon_path()
            .iter()
            .filter(|e| matches!(e, lyon::path::Event::Begin { .. }))
            .count();
        assert_eq!(begins, 2);
        assert_eq!(path.subpath_count(), 2);
    }
}
