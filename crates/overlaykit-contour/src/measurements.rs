//! Calibrated measurements of a region path.

use overlaykit_measure::{CoordinateCalibrator, MeasureItem};

use crate::path::{RenderablePath, DEGENERATE_RATIO};

pub const TOP_LEFT_X: &str = "Top Left X";
pub const TOP_LEFT_Y: &str = "Top Left Y";
pub const WIDTH: &str = "Width";
pub const HEIGHT: &str = "Height";
pub const CENTER_X: &str = "Center X";
pub const CENTER_Y: &str = "Center Y";
pub const AREA: &str = "Area";
pub const PERIMETER: &str = "Perimeter";

/// Net pixel area: outer rings add, holes subtract
pub fn region_area(path: &RenderablePath) -> f64 {
    path.subpaths
        .iter()
        .map(|s| {
            let area = s.signed_area().abs();
            if s.is_hole() {
                -area
            } else {
                area
            }
        })
        .sum()
}

/// Total pixel length of every ring
pub fn region_perimeter(path: &RenderablePath) -> f64 {
    path.subpaths.iter().map(|s| s.perimeter()).sum()
}

/// Area-weighted pixel centroid of the region.
///
/// `None` when the net area vanishes next to the summed ring areas, as when
/// a hole cancels its outer ring.
pub fn region_centroid(path: &RenderablePath) -> Option<(f64, f64)> {
    let mut total = 0.0;
    let mut gross = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for subpath in &path.subpaths {
        let Some(c) = subpath.centroid() else {
            continue;
        };
        let mut weight = subpath.signed_area().abs();
        if subpath.is_hole() {
            weight = -weight;
        }
        total += weight;
        gross += weight.abs();
        sx += weight * c.x;
        sy += weight * c.y;
    }
    if gross == 0.0 || total.abs() <= DEGENERATE_RATIO * gross {
        return None;
    }
    Some((sx / total, sy / total))
}

/// Measurements of `path` in the calibrator's display unit.
///
/// Positions go through the calibrator's position transform, lengths are
/// scaled by the calibration ratio and the area by its square.
pub fn measure_region(
    path: &RenderablePath,
    calibrator: &CoordinateCalibrator,
) -> Vec<MeasureItem> {
    let unit = calibrator.unit().to_string();
    let bounds = path.bounds();
    let centroid = region_centroid(path);

    vec![
        MeasureItem::new(
            TOP_LEFT_X,
            bounds.map(|b| calibrator.to_calibrated_x(b.min.x)),
            unit.clone(),
        ),
        MeasureItem::new(
            TOP_LEFT_Y,
            bounds.map(|b| calibrator.to_calibrated_y(b.min.y)),
            unit.clone(),
        ),
        MeasureItem::new(
            WIDTH,
            bounds.map(|b| calibrator.calibrated_length(b.width())),
            unit.clone(),
        ),
        MeasureItem::new(
            HEIGHT,
            bounds.map(|b| calibrator.calibrated_length(b.height())),
            unit.clone(),
        ),
        MeasureItem::new(
            CENTER_X,
            centroid.map(|(x, _)| calibrator.to_calibrated_x(x)),
            unit.clone(),
        ),
        MeasureItem::new(
            CENTER_Y,
            centroid.map(|(_, y)| calibrator.to_calibrated_y(y)),
            unit.clone(),
        ),
        MeasureItem::new(
            AREA,
            Some(calibrator.calibrated_area(region_area(path))),
            calibrator.area_unit(),
        ),
        MeasureItem::new(
            PERIMETER,
            Some(calibrator.calibrated_length(region_perimeter(path))),
            unit,
        ),
    ]
}
