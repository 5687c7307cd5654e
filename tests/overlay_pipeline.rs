use std::sync::Arc;

use overlaykit::reference::encoding::{from_json, to_json};
use overlaykit::{
    measure_region, Config, ContourPathBuilder, ImageElement, ImageReferenceIndex, PixelSpacing,
    Point, PresentationReferences, Segment, SegmentTree, SequenceUidGenerator, TagKey, Unit,
};
use tempfile::TempDir;

fn ring(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&p| p.into()).collect()
}

#[test]
fn test_settings_to_measured_region() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[measurement]\ndisplay_unit = \"centimeter\"\n\n[overlay]\nfill_opacity = 0.5\n",
    )
    .unwrap();
    let config = Config::load_from_file(&path).unwrap();

    let calibrator = config
        .measurement
        .calibrator(Some(PixelSpacing::new(0.5, Unit::Millimeter)), None)
        .unwrap();
    assert_eq!(calibrator.unit(), "cm");

    let tree = SegmentTree::from_nested(vec![Segment::new(ring(&[
        (0.0, 0.0),
        (100.0, 0.0),
        (100.0, 100.0),
        (0.0, 100.0),
    ]))
    .with_child(Segment::new(ring(&[
        (25.0, 25.0),
        (25.0, 75.0),
        (75.0, 75.0),
        (75.0, 25.0),
    ])))])
    .unwrap();

    let region = ContourPathBuilder::new()
        .build(3, &tree, &config.overlay.render_attributes())
        .expect("visible region");
    assert_eq!(region.fill_opacity, 0.5);

    let items = measure_region(&region, &calibrator);
    let area = items.iter().find(|i| i.label == "Area").unwrap();
    // 7500 px² at 0.05 cm per pixel
    let value = area.value.unwrap();
    assert!((value - 18.75).abs() < 1e-9, "area was {value}");
    assert_eq!(area.unit, "cm2");
}

#[test]
fn test_references_for_annotated_frames() {
    let index = ImageReferenceIndex::new(Arc::new(SequenceUidGenerator::starting_at(1)));
    let frames: Vec<ImageElement> = [0, 2]
        .into_iter()
        .map(|i| {
            ImageElement::frame(4, i)
                .with_tag(TagKey::SERIES_INSTANCE_UID, "1.2.3")
                .with_tag(TagKey::SOP_INSTANCE_UID, "1.2.3.4")
        })
        .collect();

    let mut refs = PresentationReferences::new(&SequenceUidGenerator::starting_at(500));
    for frame in &frames {
        refs.add(index.build_reference(frame));
    }

    let json = to_json(&refs).unwrap();
    assert!(json.contains("\"frames\": \"0 2\""));

    let decoded = from_json(&json).unwrap();
    assert_eq!(decoded, refs);
    assert!(decoded.find_image("1.2.3.4").unwrap().covers_frame(2));
    assert!(!decoded.find_image("1.2.3.4").unwrap().covers_frame(1));
}
