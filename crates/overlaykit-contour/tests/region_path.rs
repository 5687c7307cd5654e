use overlaykit_contour::measurements::{region_area, region_centroid, AREA, PERIMETER, WIDTH};
use overlaykit_contour::{
    measure_region, Color, ContourPathBuilder, LayerType, RenderAttributes, Segment, SegmentTree,
    WindingRule,
};
use overlaykit_core::Point;
use overlaykit_measure::CoordinateCalibrator;

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&p| p.into()).collect()
}

/// 10x10 square with a counter-wound 6x6 hole
fn square_with_hole() -> SegmentTree {
    let mut tree = SegmentTree::new();
    let outer = tree
        .add_root(pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]))
        .unwrap();
    tree.add_child(outer, pts(&[(2.0, 2.0), (2.0, 8.0), (8.0, 8.0), (8.0, 2.0)]))
        .unwrap();
    tree
}

fn attributes() -> RenderAttributes {
    RenderAttributes::default()
        .with_filled(true)
        .with_line_thickness(2.0)
        .with_fill_opacity(0.4)
        .with_color(Color::rgb(200, 30, 30))
}

#[test]
fn test_square_with_hole_builds_region() {
    let tree = SegmentTree::from_nested(vec![Segment::new(pts(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
    ]))
    .with_child(Segment::new(pts(&[
        (2.0, 2.0),
        (8.0, 2.0),
        (8.0, 8.0),
        (2.0, 8.0),
    ])))])
    .unwrap();
    let path = ContourPathBuilder::new()
        .build(7, &tree, &attributes())
        .expect("region expected");

    assert_eq!(path.winding, WindingRule::NonZero);
    assert_eq!(path.layer, LayerType::Segmentation);
    assert!(path.filled);
    assert_eq!(path.line_thickness, 2.0);
    assert_eq!(path.fill_opacity, 0.4);
    assert_eq!(path.color, Color::rgb(200, 30, 30));

    assert_eq!(path.subpath_count(), 2);
    assert_eq!(path.subpaths[0].depth, 0);
    assert!(path.subpaths[1].is_hole());
    assert_eq!(path.subpaths[1].points[0], Point::new(2.0, 2.0));
}

#[test]
fn test_hole_is_not_filled() {
    let path = ContourPathBuilder::new()
        .build(7, &square_with_hole(), &attributes())
        .unwrap();

    assert!(path.contains_point(&Point::new(1.0, 5.0), 0.01));
    assert!(!path.contains_point(&Point::new(5.0, 5.0), 0.01));
    assert!(!path.contains_point(&Point::new(12.0, 5.0), 0.01));
}

#[test]
fn test_build_does_not_mutate_tree() {
    let tree = square_with_hole();
    let before = tree.clone();
    let builder = ContourPathBuilder::new();
    let first = builder.build(1, &tree, &attributes());
    let second = builder.build(1, &tree, &attributes());
    assert_eq!(tree, before);
    assert_eq!(first, second);
}

#[test]
fn test_sibling_order_is_kept() {
    let tree = SegmentTree::from_nested(vec![
        Segment::new(pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])),
        Segment::new(pts(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0)])),
    ])
    .unwrap();
    let path = ContourPathBuilder::new()
        .build(1, &tree, &RenderAttributes::default())
        .unwrap();
    let firsts: Vec<f64> = path.subpaths.iter().map(|s| s.points[0].x).collect();
    assert_eq!(firsts, vec![0.0, 5.0]);
}

#[test]
fn test_region_measurements() {
    let path = ContourPathBuilder::new()
        .build(1, &square_with_hole(), &attributes())
        .unwrap();
    assert_eq!(region_area(&path), 64.0);
    assert_eq!(region_centroid(&path), Some((5.0, 5.0)));

    let calibrator = CoordinateCalibrator::builder(0.5).unit("mm").build().unwrap();
    let items = measure_region(&path, &calibrator);
    let find = |label: &str| items.iter().find(|i| i.label == label).unwrap().clone();

    let area = find(AREA);
    assert_eq!(area.value, Some(16.0));
    assert_eq!(area.unit, "mm2");
    assert_eq!(find(WIDTH).value, Some(5.0));
    assert_eq!(find(PERIMETER).value, Some((40.0 + 24.0) * 0.5));
    assert_eq!(items.len(), 8);
}

#[test]
fn test_pixel_measurements_use_pixel_units() {
    let path = ContourPathBuilder::new()
        .build(1, &square_with_hole(), &attributes())
        .unwrap();
    let items = measure_region(&path, &CoordinateCalibrator::pixel());
    let area = items.iter().find(|i| i.label == AREA).unwrap();
    assert_eq!(area.value, Some(64.0));
    assert_eq!(area.unit, "pix");
}

#[test]
fn test_serialized_tree_rebuilds_same_region() {
    let tree = square_with_hole();
    let json = serde_json::to_string(&tree).unwrap();
    let back: SegmentTree = serde_json::from_str(&json).unwrap();

    let builder = ContourPathBuilder::new();
    assert_eq!(
        builder.build(1, &back, &attributes()),
        builder.build(1, &tree, &attributes())
    );
    assert_eq!(back.depth(back.children(back.roots()[0]).unwrap()[0]).unwrap(), 1);
}

#[test]
fn test_arena_layout_documents_are_rejected() {
    let dangling =
        r#"{"nodes":[{"points":[{"x":0,"y":0}],"children":[5],"depth":0}],"roots":[0]}"#;
    let cyclic =
        r#"{"nodes":[{"points":[{"x":0,"y":0}],"children":[0],"depth":0}],"roots":[0]}"#;
    assert!(serde_json::from_str::<SegmentTree>(dangling).is_err());
    assert!(serde_json::from_str::<SegmentTree>(cyclic).is_err());
}

#[test]
fn test_nested_document_builds_region() {
    let json = r#"[{"points":[{"x":0,"y":0},{"x":4,"y":0},{"x":4,"y":4}],
                   "children":[{"points":[{"x":1,"y":1},{"x":2,"y":1},{"x":2,"y":2}]}]}]"#;
    let tree: SegmentTree = serde_json::from_str(json).unwrap();
    let path = ContourPathBuilder::new()
        .build(1, &tree, &RenderAttributes::default())
        .unwrap();
    assert_eq!(path.subpath_count(), 2);
    assert!(path.subpaths[1].is_hole());
}

#[test]
fn test_sub_pixel_region_has_centroid() {
    let side = 1e-6;
    let tree = SegmentTree::from_nested(vec![Segment::new(pts(&[
        (50.0, 50.0),
        (50.0 + side, 50.0),
        (50.0 + side, 50.0 + side),
        (50.0, 50.0 + side),
    ]))])
    .unwrap();
    let path = ContourPathBuilder::new()
        .build(1, &tree, &attributes())
        .unwrap();

    let (x, y) = region_centroid(&path).expect("sub-pixel region keeps its centroid");
    assert!((x - (50.0 + side / 2.0)).abs() < 1e-9);
    assert!((y - (50.0 + side / 2.0)).abs() < 1e-9);
}

#[test]
fn test_hole_cancelling_outer_has_no_centroid() {
    let ring = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
    let tree =
        SegmentTree::from_nested(vec![Segment::new(ring.clone()).with_child(Segment::new(ring))])
            .unwrap();
    let path = ContourPathBuilder::new()
        .build(1, &tree, &attributes())
        .unwrap();
    assert_eq!(region_area(&path), 0.0);
    assert_eq!(region_centroid(&path), None);
}
