//! End-to-end annotation flow over the recorded collaborator: tag,
//! place markers, explode, and check the pieces stay consistent.

use cadnote::recorded::{AnalyticEdge, PlanarFace, RecordedKernel, RecordedSolid};
use cadnote::{
    add_assembly_arrows, add_assembly_lines, add_circular_dimensions, explode, Assembly,
    ExplodeOffset, NodeMetadata, Part, Point3, Pose, SkipReason, Vec3,
};

fn tagged_box(label: &str, face_z: f64, normal: Vec3) -> Part {
    Part::new(Box::new(RecordedSolid::external(label).tag_face(
        "arrow",
        PlanarFace::new(Point3::new(0.0, 0.0, face_z), normal),
    )))
}

#[test]
fn arrows_then_explode_keeps_bundles_rigid() {
    let kernel = RecordedKernel::new();
    let mut assy = Assembly::new("main");
    let root = assy.root();

    let metadata =
        NodeMetadata::with_explode(ExplodeOffset::new(Pose::translation(0.0, 0.0, 10.0)));
    assy.add_part(
        root,
        "lid",
        tagged_box("lid", 5.0, Vec3::z()),
        Pose::translation(0.0, 0.0, 5.0),
        metadata,
    )
    .unwrap();
    assy.add_part(
        root,
        "base",
        tagged_box("base", -5.0, -Vec3::z()),
        Pose::identity(),
        NodeMetadata::default(),
    )
    .unwrap();

    let report = add_assembly_arrows(&mut assy, &kernel, 0.5).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.placed, vec!["lid".to_string(), "base".to_string()]);

    let lid_bundle = assy.child_by_name(root, "lid").unwrap();
    let lid_part = assy.child_by_name(lid_bundle, "lid").unwrap();
    let lid_arrow = assy.child_by_name(lid_bundle, "arrow_0").unwrap();

    let tip_before = assy.world_pose(lid_arrow).apply_point(&Point3::origin());
    let part_before = assy.world_pose(lid_part).apply_point(&Point3::origin());
    assert!((tip_before - Point3::new(0.0, 0.0, 10.0)).norm() < 1e-9);

    explode(&mut assy);

    // Marker and part moved together by exactly the explode offset.
    let tip_after = assy.world_pose(lid_arrow).apply_point(&Point3::origin());
    let part_after = assy.world_pose(lid_part).apply_point(&Point3::origin());
    assert!((tip_after - Point3::new(0.0, 0.0, 20.0)).norm() < 1e-9);
    assert!(((tip_after - tip_before) - (part_after - part_before)).norm() < 1e-12);

    // The un-offset sibling did not move.
    let base_bundle = assy.child_by_name(root, "base").unwrap();
    let base_origin = assy.world_pose(base_bundle).apply_point(&Point3::origin());
    assert!(base_origin.coords.norm() < 1e-12);
}

#[test]
fn mixed_assembly_reports_skips_and_serializes() {
    let kernel = RecordedKernel::new();
    let mut assy = Assembly::new("main");
    let root = assy.root();

    assy.add_part(
        root,
        "good",
        tagged_box("good", 0.0, Vec3::z()),
        Pose::identity(),
        NodeMetadata::default(),
    )
    .unwrap();
    assy.add_part(
        root,
        "bare",
        Part::new(Box::new(RecordedSolid::external("bare"))),
        Pose::identity(),
        NodeMetadata::default(),
    )
    .unwrap();

    let report = add_assembly_arrows(&mut assy, &kernel, 1.0).unwrap();
    assert_eq!(report.placed_count(), 1);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(
        report.skipped[0].reason,
        SkipReason::TagNotFound {
            tag: "arrow".to_string()
        }
    );

    let json = serde_json::to_string_pretty(&report).unwrap();
    assert!(json.contains("\"good\""));
    assert!(json.contains("TagNotFound"));
}

#[test]
fn assembly_lines_run_after_explode() {
    let kernel = RecordedKernel::new();
    let mut assy = Assembly::new("main");
    let root = assy.root();

    let screw = RecordedSolid::external("screw").tag_face(
        "assembly_line",
        PlanarFace::new(Point3::origin(), -Vec3::z()),
    );
    assy.add_part(
        root,
        "screw",
        Part::new(Box::new(screw)),
        Pose::identity(),
        NodeMetadata::with_explode(ExplodeOffset::legacy(Pose::translation(0.0, 0.0, 20.0))),
    )
    .unwrap();
    assy.add_part(
        root,
        "plate",
        Part::new(Box::new(RecordedSolid::external("plate"))),
        Pose::identity(),
        NodeMetadata::default(),
    )
    .unwrap();

    explode(&mut assy);
    let report = add_assembly_lines(&mut assy, &kernel, 1.0).unwrap();
    // The plate has no tagged face and is skipped, not failed.
    assert_eq!(report.placed, vec!["screw".to_string()]);
    assert_eq!(report.skipped_count(), 1);

    let bundle = assy.child_by_name(root, "screw").unwrap();
    let line = assy.child_by_name(bundle, "assembly_line_0").unwrap();
    // The exploded pose carries the line with it.
    let tip = assy.world_pose(line).apply_point(&Point3::origin());
    assert!((tip - Point3::new(0.0, 0.0, 20.0)).norm() < 1e-9);
}

#[test]
fn dimensions_compose_with_marker_passes() {
    let kernel = RecordedKernel::new();
    let ring = RecordedSolid::external("ring").tag_edge(
        "radius_outer",
        AnalyticEdge::circular(Point3::origin(), 10.0, Vec3::x(), Vec3::z()),
    );

    let assembly = add_circular_dimensions(Part::new(Box::new(ring)), &kernel, 0.1).unwrap();

    let root = assembly.root();
    assert_eq!(assembly.children(root).len(), 3);
    assert!(assembly.child_by_name(root, "part").is_some());
    assert!(assembly.child_by_name(root, "radius_outer_arrow").is_some());
    assert!(assembly.child_by_name(root, "radius_outer_label").is_some());
}
