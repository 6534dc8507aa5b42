//! Two stacked boxes with tagged mating faces, annotated with arrows.

use cadnote::recorded::{PlanarFace, RecordedKernel, RecordedSolid};
use cadnote::{add_assembly_arrows, Assembly, Color, NodeMetadata, Part, Point3, Pose, Vec3};

fn main() {
    env_logger::init();

    let kernel = RecordedKernel::new();
    let mut assy = Assembly::new("main");
    let root = assy.root();

    // The top box floats above the bottom one; each tags the face the
    // arrow should originate from.
    let box1 = RecordedSolid::external("box1").tag_face(
        "arrow",
        PlanarFace::new(Point3::new(0.0, 0.0, 5.0), Vec3::z()),
    );
    assy.add_part(
        root,
        "box1",
        Part::new(Box::new(box1)).with_color(Color::new(1.0, 0.0, 0.0, 1.0)),
        Pose::translation(0.0, 0.0, 20.0),
        NodeMetadata::default(),
    )
    .unwrap();

    let box2 = RecordedSolid::external("box2").tag_face(
        "arrow",
        PlanarFace::new(Point3::new(0.0, 0.0, -5.0), -Vec3::z()),
    );
    assy.add_part(
        root,
        "box2",
        Part::new(Box::new(box2)).with_color(Color::new(0.0, 1.0, 0.0, 1.0)),
        Pose::identity(),
        NodeMetadata::default(),
    )
    .unwrap();

    // The stock arrow is too large for 10 mm boxes, so scale it down.
    let report = add_assembly_arrows(&mut assy, &kernel, 0.5).unwrap();
    println!(
        "placed {} arrows, skipped {} nodes",
        report.placed_count(),
        report.skipped_count()
    );

    for &bundle in assy.children(root) {
        let names: Vec<_> = assy
            .children(bundle)
            .iter()
            .map(|&child| assy[child].name.clone())
            .collect();
        println!("bundle {:?}: {:?}", assy[bundle].name, names);
    }
}
