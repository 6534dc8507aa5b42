//! A screw exploded away from its plate, with an assembly line showing
//! the insertion path.

use cadnote::recorded::{PlanarFace, RecordedKernel, RecordedSolid};
use cadnote::{
    add_assembly_lines, explode, Assembly, Color, ExplodeOffset, NodeMetadata, Part, Point3,
    Pose, Vec3,
};

fn main() {
    env_logger::init();

    let kernel = RecordedKernel::new();
    let mut assy = Assembly::new("main");
    let root = assy.root();

    // The screw tags its bottom face; the line will run along that
    // face's normal once the assembly is exploded.
    let screw = RecordedSolid::external("screw").tag_face(
        "assembly_line",
        PlanarFace::new(Point3::origin(), -Vec3::z()),
    );
    assy.add_part(
        root,
        "screw",
        Part::new(Box::new(screw)).with_color(Color::new(1.0, 0.0, 0.0, 1.0)),
        Pose::identity(),
        NodeMetadata::with_explode(ExplodeOffset::new(Pose::translation(0.0, 0.0, 20.0))),
    )
    .unwrap();

    let plate = RecordedSolid::external("plate");
    assy.add_part(
        root,
        "plate",
        Part::new(Box::new(plate)).with_color(Color::new(0.0, 1.0, 0.0, 1.0)),
        Pose::identity(),
        NodeMetadata::default(),
    )
    .unwrap();

    // Explode first so the lines have a gap to span.
    explode(&mut assy);
    let report = add_assembly_lines(&mut assy, &kernel, 1.0).unwrap();

    println!("placed: {:?}", report.placed);
    for skipped in &report.skipped {
        println!("skipped {:?}: {:?}", skipped.name, skipped.reason);
    }
}
