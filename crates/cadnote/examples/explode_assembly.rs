//! Two touching boxes pushed apart by their explode offsets.

use cadnote::recorded::RecordedSolid;
use cadnote::{explode, Assembly, ExplodeOffset, NodeMetadata, Part, Point3, Pose};

fn main() {
    env_logger::init();

    let mut assy = Assembly::new("main");
    let root = assy.root();

    // Unexploded, the boxes touch at the origin. The metadata tells the
    // explode pass how far to move each one.
    assy.add_part(
        root,
        "box1",
        Part::new(Box::new(RecordedSolid::external("box1"))),
        Pose::translation(0.0, 0.0, 5.0),
        NodeMetadata::with_explode(ExplodeOffset::new(Pose::translation(0.0, 0.0, 10.0))),
    )
    .unwrap();
    assy.add_part(
        root,
        "box2",
        Part::new(Box::new(RecordedSolid::external("box2"))),
        Pose::translation(0.0, 0.0, -5.0),
        // The legacy metadata spelling still works.
        NodeMetadata::with_explode(ExplodeOffset::legacy(Pose::translation(0.0, 0.0, -10.0))),
    )
    .unwrap();

    explode(&mut assy);

    for &child in assy.children(root) {
        let origin = assy.world_pose(child).apply_point(&Point3::origin());
        println!("{}: z = {}", assy[child].name, origin.z);
    }
}
