//! Radius callouts on a ring with tagged inner and outer edges.

use cadnote::recorded::{AnalyticEdge, RecordedKernel, RecordedSolid};
use cadnote::{add_circular_dimensions, Part, Point3, Vec3};

fn main() {
    env_logger::init();

    let kernel = RecordedKernel::new();

    // A ring extruded on the YZ workplane, outer edge tagged for a
    // radius dimension.
    let ring = RecordedSolid::external("ring").tag_edge(
        "radius_1",
        AnalyticEdge::circular(Point3::new(50.0, 0.0, 0.0), 10.0, Vec3::y(), Vec3::x()),
    );

    let assembly = add_circular_dimensions(Part::new(Box::new(ring)), &kernel, 0.1).unwrap();

    for &child in assembly.children(assembly.root()) {
        let node = &assembly[child];
        let at = node.pose.translation_vec();
        println!("{}: at ({:.2}, {:.2}, {:.2})", node.name, at.x, at.y, at.z);
    }
}
