//! Exploded-view offset propagation.
//!
//! Walks an assembly parent-before-children and composes each node's
//! declared [`ExplodeOffset`](crate::ExplodeOffset) into its pose, once
//! per call. The pass is **not** idempotent: running it twice doubles
//! every displacement, so callers run it exactly once per desired
//! explosion.
//!
//! Traversal is bounded to `max_depth` levels below the root (the
//! root's children are depth 1). Deeper nodes keep their poses even
//! when their metadata carries offsets; the bound is part of the
//! contract, not a traversal limit to tune away.

use std::collections::VecDeque;

use crate::{Assembly, NodeId};

/// Default traversal depth for [`explode`].
pub const DEFAULT_EXPLODE_DEPTH: usize = 3;

/// Explode an assembly to [`DEFAULT_EXPLODE_DEPTH`] levels.
pub fn explode(assembly: &mut Assembly) {
    explode_to_depth(assembly, DEFAULT_EXPLODE_DEPTH);
}

/// Explode an assembly, visiting nodes down to `max_depth` levels below
/// the root.
///
/// Offsets are independent per node: each visited node with an offset
/// has `pose = pose ∘ offset` applied in its local frame, parents
/// before children. Nodes without offsets are skipped. The root's pose
/// is the assembly frame and is never touched. Mutates in place.
pub fn explode_to_depth(assembly: &mut Assembly, max_depth: usize) {
    let mut queue: VecDeque<(NodeId, usize)> = assembly
        .children(assembly.root())
        .iter()
        .map(|&id| (id, 1))
        .collect();

    let mut visited = 0usize;
    let mut applied = 0usize;

    while let Some((id, depth)) = queue.pop_front() {
        if depth > max_depth {
            continue;
        }
        visited += 1;

        if let Some(node) = assembly.node_mut(id) {
            if let Some(offset) = node.metadata.explode.clone() {
                node.pose = node.pose.then(&offset.pose);
                applied += 1;
            }
        }

        for &child in assembly.children(id) {
            queue.push_back((child, depth + 1));
        }
    }

    log::debug!(
        "explode: visited {visited} nodes, applied {applied} offsets (max depth {max_depth})"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExplodeOffset, NodeMetadata, Part};
    use cadnote_kernel::recorded::RecordedSolid;
    use cadnote_math::{Point3, Pose};

    fn part(label: &str) -> Part {
        Part::new(Box::new(RecordedSolid::external(label)))
    }

    fn z_offset(dz: f64) -> NodeMetadata {
        NodeMetadata::with_explode(ExplodeOffset::new(Pose::translation(0.0, 0.0, dz)))
    }

    fn origin_of(assy: &Assembly, id: crate::NodeId) -> Point3 {
        assy.world_pose(id).apply_point(&Point3::origin())
    }

    #[test]
    fn test_offsets_applied_once_per_call() {
        let mut assy = Assembly::new("main");
        let root = assy.root();
        let boxed = assy
            .add_part(root, "box", part("box"), Pose::translation(0.0, 0.0, 5.0), z_offset(10.0))
            .unwrap();

        explode(&mut assy);
        assert!((origin_of(&assy, boxed).z - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_second_pass_doubles_displacement() {
        let mut assy = Assembly::new("main");
        let root = assy.root();
        let boxed = assy
            .add_part(root, "box", part("box"), Pose::identity(), z_offset(10.0))
            .unwrap();

        explode(&mut assy);
        explode(&mut assy);
        // Two passes double the displacement: +20, not +10.
        assert!((origin_of(&assy, boxed).z - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_legacy_key_honored() {
        let mut assy = Assembly::new("main");
        let root = assy.root();
        let metadata = NodeMetadata::with_explode(ExplodeOffset::legacy(Pose::translation(
            0.0, 30.0, 0.0,
        )));
        let boxed = assy
            .add_part(root, "box", part("box"), Pose::identity(), metadata)
            .unwrap();

        explode(&mut assy);
        assert!((origin_of(&assy, boxed).y - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_nodes_without_offsets_untouched() {
        let mut assy = Assembly::new("main");
        let root = assy.root();
        let fixed = assy
            .add_part(
                root,
                "fixed",
                part("fixed"),
                Pose::translation(1.0, 2.0, 3.0),
                NodeMetadata::default(),
            )
            .unwrap();

        explode(&mut assy);
        assert!((origin_of(&assy, fixed) - Point3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_depth_limit_leaves_grandchildren_alone() {
        let mut assy = Assembly::new("main");
        let root = assy.root();
        let child = assy
            .add_group(root, "sub", Pose::identity(), z_offset(10.0))
            .unwrap();
        let grandchild = assy
            .add_part(child, "leaf", part("leaf"), Pose::identity(), z_offset(7.0))
            .unwrap();

        explode_to_depth(&mut assy, 1);
        // The child moved, the grandchild's own pose did not.
        assert!((assy[child].pose.translation_vec().z - 10.0).abs() < 1e-12);
        assert!(assy[grandchild].pose.translation_vec().z.abs() < 1e-12);
    }

    #[test]
    fn test_default_depth_covers_three_levels_not_four() {
        let mut assy = Assembly::new("main");
        let root = assy.root();
        let l1 = assy
            .add_group(root, "l1", Pose::identity(), z_offset(1.0))
            .unwrap();
        let l2 = assy
            .add_group(l1, "l2", Pose::identity(), z_offset(1.0))
            .unwrap();
        let l3 = assy
            .add_group(l2, "l3", Pose::identity(), z_offset(1.0))
            .unwrap();
        let l4 = assy
            .add_group(l3, "l4", Pose::identity(), z_offset(1.0))
            .unwrap();

        explode(&mut assy);
        assert!((assy[l1].pose.translation_vec().z - 1.0).abs() < 1e-12);
        assert!((assy[l2].pose.translation_vec().z - 1.0).abs() < 1e-12);
        assert!((assy[l3].pose.translation_vec().z - 1.0).abs() < 1e-12);
        assert!(assy[l4].pose.translation_vec().z.abs() < 1e-12);
    }

    #[test]
    fn test_root_pose_never_touched() {
        let mut assy = Assembly::new("main");
        let root = assy.root();
        assy[root].metadata = z_offset(100.0);

        explode(&mut assy);
        assert!(assy[root].pose.translation_vec().norm() < 1e-12);
    }

    #[test]
    fn test_offset_in_local_frame() {
        use cadnote_math::{Dir3, Vec3};
        use std::f64::consts::PI;

        // Node rotated 90° about Z: a local +X offset moves it along
        // world +Y.
        let mut assy = Assembly::new("main");
        let root = assy.root();
        let pose = Pose::rotation_about_axis(&Dir3::new_normalize(Vec3::z()), PI / 2.0);
        let metadata = NodeMetadata::with_explode(ExplodeOffset::new(Pose::translation(
            5.0, 0.0, 0.0,
        )));
        let node = assy
            .add_part(root, "box", part("box"), pose, metadata)
            .unwrap();

        explode(&mut assy);
        let origin = origin_of(&assy, node);
        assert!(origin.x.abs() < 1e-12);
        assert!((origin.y - 5.0).abs() < 1e-12);
    }
}
