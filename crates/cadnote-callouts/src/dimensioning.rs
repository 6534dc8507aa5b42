//! Radius dimension callouts for circular edges.
//!
//! Scans a part's tags for the `radius` prefix and, for each matching
//! circular edge, places a bent leader (arrow head, straight extension,
//! 45° tail) anchored on the circle plus a text label showing the
//! radius value. Only the XY and YZ workplane orientations are
//! supported; anything else is rejected rather than dimensioned wrong.

use std::f64::consts::FRAC_PI_4;

use cadnote_assembly::{Assembly, Color, NodeMetadata, Part};
use cadnote_kernel::{resolve_unique_edge, Kernel, Solid};
use cadnote_math::{Dir3, Point3, Pose, Tolerance, Vec3};

use crate::orient::rotation_aligning_z;
use crate::DimensionError;

/// Tags with this prefix are treated as radius dimension requests.
pub const RADIUS_TAG_PREFIX: &str = "radius";

const TIP_RADIUS: f64 = 0.5;
const HEAD_TAPER_DEG: f64 = -30.0;
/// Arrow-head length, scaled by the caller's factor.
const HEAD_LENGTH: f64 = 10.0;
/// Straight leader extension past the head, unscaled.
const LEADER_EXTENSION: f64 = 10.0;
/// Bent tail length after the 45° turn, unscaled.
const LEADER_TAIL: f64 = 5.0;
/// Label offset along the plane's vertical axis from the anchor.
const LABEL_OFFSET: f64 = 15.0;
const LABEL_FONT_SIZE: f64 = 4.0;
const LABEL_THICKNESS: f64 = 1.0;

/// The two workplane orientations radius dimensioning supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneOrientation {
    /// XY workplane, `+Z` normal.
    Xy,
    /// YZ workplane, `+X` normal.
    Yz,
}

impl PlaneOrientation {
    /// Classify a workplane frame, or `None` if unsupported.
    pub fn classify(x_dir: &Dir3, normal: &Dir3) -> Option<Self> {
        let tol = Tolerance::DEFAULT;
        let xy = (Dir3::new_normalize(Vec3::x()), Dir3::new_normalize(Vec3::z()));
        let yz = (Dir3::new_normalize(Vec3::y()), Dir3::new_normalize(Vec3::x()));
        if tol.dirs_equal(x_dir, &xy.0) && tol.dirs_equal(normal, &xy.1) {
            Some(PlaneOrientation::Xy)
        } else if tol.dirs_equal(x_dir, &yz.0) && tol.dirs_equal(normal, &yz.1) {
            Some(PlaneOrientation::Yz)
        } else {
            None
        }
    }

    /// The plane's normal.
    fn normal_axis(&self) -> Vec3 {
        match self {
            PlaneOrientation::Xy => Vec3::z(),
            PlaneOrientation::Yz => Vec3::x(),
        }
    }

    /// In-plane axis the leader initially points along.
    fn leader_axis(&self) -> Vec3 {
        match self {
            PlaneOrientation::Xy => Vec3::x(),
            PlaneOrientation::Yz => Vec3::y(),
        }
    }

    /// In-plane vertical axis the label is offset along.
    fn vertical_axis(&self) -> Vec3 {
        match self {
            PlaneOrientation::Xy => Vec3::y(),
            PlaneOrientation::Yz => Vec3::z(),
        }
    }

    /// Anchor on the circle: `radius·cos 45°` along both in-plane axes,
    /// keeping the edge center's out-of-plane coordinate.
    fn anchor(&self, radius: f64, center: &Point3) -> Vec3 {
        let d = radius * FRAC_PI_4.cos();
        match self {
            PlaneOrientation::Xy => Vec3::new(d, d, center.z),
            PlaneOrientation::Yz => Vec3::new(center.x, d, d),
        }
    }

    /// Rotation mapping the XY text plane into this workplane.
    fn label_rotation(&self) -> Pose {
        rotation_aligning_z(&Dir3::new_normalize(self.normal_axis()))
    }
}

/// Text content for a radius label. Whole values keep a trailing `.0`
/// (`R 10.0`), fractional values print their shortest form (`R 2.5`).
fn radius_label(radius: f64) -> String {
    if radius.fract() == 0.0 {
        format!("R {radius:.1}")
    } else {
        format!("R {radius}")
    }
}

/// Geometry resolved for one radius tag before any tree is built.
#[derive(Debug)]
struct LeaderPlan {
    tag: String,
    radius: f64,
    orientation: PlaneOrientation,
    anchor: Vec3,
}

fn build_leader(kernel: &dyn Kernel, orientation: PlaneOrientation, scale: f64) -> Box<dyn Solid> {
    let along_leader = rotation_aligning_z(&Dir3::new_normalize(orientation.leader_axis()));
    let leader = orientation.leader_axis();
    let head_len = HEAD_LENGTH * scale;

    // Arrow head: tip at the local origin, pointing along the leader axis.
    let head = kernel.tapered_cylinder(TIP_RADIUS * scale, head_len, HEAD_TAPER_DEG);
    let head = kernel.transformed(head.as_ref(), &along_leader);

    // Straight extension continuing from the head.
    let extension = kernel.cylinder(TIP_RADIUS * scale, LEADER_EXTENSION);
    let extension = kernel.transformed(
        extension.as_ref(),
        &Pose::from_translation(leader * head_len).then(&along_leader),
    );

    // Tail bent 45° back toward the plane normal.
    let tail_dir = Dir3::new_normalize(leader + orientation.normal_axis());
    let tail = kernel.cylinder(TIP_RADIUS * scale, LEADER_TAIL);
    let tail = kernel.transformed(
        tail.as_ref(),
        &Pose::from_translation(leader * (head_len + LEADER_EXTENSION))
            .then(&rotation_aligning_z(&tail_dir)),
    );

    let shaft = kernel.union(head.as_ref(), extension.as_ref());
    kernel.union(shaft.as_ref(), tail.as_ref())
}

/// Add radius dimension callouts for every `radius*`-tagged circular
/// edge of a part.
///
/// Returns a fresh assembly holding the part plus, per matched tag, one
/// leader node and one label node. Any tag that resolves ambiguously,
/// names a non-circular edge, or lies on an unsupported workplane
/// aborts the whole call.
pub fn add_circular_dimensions(
    part: Part,
    kernel: &dyn Kernel,
    scale: f64,
) -> Result<Assembly, DimensionError> {
    if !(scale > 0.0) {
        return Err(DimensionError::InvalidScale { scale });
    }

    let mut tags: Vec<String> = part
        .solid
        .tags()
        .into_iter()
        .filter(|tag| tag.starts_with(RADIUS_TAG_PREFIX))
        .collect();
    tags.sort();
    tags.dedup();

    // Resolve every tag before the assembly exists, so a failure leaves
    // nothing half-built.
    let mut plans = Vec::with_capacity(tags.len());
    for tag in tags {
        let edge = resolve_unique_edge(part.solid.as_ref(), &tag).map_err(|source| {
            DimensionError::Tag {
                tag: tag.clone(),
                source,
            }
        })?;
        let radius = edge
            .radius()
            .ok_or_else(|| DimensionError::NotCircular { tag: tag.clone() })?;
        let orientation = PlaneOrientation::classify(&edge.x_dir(), &edge.normal_dir())
            .ok_or_else(|| DimensionError::UnsupportedOrientation { tag: tag.clone() })?;
        let anchor = orientation.anchor(radius, &edge.center());
        plans.push(LeaderPlan {
            tag,
            radius,
            orientation,
            anchor,
        });
    }

    let mut assembly = Assembly::new("dimensions");
    let root = assembly.root();
    assembly.add_part(root, "part", part, Pose::identity(), NodeMetadata::default())?;

    for plan in plans {
        let leader = build_leader(kernel, plan.orientation, scale);
        // The leader points along the in-plane axis; a 45° turn about
        // the plane normal lines it up with the anchor's diagonal.
        let leader_pose = Pose::from_translation(plan.anchor).then(&Pose::rotation_about_axis(
            &Dir3::new_normalize(plan.orientation.normal_axis()),
            FRAC_PI_4,
        ));
        assembly.add_part(
            root,
            format!("{}_arrow", plan.tag),
            Part::new(leader).with_color(Color::BLACK),
            leader_pose,
            NodeMetadata::default(),
        )?;

        let label = kernel.text(&radius_label(plan.radius), LABEL_FONT_SIZE, LABEL_THICKNESS);
        let label_pose = Pose::from_translation(
            plan.anchor + plan.orientation.vertical_axis() * LABEL_OFFSET,
        )
        .then(&plan.orientation.label_rotation());
        assembly.add_part(
            root,
            format!("{}_label", plan.tag),
            Part::new(label).with_color(Color::BLACK),
            label_pose,
            NodeMetadata::default(),
        )?;

        log::debug!(
            "dimensioned {:?}: R {} on {:?} plane",
            plan.tag,
            plan.radius,
            plan.orientation
        );
    }

    Ok(assembly)
}
