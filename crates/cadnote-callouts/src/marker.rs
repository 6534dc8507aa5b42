//! Directional marker placement: assembly arrows and assembly lines.
//!
//! A marker is synthesized through the collaborator, oriented along
//! the tagged face's outward normal, and bundled with its part into a
//! wrapping sub-tree node so the pair moves as one rigid unit under
//! exploded-view offsets.

use cadnote_assembly::{Assembly, AssemblyError, Color, NodeId, NodeMetadata, Part};
use cadnote_kernel::{resolve_unique_face, Kernel, Solid};
use cadnote_math::{Point2, Pose};

use crate::orient::rotation_aligning_z;
use crate::report::{PlacementReport, SkipReason, SkippedNode};
use crate::CalloutError;

/// Total marker length (shaft + head) before scaling.
///
/// Fixed regardless of the target face size; callers match markers to
/// their model with the scale factor instead.
pub const MARKER_LENGTH: f64 = 10.0;

/// Default face tag for assembly arrows.
pub const ARROW_TAG: &str = "arrow";

/// Default face tag for assembly lines.
pub const ASSEMBLY_LINE_TAG: &str = "assembly_line";

const ARROW_TIP_RADIUS: f64 = 0.5;
const ARROW_HEAD_RADIUS: f64 = 2.5;
const ARROW_TAPER_DEG: f64 = -30.0;
const LINE_RADIUS: f64 = 0.25;

/// The kind of directional marker to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Tapered-cone shaft with a wider cylindrical head.
    Arrow,
    /// Thin insertion-path line, twice the arrow's length.
    Line,
}

impl MarkerKind {
    /// The face tag this kind looks for by default.
    pub fn default_tag(&self) -> &'static str {
        match self {
            MarkerKind::Arrow => ARROW_TAG,
            MarkerKind::Line => ASSEMBLY_LINE_TAG,
        }
    }

    fn name_prefix(&self) -> &'static str {
        match self {
            MarkerKind::Arrow => "arrow",
            MarkerKind::Line => "assembly_line",
        }
    }
}

/// Marker kind, tag, and scale for a placement pass.
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    /// What to synthesize.
    pub kind: MarkerKind,
    /// The face tag to resolve on each part.
    pub tag: String,
    /// Linear scale factor; must be positive.
    pub scale: f64,
}

impl MarkerStyle {
    /// Arrow style with the default tag and unit scale.
    pub fn arrow() -> Self {
        Self {
            kind: MarkerKind::Arrow,
            tag: ARROW_TAG.to_string(),
            scale: 1.0,
        }
    }

    /// Assembly-line style with the default tag and unit scale.
    pub fn line() -> Self {
        Self {
            kind: MarkerKind::Line,
            tag: ASSEMBLY_LINE_TAG.to_string(),
            scale: 1.0,
        }
    }

    /// Override the face tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Override the scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

fn build_marker(kernel: &dyn Kernel, kind: MarkerKind, scale: f64) -> Box<dyn Solid> {
    match kind {
        MarkerKind::Arrow => {
            // Shaft and head each take half the total length.
            let segment = MARKER_LENGTH * scale / 2.0;
            let shaft = kernel.tapered_cylinder(ARROW_TIP_RADIUS * scale, segment, ARROW_TAPER_DEG);
            let head = kernel.cylinder(ARROW_HEAD_RADIUS * scale, segment);
            let head = kernel.transformed(head.as_ref(), &Pose::translation(0.0, 0.0, segment));
            kernel.union(shaft.as_ref(), head.as_ref())
        }
        MarkerKind::Line => kernel.cylinder(LINE_RADIUS * scale, 2.0 * MARKER_LENGTH * scale),
    }
}

/// Place one directional marker at a node's tagged face.
///
/// Resolves the tag to exactly one face, synthesizes the marker, and
/// bundles part + marker into a wrapping sub-tree that replaces the
/// node in its parent's child list. The marker's tip sits at the face
/// centroid in the part's local frame with its long axis along the
/// face's outward normal.
///
/// On any error the tree is left unmodified. Returns the marker's node
/// id; the wrapping bundle is its parent.
pub fn place_directional_marker(
    assembly: &mut Assembly,
    node: NodeId,
    style: &MarkerStyle,
    kernel: &dyn Kernel,
) -> Result<NodeId, CalloutError> {
    if !(style.scale > 0.0) {
        return Err(CalloutError::InvalidScale { scale: style.scale });
    }

    let (centroid, normal) = {
        let target = assembly.node(node).ok_or(AssemblyError::NodeNotFound)?;
        let part = target.part.as_ref().ok_or_else(|| AssemblyError::NotAPart {
            name: target.name.clone(),
        })?;
        let face = resolve_unique_face(part.solid.as_ref(), &style.tag)?;
        (face.centroid(), face.normal_at(Point2::origin()))
    };

    let marker_pose =
        Pose::from_translation(centroid.coords).then(&rotation_aligning_z(&normal));
    let marker_solid = build_marker(kernel, style.kind, style.scale);

    // Everything fallible is resolved; only now mutate the tree.
    let index = assembly.sibling_index(node).unwrap_or(0);
    let bundle = assembly.wrap_child(node)?;
    let marker = assembly.add_part(
        bundle,
        format!("{}_{index}", style.kind.name_prefix()),
        Part::new(marker_solid).with_color(Color::BLACK),
        marker_pose,
        NodeMetadata::default(),
    )?;
    Ok(marker)
}

/// Run a marker style over every child of the assembly root.
///
/// Tag-resolution failures and part-less children are skipped and
/// recorded; anything else aborts the pass.
pub fn place_markers(
    assembly: &mut Assembly,
    kernel: &dyn Kernel,
    style: &MarkerStyle,
) -> Result<PlacementReport, CalloutError> {
    if !(style.scale > 0.0) {
        return Err(CalloutError::InvalidScale { scale: style.scale });
    }

    let children: Vec<NodeId> = assembly.children(assembly.root()).to_vec();
    let mut report = PlacementReport::default();

    for id in children {
        let name = assembly[id].name.clone();
        match place_directional_marker(assembly, id, style, kernel) {
            Ok(_) => report.placed.push(name),
            Err(CalloutError::Tag(err)) => {
                log::warn!("marker pass skipping node {name:?}: {err}");
                report.skipped.push(SkippedNode {
                    name,
                    reason: err.into(),
                });
            }
            Err(CalloutError::Assembly(AssemblyError::NotAPart { .. })) => {
                log::debug!("marker pass skipping node {name:?}: no part payload");
                report.skipped.push(SkippedNode {
                    name,
                    reason: SkipReason::NoPart,
                });
            }
            Err(other) => return Err(other),
        }
    }

    log::info!(
        "marker pass placed {} markers, skipped {} nodes",
        report.placed_count(),
        report.skipped_count()
    );
    Ok(report)
}

/// Add assembly arrows to every root child with a face tagged
/// [`ARROW_TAG`].
pub fn add_assembly_arrows(
    assembly: &mut Assembly,
    kernel: &dyn Kernel,
    scale: f64,
) -> Result<PlacementReport, CalloutError> {
    place_markers(assembly, kernel, &MarkerStyle::arrow().with_scale(scale))
}

/// Add assembly lines to every root child with a face tagged
/// [`ASSEMBLY_LINE_TAG`].
pub fn add_assembly_lines(
    assembly: &mut Assembly,
    kernel: &dyn Kernel,
    scale: f64,
) -> Result<PlacementReport, CalloutError> {
    place_markers(assembly, kernel, &MarkerStyle::line().with_scale(scale))
}
