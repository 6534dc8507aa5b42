#![warn(missing_docs)]

//! cadnote — annotation helpers for CAD assemblies and their SVG views.
//!
//! Thin post-processing passes over assemblies built with an external
//! CAD collaborator:
//!
//! - **Assembly arrows and lines**: markers synthesized at tagged
//!   faces, pointing along the face normal, bundled rigidly with their
//!   part.
//! - **Radius dimensions**: bent leaders and text labels for
//!   `radius*`-tagged circular edges.
//! - **Exploded views**: per-node offsets from node metadata composed
//!   into poses, bounded depth, parents before children.
//! - **Safety overlays**: warning text and icon composited onto an
//!   exported SVG in place.
//!
//! # Example
//!
//! ```
//! use cadnote::recorded::{PlanarFace, RecordedKernel, RecordedSolid};
//! use cadnote::{
//!     add_assembly_arrows, explode, Assembly, ExplodeOffset, NodeMetadata, Part, Point3,
//!     Pose, Vec3,
//! };
//!
//! let kernel = RecordedKernel::new();
//! let mut assy = Assembly::new("main");
//! let root = assy.root();
//!
//! let lid = RecordedSolid::external("lid")
//!     .tag_face("arrow", PlanarFace::new(Point3::new(0.0, 0.0, 5.0), Vec3::z()));
//! assy.add_part(
//!     root,
//!     "lid",
//!     Part::new(Box::new(lid)),
//!     Pose::translation(0.0, 0.0, 10.0),
//!     NodeMetadata::with_explode(ExplodeOffset::new(Pose::translation(0.0, 0.0, 30.0))),
//! )
//! .unwrap();
//!
//! let report = add_assembly_arrows(&mut assy, &kernel, 1.0).unwrap();
//! assert!(report.is_clean());
//! explode(&mut assy);
//! ```

pub use cadnote_assembly;
pub use cadnote_callouts;
pub use cadnote_kernel;
pub use cadnote_math;
pub use cadnote_overlay;

pub use cadnote_kernel::recorded;

pub use cadnote_assembly::{
    explode, explode_to_depth, Assembly, AssemblyError, AssemblyNode, Color, ExplodeOffset,
    NodeId, NodeMetadata, OffsetKey, Part, DEFAULT_EXPLODE_DEPTH,
};
pub use cadnote_callouts::{
    add_assembly_arrows, add_assembly_lines, add_circular_dimensions, place_directional_marker,
    place_markers, rotation_aligning_z, CalloutError, DimensionError, MarkerKind, MarkerStyle,
    PlacementReport, PlaneOrientation, SkipReason, SkippedNode, ARROW_TAG, ASSEMBLY_LINE_TAG,
    MARKER_LENGTH, RADIUS_TAG_PREFIX,
};
pub use cadnote_kernel::{
    resolve_unique_edge, resolve_unique_face, Edge, Face, Kernel, Solid, TagResolutionError,
};
pub use cadnote_math::{Dir3, Point2, Point3, Pose, Tolerance, Vec2, Vec3};
pub use cadnote_overlay::{add_safety_warning, OverlayError, WarningOptions};
