#![warn(missing_docs)]

//! Narrow interface to the external CAD collaborator.
//!
//! The annotation passes never touch boundary representation, booleans,
//! or tessellation themselves; all of that belongs to whichever CAD
//! backend the caller brings. This crate pins down the slice of that
//! backend the passes actually consume:
//!
//! - **Tag queries**: faces and edges looked up by string tag on a solid.
//! - **Face evaluation**: centroid and normal through the surface's own
//!   parametrization (never assumed planar).
//! - **Edge evaluation**: center, radius for circular edges, and the
//!   workplane frame that produced the edge.
//! - **Construction**: the handful of primitives marker synthesis needs
//!   (cylinders, tapered cylinders, text, union, rigid transform).
//!
//! Everything is expressed as object-safe traits so a backend plugs in
//! behind `Box<dyn Solid>` without generics leaking into the assembly
//! tree. The [`recorded`] module provides the reference implementation
//! used by tests and demos.

pub mod recorded;

use std::any::Any;

use cadnote_math::{Dir3, Point2, Point3, Pose};
use thiserror::Error;

/// Errors from resolving a tag against a solid's faces or edges.
///
/// The two cases stay distinct all the way up: a missing tag is a usage
/// or modeling slip, while an ambiguous tag means the caller's selector
/// matched more than one entity and the pass must not guess.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagResolutionError {
    /// No face or edge carries the tag.
    #[error("no entity tagged {tag:?}")]
    NotFound {
        /// The tag that failed to resolve.
        tag: String,
    },

    /// More than one entity carries the tag.
    #[error("tag {tag:?} matches {count} entities, expected exactly one")]
    Ambiguous {
        /// The tag that resolved ambiguously.
        tag: String,
        /// How many entities matched.
        count: usize,
    },
}

/// Result type for tag resolution.
pub type Result<T> = std::result::Result<T, TagResolutionError>;

/// A face of a solid, evaluated through its surface parametrization.
pub trait Face: Send + Sync + std::fmt::Debug {
    /// Centroid of the face in the solid's local frame.
    fn centroid(&self) -> Point3;

    /// Outward normal at the given surface parameter.
    ///
    /// Marker placement evaluates at the origin-projected parameter
    /// rather than assuming the face is planar.
    fn normal_at(&self, uv: Point2) -> Dir3;
}

/// An edge of a solid.
pub trait Edge: Send + Sync + std::fmt::Debug {
    /// Center point of the edge in the solid's local frame.
    fn center(&self) -> Point3;

    /// Radius, if the edge is circular. `None` for any other curve type.
    fn radius(&self) -> Option<f64>;

    /// X direction of the workplane that produced the edge.
    fn x_dir(&self) -> Dir3;

    /// Normal of the workplane that produced the edge.
    fn normal_dir(&self) -> Dir3;
}

/// An opaque solid owned by the CAD collaborator.
pub trait Solid: Send + Sync + std::fmt::Debug {
    /// Clone this solid into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Solid>;

    /// Downcast to a concrete type via `Any`.
    fn as_any(&self) -> &dyn Any;

    /// All tags recorded on this solid, faces and edges alike.
    fn tags(&self) -> Vec<String>;

    /// Faces carrying the given tag.
    fn faces_tagged(&self, tag: &str) -> Vec<&dyn Face>;

    /// Edges carrying the given tag.
    fn edges_tagged(&self, tag: &str) -> Vec<&dyn Edge>;
}

impl Clone for Box<dyn Solid> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Construction primitives consumed by marker synthesis.
///
/// All solids are built in a local frame with `+Z` as the extrusion
/// axis and the origin at the base; orientation and placement happen
/// through [`Kernel::transformed`] and node poses.
pub trait Kernel {
    /// Cylinder of the given radius, extruded `height` along `+Z`.
    fn cylinder(&self, radius: f64, height: f64) -> Box<dyn Solid>;

    /// Tapered cylinder (cone frustum): base radius `radius`, extruded
    /// `height` along `+Z` with the given taper angle in degrees.
    fn tapered_cylinder(&self, radius: f64, height: f64, taper_deg: f64) -> Box<dyn Solid>;

    /// Solid text in the XY plane facing `+Z`.
    fn text(&self, content: &str, font_size: f64, thickness: f64) -> Box<dyn Solid>;

    /// Boolean union of two solids.
    fn union(&self, a: &dyn Solid, b: &dyn Solid) -> Box<dyn Solid>;

    /// A copy of `solid` rigidly transformed by `pose`.
    fn transformed(&self, solid: &dyn Solid, pose: &Pose) -> Box<dyn Solid>;
}

/// Resolve a tag that must name exactly one face.
pub fn resolve_unique_face<'a>(solid: &'a dyn Solid, tag: &str) -> Result<&'a dyn Face> {
    let faces = solid.faces_tagged(tag);
    match faces.as_slice() {
        [] => Err(TagResolutionError::NotFound {
            tag: tag.to_string(),
        }),
        [face] => Ok(*face),
        many => Err(TagResolutionError::Ambiguous {
            tag: tag.to_string(),
            count: many.len(),
        }),
    }
}

/// Resolve a tag that must name exactly one edge.
pub fn resolve_unique_edge<'a>(solid: &'a dyn Solid, tag: &str) -> Result<&'a dyn Edge> {
    let edges = solid.edges_tagged(tag);
    match edges.as_slice() {
        [] => Err(TagResolutionError::NotFound {
            tag: tag.to_string(),
        }),
        [edge] => Ok(*edge),
        many => Err(TagResolutionError::Ambiguous {
            tag: tag.to_string(),
            count: many.len(),
        }),
    }
}
