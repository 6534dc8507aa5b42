#![warn(missing_docs)]

//! Connector placement for assembly annotation.
//!
//! Synthesizes auxiliary marker geometry (assembly arrows, assembly
//! insertion lines, and radius dimension leaders) through the CAD
//! collaborator and inserts it into an assembly tree so that each
//! marker originates at a tagged face or edge:
//!
//! - [`add_assembly_arrows`] / [`add_assembly_lines`]: one marker per
//!   root child with a tagged face, bundled with its part so the pair
//!   stays rigid under exploded-view offsets, with skipped nodes
//!   collected into a [`PlacementReport`].
//! - [`add_circular_dimensions`]: bent radius leaders and text labels
//!   for every `radius*`-tagged circular edge of a part.
//!
//! The passes only ever add nodes and never inspect geometry beyond
//! the narrow collaborator traits.

pub mod dimensioning;
pub mod marker;
pub mod orient;
pub mod report;

pub use dimensioning::{add_circular_dimensions, PlaneOrientation, RADIUS_TAG_PREFIX};
pub use marker::{
    add_assembly_arrows, add_assembly_lines, place_directional_marker, place_markers, MarkerKind,
    MarkerStyle, ARROW_TAG, ASSEMBLY_LINE_TAG, MARKER_LENGTH,
};
pub use orient::rotation_aligning_z;
pub use report::{PlacementReport, SkipReason, SkippedNode};

use cadnote_assembly::AssemblyError;
use cadnote_kernel::TagResolutionError;
use thiserror::Error;

/// Errors from directional marker placement.
#[derive(Error, Debug)]
pub enum CalloutError {
    /// The marker tag resolved to zero or several faces.
    #[error("tag resolution: {0}")]
    Tag(#[from] TagResolutionError),

    /// The assembly rejected a tree mutation.
    #[error("assembly: {0}")]
    Assembly(#[from] AssemblyError),

    /// The marker scale factor was zero or negative.
    #[error("marker scale must be positive, got {scale}")]
    InvalidScale {
        /// The rejected scale factor.
        scale: f64,
    },
}

/// Errors from radius dimension placement.
///
/// Any failure aborts the whole call: a partially dimensioned part is
/// worse than an error.
#[derive(Error, Debug)]
pub enum DimensionError {
    /// A radius tag resolved to zero or several edges.
    #[error("tag {tag:?}: {source}")]
    Tag {
        /// The offending tag.
        tag: String,
        /// The underlying resolution failure.
        #[source]
        source: TagResolutionError,
    },

    /// A radius tag named an edge that is not circular.
    #[error("tag {tag:?} does not name a circular edge")]
    NotCircular {
        /// The offending tag.
        tag: String,
    },

    /// The edge's workplane is neither XY nor YZ oriented.
    #[error("tag {tag:?}: workplane orientation is not XY or YZ")]
    UnsupportedOrientation {
        /// The offending tag.
        tag: String,
    },

    /// The assembly rejected a tree mutation.
    #[error("assembly: {0}")]
    Assembly(#[from] AssemblyError),

    /// The dimension scale factor was zero or negative.
    #[error("dimension scale must be positive, got {scale}")]
    InvalidScale {
        /// The rejected scale factor.
        scale: f64,
    },
}
