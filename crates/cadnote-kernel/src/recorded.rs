//! Construction-recording reference collaborator.
//!
//! [`RecordedKernel`] implements [`Kernel`](crate::Kernel) by recording
//! each construction as data instead of building geometry, the way a
//! parametric document records its operation tree. Tests and demos use
//! it to assert what a pass asked the collaborator to build; analytic
//! planar faces and circular edges can be attached under tags to stand
//! in for real tagged B-rep entities.
//!
//! Mixing solids from a different collaborator into a recorded
//! construction is unsupported; such inputs are recorded as
//! [`SolidOp::External`].

use std::any::Any;

use cadnote_math::{Dir3, Point2, Point3, Pose, Vec3};

use crate::{Edge, Face, Kernel, Solid};

/// One recorded construction operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SolidOp {
    /// Geometry this kernel did not build (caller-supplied parts).
    External {
        /// Display label for the external geometry.
        label: String,
    },
    /// Cylinder along `+Z`.
    Cylinder {
        /// Base radius.
        radius: f64,
        /// Extrusion height.
        height: f64,
    },
    /// Tapered cylinder (cone frustum) along `+Z`.
    TaperedCylinder {
        /// Base radius.
        radius: f64,
        /// Extrusion height.
        height: f64,
        /// Taper angle in degrees.
        taper_deg: f64,
    },
    /// Solid text in the XY plane.
    Text {
        /// Text content.
        content: String,
        /// Font size in model units.
        font_size: f64,
        /// Extrusion thickness.
        thickness: f64,
    },
    /// Boolean union of two recorded solids.
    Union {
        /// Left operand.
        left: Box<SolidOp>,
        /// Right operand.
        right: Box<SolidOp>,
    },
    /// A recorded solid under a rigid transform.
    Transformed {
        /// The transformed solid.
        child: Box<SolidOp>,
        /// The applied pose.
        pose: Pose,
    },
}

/// A planar face with an analytic centroid and constant normal.
#[derive(Debug, Clone)]
pub struct PlanarFace {
    origin: Point3,
    normal: Dir3,
}

impl PlanarFace {
    /// Face centered at `origin` with the given (not necessarily
    /// normalized) outward normal.
    pub fn new(origin: Point3, normal: Vec3) -> Self {
        Self {
            origin,
            normal: Dir3::new_normalize(normal),
        }
    }
}

impl Face for PlanarFace {
    fn centroid(&self) -> Point3 {
        self.origin
    }

    fn normal_at(&self, _uv: Point2) -> Dir3 {
        // Constant across the plane; the parameter only matters for
        // curved surfaces.
        self.normal
    }
}

/// An analytic edge: circular or straight, with its workplane frame.
#[derive(Debug, Clone)]
pub struct AnalyticEdge {
    center: Point3,
    radius: Option<f64>,
    x_dir: Dir3,
    normal_dir: Dir3,
}

impl AnalyticEdge {
    /// Circular edge of the given radius. `x_dir` and `normal` describe
    /// the workplane that produced it.
    pub fn circular(center: Point3, radius: f64, x_dir: Vec3, normal: Vec3) -> Self {
        Self {
            center,
            radius: Some(radius),
            x_dir: Dir3::new_normalize(x_dir),
            normal_dir: Dir3::new_normalize(normal),
        }
    }

    /// Straight edge (no radius).
    pub fn straight(center: Point3, x_dir: Vec3, normal: Vec3) -> Self {
        Self {
            center,
            radius: None,
            x_dir: Dir3::new_normalize(x_dir),
            normal_dir: Dir3::new_normalize(normal),
        }
    }
}

impl Edge for AnalyticEdge {
    fn center(&self) -> Point3 {
        self.center
    }

    fn radius(&self) -> Option<f64> {
        self.radius
    }

    fn x_dir(&self) -> Dir3 {
        self.x_dir
    }

    fn normal_dir(&self) -> Dir3 {
        self.normal_dir
    }
}

/// A solid whose construction history is recorded as a [`SolidOp`] tree.
#[derive(Debug, Clone)]
pub struct RecordedSolid {
    op: SolidOp,
    faces: Vec<(String, PlanarFace)>,
    edges: Vec<(String, AnalyticEdge)>,
}

impl RecordedSolid {
    fn from_op(op: SolidOp) -> Self {
        Self {
            op,
            faces: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// A stand-in for caller-supplied geometry this kernel did not build.
    pub fn external(label: impl Into<String>) -> Self {
        Self::from_op(SolidOp::External {
            label: label.into(),
        })
    }

    /// Attach a tagged face. Repeating a tag makes it ambiguous, which
    /// tests use to exercise resolution failures.
    pub fn tag_face(mut self, tag: impl Into<String>, face: PlanarFace) -> Self {
        self.faces.push((tag.into(), face));
        self
    }

    /// Attach a tagged edge.
    pub fn tag_edge(mut self, tag: impl Into<String>, edge: AnalyticEdge) -> Self {
        self.edges.push((tag.into(), edge));
        self
    }

    /// The recorded construction tree.
    pub fn op(&self) -> &SolidOp {
        &self.op
    }
}

impl Solid for RecordedSolid {
    fn clone_box(&self) -> Box<dyn Solid> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn tags(&self) -> Vec<String> {
        self.faces
            .iter()
            .map(|(tag, _)| tag.clone())
            .chain(self.edges.iter().map(|(tag, _)| tag.clone()))
            .collect()
    }

    fn faces_tagged(&self, tag: &str) -> Vec<&dyn Face> {
        self.faces
            .iter()
            .filter(|(t, _)| t == tag)
            .map(|(_, face)| face as &dyn Face)
            .collect()
    }

    fn edges_tagged(&self, tag: &str) -> Vec<&dyn Edge> {
        self.edges
            .iter()
            .filter(|(t, _)| t == tag)
            .map(|(_, edge)| edge as &dyn Edge)
            .collect()
    }
}

/// Kernel implementation that records constructions as [`SolidOp`] trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedKernel;

impl RecordedKernel {
    /// Create a recording kernel.
    pub fn new() -> Self {
        Self
    }

    fn op_of(solid: &dyn Solid) -> SolidOp {
        match solid.as_any().downcast_ref::<RecordedSolid>() {
            Some(recorded) => recorded.op.clone(),
            None => SolidOp::External {
                label: "foreign".to_string(),
            },
        }
    }
}

impl Kernel for RecordedKernel {
    fn cylinder(&self, radius: f64, height: f64) -> Box<dyn Solid> {
        Box::new(RecordedSolid::from_op(SolidOp::Cylinder { radius, height }))
    }

    fn tapered_cylinder(&self, radius: f64, height: f64, taper_deg: f64) -> Box<dyn Solid> {
        Box::new(RecordedSolid::from_op(SolidOp::TaperedCylinder {
            radius,
            height,
            taper_deg,
        }))
    }

    fn text(&self, content: &str, font_size: f64, thickness: f64) -> Box<dyn Solid> {
        Box::new(RecordedSolid::from_op(SolidOp::Text {
            content: content.to_string(),
            font_size,
            thickness,
        }))
    }

    fn union(&self, a: &dyn Solid, b: &dyn Solid) -> Box<dyn Solid> {
        Box::new(RecordedSolid::from_op(SolidOp::Union {
            left: Box::new(Self::op_of(a)),
            right: Box::new(Self::op_of(b)),
        }))
    }

    fn transformed(&self, solid: &dyn Solid, pose: &Pose) -> Box<dyn Solid> {
        Box::new(RecordedSolid::from_op(SolidOp::Transformed {
            child: Box::new(Self::op_of(solid)),
            pose: pose.clone(),
        }))
    }
}
