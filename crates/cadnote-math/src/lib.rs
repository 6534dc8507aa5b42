#![warn(missing_docs)]

//! Math types for the cadnote annotation passes.
//!
//! Thin wrappers around nalgebra providing the domain types the
//! annotation passes work with: points, vectors, directions, rigid
//! poses, and tolerance constants. Everything here is a rigid-body
//! quantity; there is no scaling or shearing anywhere in the
//! annotation pipeline.

use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector2, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D parameter space.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// A rigid transform: a rotation followed by a translation.
///
/// Poses compose multiplicatively. `parent.then(&local)` applies
/// `local` first, in the frame `parent` establishes, which is the
/// composition rule assembly trees use for child placement and
/// explode offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    isometry: Isometry3<f64>,
}

impl Pose {
    /// Identity pose.
    pub fn identity() -> Self {
        Self {
            isometry: Isometry3::identity(),
        }
    }

    /// Pure translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            isometry: Isometry3::from_parts(
                Translation3::new(dx, dy, dz),
                UnitQuaternion::identity(),
            ),
        }
    }

    /// Pure translation by a vector.
    pub fn from_translation(v: Vec3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    /// Pure rotation about an axis through the origin by `angle` radians.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        Self {
            isometry: Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_axis_angle(axis, angle),
            ),
        }
    }

    /// Pose from a translation vector and a rotation.
    pub fn from_parts(translation: Vec3, rotation: UnitQuaternion<f64>) -> Self {
        Self {
            isometry: Isometry3::from_parts(Translation3::from(translation), rotation),
        }
    }

    /// Compose: apply `other` in the local frame of `self`.
    ///
    /// `a.then(&b).apply_point(p) == a.apply_point(&b.apply_point(p))`.
    pub fn then(&self, other: &Pose) -> Self {
        Self {
            isometry: self.isometry * other.isometry,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.isometry.transform_point(p)
    }

    /// Transform a direction vector (rotation only, no translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.isometry.transform_vector(v)
    }

    /// Inverse of this pose. Rigid transforms are always invertible.
    pub fn inverse(&self) -> Self {
        Self {
            isometry: self.isometry.inverse(),
        }
    }

    /// The translation component.
    pub fn translation_vec(&self) -> Vec3 {
        self.isometry.translation.vector
    }

    /// The rotation component.
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        self.isometry.rotation
    }

    /// Whether this pose is the identity within `tol`.
    pub fn is_identity(&self, tol: &Tolerance) -> bool {
        self.translation_vec().norm() < tol.linear && self.rotation().angle() < tol.angular
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in model units.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default annotation tolerances (1e-6 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two directions are parallel (same or opposite sense).
    pub fn dirs_parallel(&self, a: &Dir3, b: &Dir3) -> bool {
        a.as_ref().cross(b.as_ref()).norm() < self.linear
    }

    /// Check if two directions point the same way within tolerance.
    pub fn dirs_equal(&self, a: &Dir3, b: &Dir3) -> bool {
        (a.as_ref() - b.as_ref()).norm() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_pose() {
        let pose = Pose::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!((pose.apply_point(&p) - p).norm() < 1e-12);
    }

    #[test]
    fn test_translation() {
        let pose = Pose::translation(10.0, 20.0, 30.0);
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = pose.apply_point(&p);
        assert_relative_eq!(result.x, 11.0, epsilon = 1e-12);
        assert_relative_eq!(result.y, 22.0, epsilon = 1e-12);
        assert_relative_eq!(result.z, 33.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_about_axis() {
        // Rotate (1,0,0) by 90° about Z → (0,1,0)
        let axis = Dir3::new_normalize(Vec3::z());
        let pose = Pose::rotation_about_axis(&axis, PI / 2.0);
        let result = pose.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(result.x.abs() < 1e-12);
        assert_relative_eq!(result.y, 1.0, epsilon = 1e-12);
        assert!(result.z.abs() < 1e-12);
    }

    #[test]
    fn test_then_applies_local_first() {
        // parent translates, local rotates: the rotation happens in the
        // translated frame.
        let parent = Pose::translation(5.0, 0.0, 0.0);
        let local = Pose::rotation_about_axis(&Dir3::new_normalize(Vec3::z()), PI / 2.0);
        let composed = parent.then(&local);
        let result = composed.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(result.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(result.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_then_matches_pointwise_composition() {
        let a = Pose::rotation_about_axis(&Dir3::new_normalize(Vec3::new(1.0, 2.0, 3.0)), 0.7)
            .then(&Pose::translation(1.0, -2.0, 0.5));
        let b = Pose::translation(-3.0, 0.0, 4.0);
        let p = Point3::new(0.3, -1.2, 2.5);
        let composed = a.then(&b).apply_point(&p);
        let stepwise = a.apply_point(&b.apply_point(&p));
        assert!((composed - stepwise).norm() < 1e-12);
    }

    #[test]
    fn test_inverse_round_trip() {
        let pose = Pose::translation(1.0, 2.0, 3.0).then(&Pose::rotation_about_axis(
            &Dir3::new_normalize(Vec3::new(0.0, 1.0, 1.0)),
            1.1,
        ));
        let p = Point3::new(5.0, 6.0, 7.0);
        let round_trip = pose.inverse().apply_point(&pose.apply_point(&p));
        assert!((round_trip - p).norm() < 1e-12);
    }

    #[test]
    fn test_apply_vec_ignores_translation() {
        let pose = Pose::translation(100.0, 100.0, 100.0);
        let v = Vec3::new(1.0, 0.0, 0.0);
        assert!((pose.apply_vec(&v) - v).norm() < 1e-12);
    }

    #[test]
    fn test_is_identity() {
        let tol = Tolerance::DEFAULT;
        assert!(Pose::identity().is_identity(&tol));
        assert!(!Pose::translation(0.0, 0.0, 1.0).is_identity(&tol));
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-7, 2.0, 3.0);
        assert!(tol.points_equal(&a, &b));
        let c = Point3::new(1.001, 2.0, 3.0);
        assert!(!tol.points_equal(&a, &c));
    }

    #[test]
    fn test_tolerance_dirs() {
        let tol = Tolerance::DEFAULT;
        let up = Dir3::new_normalize(Vec3::z());
        let down = Dir3::new_normalize(-Vec3::z());
        assert!(tol.dirs_parallel(&up, &down));
        assert!(!tol.dirs_equal(&up, &down));
        assert!(tol.dirs_equal(&up, &Dir3::new_normalize(Vec3::new(0.0, 0.0, 2.0))));
    }
}
