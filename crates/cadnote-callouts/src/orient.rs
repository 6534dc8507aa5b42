//! Marker orientation along face normals.
//!
//! Markers are synthesized with `+Z` as their long axis; placement
//! needs the rotation taking `+Z` onto a face normal. The rotation is
//! built from the axis-angle pair `(z × n, atan2(‖z × n‖, z · n))`,
//! which is well conditioned for every normal except the exactly
//! anti-parallel one; that case falls back to a half turn about an
//! axis derived from a fixed diagonal reference.

use cadnote_math::{Dir3, Pose, Vec3};

/// Cross products below this norm are treated as colinear.
const COLINEAR_EPS: f64 = 1e-12;

/// The fixed diagonal reference used to pick a half-turn axis when the
/// normal points exactly along `-Z`.
fn antiparallel_reference() -> Vec3 {
    Vec3::new(-1.0, -1.0, -1.0)
}

/// Rotation taking the marker's default `+Z` axis onto `normal`.
pub fn rotation_aligning_z(normal: &Dir3) -> Pose {
    let z = Vec3::z();
    let n = normal.into_inner();
    let cross = z.cross(&n);
    let dot = z.dot(&n);

    if cross.norm() > COLINEAR_EPS {
        let axis = Dir3::new_normalize(cross);
        Pose::rotation_about_axis(&axis, cross.norm().atan2(dot))
    } else if dot > 0.0 {
        Pose::identity()
    } else {
        // Anti-parallel: any axis perpendicular to Z gives a valid half
        // turn; project the diagonal reference into the XY plane.
        let reference = antiparallel_reference();
        let axis = Dir3::new_normalize(reference - z * reference.dot(&z));
        Pose::rotation_about_axis(&axis, std::f64::consts::PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_aligns(normal: Vec3) {
        let dir = Dir3::new_normalize(normal);
        let rotation = rotation_aligning_z(&dir);
        let mapped = rotation.apply_vec(&Vec3::z());
        assert!(
            (mapped - dir.into_inner()).norm() < 1e-9,
            "normal {normal:?}: +Z mapped to {mapped:?}"
        );
    }

    #[test]
    fn test_parallel_is_identity() {
        let rotation = rotation_aligning_z(&Dir3::new_normalize(Vec3::z()));
        assert!(rotation.is_identity(&Default::default()));
    }

    #[test]
    fn test_cardinal_normals() {
        assert_aligns(Vec3::x());
        assert_aligns(-Vec3::x());
        assert_aligns(Vec3::y());
        assert_aligns(-Vec3::y());
    }

    #[test]
    fn test_antiparallel_fallback() {
        assert_aligns(-Vec3::z());
    }

    #[test]
    fn test_skew_normals() {
        assert_aligns(Vec3::new(1.0, 2.0, 3.0));
        assert_aligns(Vec3::new(-0.3, 0.7, -0.2));
        // The diagonal the original formulation was fragile around.
        assert_aligns(Vec3::new(-1.0, -1.0, -1.0));
        // Nearly anti-parallel, where axis-angle must stay stable.
        assert_aligns(Vec3::new(1e-8, -1e-8, -1.0));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let rotation = rotation_aligning_z(&Dir3::new_normalize(Vec3::new(2.0, -1.0, 0.5)));
        let v = Vec3::new(3.0, 4.0, 12.0);
        assert!((rotation.apply_vec(&v).norm() - v.norm()).abs() < 1e-9);
    }
}
