//! Camera-facing dot transforms

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::consts::WORLD_UP;
use crate::orthonormal_basis;

/// Rotation taking local +Z onto `forward`, keeping local +Y close to `up`
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let (right, up, forward) = orthonormal_basis(forward, up);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize()
}

/// Transform for a dot sitting on a surface hit
///
/// The quad is lifted `normal_offset` along `normal` and turned to face
/// `camera`. Without a camera (or with the camera on the dot) it faces along
/// the surface normal. Scale is always one; quad size lives in the mesh.
pub fn billboard_transform(point: Vec3, normal: Vec3, normal_offset: f32, camera: Option<Vec3>) -> Mat4 {
    let normal = normal.normalize_or_zero();
    let position = point + normal * normal_offset;
    let facing = camera
        .and_then(|c| (c - position).try_normalize())
        .or_else(|| normal.try_normalize())
        .unwrap_or(Vec3::Z);

    Mat4::from_scale_rotation_translation(Vec3::ONE, look_rotation(facing, WORLD_UP), position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_along_normal() {
        let m = billboard_transform(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, 0.01, None);
        let (scale, _, pos) = m.to_scale_rotation_translation();
        assert!((pos - Vec3::new(0.0, 0.0, 4.99)).length() < 1e-5);
        assert!((scale - Vec3::ONE).length() < 1e-5);
    }

    #[test]
    fn test_faces_camera() {
        let camera = Vec3::new(3.0, 1.0, -2.0);
        let m = billboard_transform(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, 0.0, Some(camera));
        let facing = m.transform_vector3(Vec3::Z);
        let expected = (camera - Vec3::new(0.0, 0.0, 5.0)).normalize();
        assert!((facing - expected).length() < 1e-4);
    }

    #[test]
    fn test_camera_on_dot_uses_normal() {
        let p = Vec3::new(1.0, 0.0, 0.0);
        let m = billboard_transform(p, Vec3::X, 0.0, Some(p));
        let facing = m.transform_vector3(Vec3::Z);
        assert!((facing - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_look_rotation_vertical() {
        // Looking straight up must not produce NaNs
        let q = look_rotation(Vec3::Y, Vec3::Y);
        assert!(q.is_finite());
        assert!((q * Vec3::Z - Vec3::Y).length() < 1e-4);
    }
}
