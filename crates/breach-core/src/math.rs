use glam::{IVec3, Mat4, Vec3, Vec4};

use crate::types::VoxelCoord;

/// Quantize a continuous point to the voxel it occupies, by flooring each
/// component. This is the single discretization rule shared by the
/// renderer and the hit-scan: membership is always decided on the floored
/// integer coordinate, never by floating-point equality.
pub fn quantize(p: Vec3) -> VoxelCoord {
    IVec3::new(
        p.x.floor() as i32,
        p.y.floor() as i32,
        p.z.floor() as i32,
    )
}

/// CPU reference of the geometry-pass vertex transform: the world-space
/// position of a base-mesh vertex displaced by an instance offset.
/// The WGSL vertex stage computes exactly `model * vec4(base + offset, 1)`.
pub fn instance_world_position(model: Mat4, base: Vec3, offset: Vec3) -> Vec3 {
    model.transform_point3(base + offset)
}

/// CPU reference of the clip-space transform applied in the geometry pass.
pub fn instance_clip_position(mvp: Mat4, base: Vec3, offset: Vec3) -> Vec4 {
    mvp * (base + offset).extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn test_quantize_positive() {
        assert_eq!(quantize(vec3(0.0, 0.0, 0.0)), IVec3::ZERO);
        assert_eq!(quantize(vec3(0.9, 0.1, 0.5)), IVec3::ZERO);
        assert_eq!(quantize(vec3(5.0, 0.0, 0.0)), IVec3::new(5, 0, 0));
        assert_eq!(quantize(vec3(5.99, 2.01, 7.5)), IVec3::new(5, 2, 7));
    }

    #[test]
    fn test_quantize_negative_floors_down() {
        // floor, not truncation: -0.5 belongs to voxel -1
        assert_eq!(quantize(vec3(-0.5, -1.0, -1.5)), IVec3::new(-1, -1, -2));
    }

    #[test]
    fn test_world_position_identity() {
        let p = instance_world_position(Mat4::IDENTITY, vec3(0.5, 0.5, 0.5), vec3(2.0, 0.0, 0.0));
        assert_eq!(p, vec3(2.5, 0.5, 0.5));
    }

    #[test]
    fn test_world_position_translation_linearity() {
        // Translating the model matrix by delta translates every output
        // by exactly delta.
        let base = vec3(-0.5, 0.5, -0.5);
        let offset = vec3(3.0, 7.0, 1.0);
        let model = Mat4::from_rotation_y(0.7);
        let delta = vec3(10.0, -4.0, 2.5);
        let moved = Mat4::from_translation(delta) * model;

        let a = instance_world_position(model, base, offset);
        let b = instance_world_position(moved, base, offset);
        assert!((b - (a + delta)).length() < 1e-5);
    }

    #[test]
    fn test_clip_position_matches_world_under_identity() {
        let clip = instance_clip_position(Mat4::IDENTITY, vec3(0.5, 0.0, 0.0), vec3(1.0, 2.0, 3.0));
        assert_eq!(clip, Vec4::new(1.5, 2.0, 3.0, 1.0));
    }
}
