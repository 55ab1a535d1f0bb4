//! Deterministic ray-vs-voxel-set resolution.

use breach_core::constants::{DEFAULT_RAY_LENGTH, DEFAULT_RAY_STEP, VOXEL_EDGE};
use breach_core::math::quantize;
use breach_core::BreachError;
use glam::Vec3;
use log::trace;

/// How far and how finely a hit-scan samples its ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitscanParams {
    pub max_length: f32,
    pub step: f32,
}

impl HitscanParams {
    /// Validate a range and step. The step must not exceed the voxel
    /// edge, or the march can tunnel straight through a voxel between
    /// two samples; the range must be a positive finite length, or the
    /// march would sample nothing and report a miss for every shot.
    pub fn new(max_length: f32, step: f32) -> Result<Self, BreachError> {
        if !(step > 0.0 && step <= VOXEL_EDGE) {
            return Err(BreachError::InvalidStep { step });
        }
        if !(max_length > 0.0 && max_length.is_finite()) {
            return Err(BreachError::InvalidLength { length: max_length });
        }
        Ok(Self { max_length, step })
    }

    /// Number of samples taken on a full-length march:
    /// ceil(max_length / step).
    pub fn sample_count(&self) -> u32 {
        (self.max_length / self.step).ceil() as u32
    }
}

impl Default for HitscanParams {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_RAY_LENGTH,
            step: DEFAULT_RAY_STEP,
        }
    }
}

/// March a ray through voxel space and test each sample against the
/// target volume. Returns at the first hit.
///
/// Samples are taken at t = 0, step, 2·step, … while t < max_length — a
/// counted loop, so the march always terminates after exactly
/// `params.sample_count()` iterations even when `origin + direction * t`
/// accumulates float error. Membership is decided on floor-quantized
/// coordinates, never on floating-point equality.
///
/// `direction` must be unit length; anything else (including zero) is
/// rejected before stepping begins.
pub fn resolve_hit(
    origin: Vec3,
    direction: Vec3,
    params: HitscanParams,
    target: &crate::VoxelVolume,
) -> Result<bool, BreachError> {
    let length_sq = direction.length_squared();
    if (length_sq - 1.0).abs() > 1e-3 {
        return Err(BreachError::InvalidDirection {
            length: length_sq.sqrt(),
        });
    }

    let samples = params.sample_count();
    for i in 0..samples {
        let t = i as f32 * params.step;
        let sample = quantize(origin + direction * t);
        if target.contains(sample) {
            trace!("hit at t={t} sample={sample}");
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VoxelVolume;
    use glam::{vec3, IVec3};

    fn volume(cells: &[[i32; 3]]) -> VoxelVolume {
        cells.iter().map(|&[x, y, z]| IVec3::new(x, y, z)).collect()
    }

    #[test]
    fn test_axis_ray_hits_voxel_on_axis() {
        // sample at t = 5.0 lands exactly on (5, 0, 0)
        let target = volume(&[[5, 0, 0]]);
        let params = HitscanParams::new(100.0, 0.25).unwrap();
        assert!(resolve_hit(Vec3::ZERO, vec3(1.0, 0.0, 0.0), params, &target).unwrap());
    }

    #[test]
    fn test_axis_ray_misses_offset_voxel() {
        // (5, 1, 0) never intersects the ray's axis
        let target = volume(&[[5, 1, 0]]);
        let params = HitscanParams::new(100.0, 0.25).unwrap();
        assert!(!resolve_hit(Vec3::ZERO, vec3(1.0, 0.0, 0.0), params, &target).unwrap());
    }

    #[test]
    fn test_origin_inside_target_hits_at_t_zero() {
        let target = volume(&[[0, 0, 0]]);
        let params = HitscanParams::default();
        assert!(resolve_hit(vec3(0.5, 0.5, 0.5), vec3(0.0, 1.0, 0.0), params, &target).unwrap());
    }

    #[test]
    fn test_voxel_beyond_max_length_is_not_hit() {
        let target = volume(&[[12, 0, 0]]);
        let params = HitscanParams::new(10.0, 0.25).unwrap();
        assert!(!resolve_hit(Vec3::ZERO, vec3(1.0, 0.0, 0.0), params, &target).unwrap());
    }

    #[test]
    fn test_negative_direction_quantizes_by_floor() {
        // marching toward -x from 0.5: sample at t = 1.0 is -0.5,
        // which floors into voxel -1
        let target = volume(&[[-1, 0, 0]]);
        let params = HitscanParams::new(5.0, 0.25).unwrap();
        assert!(resolve_hit(vec3(0.5, 0.5, 0.5), vec3(-1.0, 0.0, 0.0), params, &target).unwrap());
    }

    #[test]
    fn test_zero_direction_rejected_before_stepping() {
        let target = volume(&[[0, 0, 0]]);
        let err =
            resolve_hit(Vec3::ZERO, Vec3::ZERO, HitscanParams::default(), &target).unwrap_err();
        assert!(matches!(err, BreachError::InvalidDirection { .. }));
    }

    #[test]
    fn test_non_unit_direction_rejected() {
        let target = volume(&[[5, 0, 0]]);
        let err = resolve_hit(
            Vec3::ZERO,
            vec3(2.0, 0.0, 0.0),
            HitscanParams::default(),
            &target,
        )
        .unwrap_err();
        assert_eq!(err, BreachError::InvalidDirection { length: 2.0 });
    }

    #[test]
    fn test_sample_count_is_ceil_of_ratio() {
        assert_eq!(HitscanParams::new(100.0, 0.25).unwrap().sample_count(), 400);
        assert_eq!(HitscanParams::new(10.0, 0.3).unwrap().sample_count(), 34);
        assert_eq!(HitscanParams::new(1.0, 1.0).unwrap().sample_count(), 1);
    }

    #[test]
    fn test_samples_stay_below_max_length() {
        // every sampled t is strictly below max_length: with
        // max_length = 1.0 and step = 0.5 the samples are t = 0.0 and
        // t = 0.5, so a voxel starting at x = 1 is out of reach
        let target = volume(&[[1, 0, 0]]);
        let params = HitscanParams::new(1.0, 0.5).unwrap();
        assert!(!resolve_hit(Vec3::ZERO, vec3(1.0, 0.0, 0.0), params, &target).unwrap());
    }

    #[test]
    fn test_step_validation() {
        assert!(matches!(
            HitscanParams::new(100.0, 0.0),
            Err(BreachError::InvalidStep { .. })
        ));
        assert!(matches!(
            HitscanParams::new(100.0, -0.5),
            Err(BreachError::InvalidStep { .. })
        ));
        // a step above the voxel edge can tunnel
        assert!(matches!(
            HitscanParams::new(100.0, 1.5),
            Err(BreachError::InvalidStep { .. })
        ));
        assert!(HitscanParams::new(100.0, 1.0).is_ok());
    }

    #[test]
    fn test_length_validation() {
        assert_eq!(
            HitscanParams::new(-5.0, 0.25).unwrap_err(),
            BreachError::InvalidLength { length: -5.0 }
        );
        assert!(matches!(
            HitscanParams::new(0.0, 0.25),
            Err(BreachError::InvalidLength { .. })
        ));
        assert!(matches!(
            HitscanParams::new(f32::NAN, 0.25),
            Err(BreachError::InvalidLength { .. })
        ));
        assert!(matches!(
            HitscanParams::new(f32::INFINITY, 0.25),
            Err(BreachError::InvalidLength { .. })
        ));
        assert!(HitscanParams::new(0.5, 0.25).is_ok());
    }
}
