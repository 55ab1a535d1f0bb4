use breach_core::constants::{BASE_DAMAGE, FULL_HEALTH};
use breach_core::BreachError;
use glam::Vec3;
use log::debug;

use crate::hitscan::{resolve_hit, HitscanParams};
use crate::volume::VoxelVolume;

/// A damageable entity: the voxel volume it occupies plus its health
/// counter. Health is the only state a hit-scan ever mutates.
#[derive(Debug, Clone)]
pub struct Target {
    pub volume: VoxelVolume,
    health: u32,
}

impl Target {
    pub fn new(volume: VoxelVolume) -> Self {
        Self {
            volume,
            health: FULL_HEALTH,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    /// Destroyed targets are removed by the caller.
    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    /// Resolve one weapon-fire event against this target. On a hit the
    /// fixed base damage is applied; there is no partial or graze model.
    pub fn fire(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        params: HitscanParams,
    ) -> Result<bool, BreachError> {
        let hit = resolve_hit(origin, direction, params, &self.volume)?;
        if hit {
            self.apply_damage(BASE_DAMAGE);
        }
        Ok(hit)
    }

    /// Subtract damage, saturating at zero.
    pub fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        debug!("target took {amount} damage, {} health left", self.health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{vec3, IVec3};

    fn single_voxel_target() -> Target {
        Target::new([IVec3::new(5, 0, 0)].into_iter().collect())
    }

    #[test]
    fn test_fire_hit_applies_base_damage() {
        let mut target = single_voxel_target();
        let hit = target
            .fire(Vec3::ZERO, vec3(1.0, 0.0, 0.0), HitscanParams::default())
            .unwrap();
        assert!(hit);
        assert_eq!(target.health(), FULL_HEALTH - BASE_DAMAGE);
    }

    #[test]
    fn test_fire_miss_leaves_health_untouched() {
        let mut target = single_voxel_target();
        let hit = target
            .fire(Vec3::ZERO, vec3(0.0, 1.0, 0.0), HitscanParams::default())
            .unwrap();
        assert!(!hit);
        assert_eq!(target.health(), FULL_HEALTH);
    }

    #[test]
    fn test_target_destroyed_after_enough_hits() {
        let mut target = single_voxel_target();
        let shots = FULL_HEALTH / BASE_DAMAGE;
        for _ in 0..shots {
            assert!(!target.is_destroyed());
            target
                .fire(Vec3::ZERO, vec3(1.0, 0.0, 0.0), HitscanParams::default())
                .unwrap();
        }
        assert!(target.is_destroyed());
    }

    #[test]
    fn test_damage_saturates_at_zero() {
        let mut target = single_voxel_target();
        target.apply_damage(FULL_HEALTH + 50);
        assert_eq!(target.health(), 0);
        assert!(target.is_destroyed());
    }

    #[test]
    fn test_fire_propagates_invalid_direction() {
        let mut target = single_voxel_target();
        assert!(target
            .fire(Vec3::ZERO, Vec3::ZERO, HitscanParams::default())
            .is_err());
        assert_eq!(target.health(), FULL_HEALTH);
    }
}
