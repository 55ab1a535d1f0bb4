//! First-person camera used to author chunk MVPs.

use glam::{Mat4, Vec3};

/// Camera state. The render passes only ever read two things from it:
/// the view-projection matrix (folded into each chunk's MVP at authoring
/// time) and the position (for view-dependent lighting terms).
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    position: Vec3,
    direction: Vec3,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    const FOV: f32 = std::f32::consts::FRAC_PI_2;
    const NEAR: f32 = 0.1;
    const FAR: f32 = 1000.0;

    pub fn new(position: Vec3, aspect_ratio: f32) -> Self {
        let direction = Vec3::new(0.0, 0.0, 1.0);
        Self {
            position,
            direction,
            view: Mat4::look_at_rh(position, position + direction, Vec3::Y),
            projection: Mat4::perspective_rh(Self::FOV, aspect_ratio, Self::NEAR, Self::FAR),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Combined projection * view, the per-frame half of every chunk MVP.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn translate(&mut self, by: Vec3) {
        self.position += by;
        self.rebuild_view();
    }

    /// Point the camera along a new (not necessarily unit) direction.
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction.normalize_or_zero();
        self.rebuild_view();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.projection = Mat4::perspective_rh(Self::FOV, width / height, Self::NEAR, Self::FAR);
    }

    fn rebuild_view(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.position + self.direction, Vec3::Y);
    }
}
