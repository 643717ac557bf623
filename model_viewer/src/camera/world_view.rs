/// WorldView - the single logical camera plus light direction.
///
/// Setters keep the frustum in sync with the matrices. The view is read
/// by reference while a frame is recorded.

use glam::{Mat4, Vec3};
use crate::config::LodSettings;
use super::{Aabb, Frustum, Transform};

#[derive(Debug, Clone)]
pub struct WorldView {
    view: Mat4,
    projection: Mat4,
    eye: Vec3,
    light_direction: Vec3,
    frustum: Frustum,
}

impl Default for WorldView {
    fn default() -> Self {
        let mut world = Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            eye: Vec3::ZERO,
            light_direction: Vec3::new(-1.0, -1.0, -1.0).normalize(),
            frustum: Frustum::from_view_projection(&Mat4::IDENTITY),
        };
        world.set_perspective(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 10_000.0);
        world.look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        world
    }
}

impl WorldView {
    /// Camera at the default position with a perspective matching `aspect_ratio`
    pub fn new(aspect_ratio: f32) -> Self {
        let mut world = Self::default();
        world.set_perspective(std::f32::consts::FRAC_PI_4, aspect_ratio, 0.1, 10_000.0);
        world
    }

    // ===== GETTERS =====

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// Combined view-projection matrix (projection * view)
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Camera position in world space
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Normalised light direction
    pub fn light_direction(&self) -> Vec3 {
        self.light_direction
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    // ===== SETTERS =====

    /// Place the camera at `eye` looking at `target`
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.view = Mat4::look_at_rh(eye, target, up);
        self.eye = eye;
        self.update_frustum();
    }

    /// Set an arbitrary view matrix; the eye is recovered from its inverse
    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
        self.eye = view.inverse().col(3).truncate();
        self.update_frustum();
    }

    pub fn set_perspective(&mut self, fov_y: f32, aspect_ratio: f32, near: f32, far: f32) {
        self.projection = Mat4::perspective_rh(fov_y, aspect_ratio, near, far);
        self.update_frustum();
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
        self.update_frustum();
    }

    /// Set the light direction; a zero vector leaves it unchanged
    pub fn set_light_direction(&mut self, direction: Vec3) {
        if let Some(direction) = direction.try_normalize() {
            self.light_direction = direction;
        }
    }

    fn update_frustum(&mut self) {
        self.frustum = Frustum::from_view_projection(&self.view_projection_matrix());
    }

    // ===== QUERIES =====

    /// Squared distance from the camera to the transform's position
    pub fn distance_squared_from_camera(&self, transform: &Transform) -> f32 {
        self.eye.distance_squared(transform.position)
    }

    /// LOD tier for an instance with `transform`
    pub fn lod_for(&self, settings: &LodSettings, transform: &Transform) -> u8 {
        settings.lod_for_distance(self.distance_squared_from_camera(transform).sqrt())
    }

    /// Whether local-space `bounds` placed by `transform` intersect the frustum
    pub fn is_in_frustum(&self, bounds: &Aabb, transform: &Transform) -> bool {
        self.frustum.intersects_aabb(&bounds.transformed(&transform.world_matrix()))
    }
}

#[cfg(test)]
#[path = "world_view_tests.rs"]
mod tests;
