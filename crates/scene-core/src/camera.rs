//! Perspective camera shared by the viewport, orbit controls and renderer.
//!
//! The projection matrix is cached and only recomputed by
//! [`PerspectiveCamera::update_projection_matrix`], so aspect edits made
//! during a resize become visible in one explicit step.

use glam::{Mat4, Vec3};

/// Right-handed camera with a vertical field of view.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fovy_degrees: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_degrees,
            znear,
            zfar,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    #[inline]
    pub fn fovy_radians(&self) -> f32 {
        self.fovy_degrees.to_radians()
    }

    /// Recommit the projection from the current fov/aspect/near/far.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fovy_radians(), self.aspect, self.znear, self.zfar);
    }

    /// Last committed clip-space projection.
    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World to view transform looking from `position` at `target`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
}
