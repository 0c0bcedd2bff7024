//! Orbit camera controls.
//!
//! Orbits the camera around `target` on a sphere. Pointer and wheel input
//! accumulate into pending deltas; [`OrbitControls::update`] applies them to
//! the camera. With damping enabled each update applies only a fraction of
//! the pending delta and decays the rest, giving an eased glide.
//!
//! The camera eye is re-read on every update, so positions written by other
//! code (the camera sliders) are picked up rather than overwritten.

use crate::camera::PerspectiveCamera;
use crate::constants::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PAN_SPEED,
    ORBIT_POLAR_EPSILON, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Spherical coordinates with +Y up; `theta` around Y from +Z, `phi` from +Y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    pending: Spherical,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: false,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            pending: Spherical::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    /// Drag rotation; a drag across the full element height turns one lap.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, element_height: f32) {
        let h = element_height.max(1.0);
        self.pending.theta -= TAU * dx / h * self.rotate_speed;
        self.pending.phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Screen-space pan scaled so the point under the cursor tracks it.
    pub fn pan_by_pixels(
        &mut self,
        dx: f32,
        dy: f32,
        element_height: f32,
        camera: &PerspectiveCamera,
    ) {
        let h = element_height.max(1.0);
        let offset = camera.position - self.target;
        let distance = offset.length() * (camera.fovy_radians() / 2.0).tan();
        let world = camera.view_matrix().inverse();
        let right = world.x_axis.truncate();
        let up = world.y_axis.truncate();
        self.pan_offset += right * (-2.0 * dx * distance / h * self.pan_speed);
        self.pan_offset += up * (2.0 * dy * distance / h * self.pan_speed);
    }

    /// Wheel zoom: negative `delta_y` (scroll up) moves the camera closer.
    pub fn dolly_by_wheel(&mut self, delta_y: f32) {
        let zoom = 0.95_f32.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= zoom;
        } else if delta_y > 0.0 {
            self.scale /= zoom;
        }
    }

    /// Apply pending input to the camera. Returns whether the eye moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let mut s = Spherical::from_offset(camera.position - self.target);

        let gain = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        s.theta += self.pending.theta * gain;
        s.phi += self.pending.phi * gain;
        s.phi = s.phi.clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
        s.radius = (s.radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * gain;

        camera.position = self.target + s.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.pending.theta *= keep;
            self.pending.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.pending = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        (camera.position - before).length_squared() > 1e-12
    }
}
