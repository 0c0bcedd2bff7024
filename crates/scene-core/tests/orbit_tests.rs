// Orbit controls: rotation, damping, dolly and external eye writes.

use glam::Vec3;
use scene_core::*;
use std::f32::consts::PI;

fn camera_at(eye: Vec3) -> PerspectiveCamera {
    let mut cam = PerspectiveCamera::new(45.0, 1.0, 0.1, 1000.0);
    cam.position = eye;
    cam.look_at(Vec3::ZERO);
    cam
}

fn close(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).length() < eps
}

#[test]
fn spherical_round_trips_an_offset() {
    let v = Vec3::new(-2.0, 1.0, 2.0);
    let s = Spherical::from_offset(v);
    assert!((s.radius - 3.0).abs() < 1e-5);
    assert!(close(s.to_offset(), v, 1e-5));
}

#[test]
fn undamped_rotation_applies_in_one_update() {
    let mut cam = camera_at(Vec3::new(0.0, 0.0, 5.0));
    let mut orbit = OrbitControls::new(Vec3::ZERO);
    // A quarter of the element height is a quarter turn.
    orbit.rotate_by_pixels(100.0, 0.0, 400.0);
    assert!(orbit.update(&mut cam));
    assert!(close(cam.position, Vec3::new(-5.0, 0.0, 0.0), 1e-4));
    assert!(!orbit.update(&mut cam));
}

#[test]
fn damped_rotation_glides_to_the_same_place() {
    let mut cam = camera_at(Vec3::new(0.0, 0.0, 5.0));
    let mut orbit = OrbitControls::new(Vec3::ZERO);
    orbit.enable_damping = true;
    orbit.rotate_by_pixels(100.0, 0.0, 400.0);

    orbit.update(&mut cam);
    let first_step = Spherical::from_offset(cam.position).theta;
    assert!((first_step + PI / 2.0 * ORBIT_DAMPING_FACTOR).abs() < 1e-4);

    for _ in 0..600 {
        orbit.update(&mut cam);
    }
    assert!(close(cam.position, Vec3::new(-5.0, 0.0, 0.0), 1e-3));
    assert!((cam.position.length() - 5.0).abs() < 1e-3);
}

#[test]
fn polar_angle_never_reaches_the_pole() {
    let mut cam = camera_at(Vec3::new(0.0, 0.0, 5.0));
    let mut orbit = OrbitControls::new(Vec3::ZERO);
    orbit.rotate_by_pixels(0.0, 10_000.0, 400.0);
    orbit.update(&mut cam);
    assert!(cam.position.is_finite());
    assert!(cam.position.z > 0.0);
    assert!(cam.view_matrix().is_finite());
}

#[test]
fn wheel_up_dollies_in() {
    let mut cam = camera_at(Vec3::new(0.0, 0.0, 5.0));
    let mut orbit = OrbitControls::new(Vec3::ZERO);
    orbit.dolly_by_wheel(-120.0);
    orbit.update(&mut cam);
    assert!((cam.position.length() - 4.75).abs() < 1e-4);

    orbit.dolly_by_wheel(120.0);
    orbit.update(&mut cam);
    assert!((cam.position.length() - 5.0).abs() < 1e-4);
}

#[test]
fn external_eye_writes_are_kept() {
    let mut cam = camera_at(Vec3::new(-2.0, 1.0, 2.0));
    let mut orbit = OrbitControls::new(Vec3::ZERO);
    orbit.enable_damping = true;
    cam.position.x = 3.0;
    orbit.update(&mut cam);
    assert!(close(cam.position, Vec3::new(3.0, 1.0, 2.0), 1e-4));
}

#[test]
fn pan_moves_target_and_eye_together() {
    let mut cam = camera_at(Vec3::new(0.0, 0.0, 5.0));
    let mut orbit = OrbitControls::new(Vec3::ZERO);
    orbit.pan_by_pixels(50.0, 0.0, 400.0, &cam);
    orbit.update(&mut cam);
    assert!(orbit.target.x < 0.0);
    assert!((cam.position - orbit.target - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
}
