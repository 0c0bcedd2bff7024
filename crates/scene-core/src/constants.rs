// Shared scene tuning constants used by the core and the web front-end.

// Viewport
pub const PIXEL_RATIO_MAX: f32 = 2.0; // cap for the render surface pixel ratio

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_MIN_DISTANCE: f32 = 0.0;
pub const ORBIT_MAX_DISTANCE: f32 = f32::INFINITY;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-6; // keeps phi off the poles

// Cube demo camera
pub const CUBE_CAMERA_FOV_DEG: f32 = 45.0;
pub const CUBE_CAMERA_NEAR: f32 = 0.1;
pub const CUBE_CAMERA_FAR: f32 = 1000.0;
pub const CUBE_CAMERA_EYE: [f32; 3] = [0.0, 0.0, 5.0];
pub const AXES_HELPER_SIZE: f32 = 2.0;
pub const CUBE_COLOR: u32 = 0xffffff;

// House camera
pub const HOUSE_CAMERA_FOV_DEG: f32 = 75.0;
pub const HOUSE_CAMERA_NEAR: f32 = 0.1;
pub const HOUSE_CAMERA_FAR: f32 = 100.0;
pub const HOUSE_CAMERA_EYE: [f32; 3] = [-2.0, 1.0, 2.0];
pub const CAMERA_SLIDER_MIN: f32 = -5.0;
pub const CAMERA_SLIDER_MAX: f32 = 5.0;
pub const CAMERA_SLIDER_STEP: f32 = 1.0;

// Wall
pub const WALL_WIDTH: f32 = 1.5;
pub const WALL_HEIGHT: f32 = 0.8;
pub const WALL_DEPTH: f32 = 1.0;
pub const WALL_COLOR: u32 = 0xffffff;

// Ground
pub const GROUND_SIZE: f32 = 5.0;
pub const GROUND_COLOR: u32 = 0xc1c1c1;

// Roof
pub const ROOF_HEIGHT: f32 = 1.2;
pub const ROOF_DEPTH: f32 = 0.01;
pub const ROOF_COLOR: u32 = 0xffe400;
pub const ROOF1_POSITION_X: f32 = -0.48;
pub const ROOF_POSITION_Y: f32 = 0.96;
pub const ROOF_SLIDER_MIN: f32 = -2.0;
pub const ROOF_SLIDER_MAX: f32 = 2.0;
pub const ROOF_SLIDER_STEP: f32 = 0.01;

// Logo
pub const LOGO_RING_INNER: f32 = 0.08;
pub const LOGO_RING_OUTER: f32 = 0.1;
pub const LOGO_RING_SEGMENTS: u32 = 20;
pub const LOGO_RING_COLOR: u32 = 0x000000;
pub const LOGO_RING_Y: f32 = 1.0;
pub const LOGO_RING_Z_NUDGE: f32 = 0.01; // in front of the wall face
pub const LOGO_LETTER_TEXT: &str = "A";
pub const LOGO_LETTER_COLOR: u32 = 0xffff00;
pub const LOGO_LETTER_SIZE: f32 = 0.5;
pub const LOGO_LETTER_DEPTH: f32 = 0.2;
pub const LOGO_LETTER_CURVE_SEGMENTS: u32 = 12;
pub const FONT_URL: &str = "/fonts/gentilis_regular.typeface.json";

// Roof panel width derived from the gable pitch (30 degrees)
#[inline]
pub fn roof_width(wall_width: f32) -> f32 {
    wall_width * 0.5 / (std::f32::consts::PI / 6.0).cos() + wall_width / 6.0
}

// Apex height of the triangular wall-top above the wall
#[inline]
pub fn gable_height(wall_width: f32) -> f32 {
    wall_width / 2.0 * (std::f32::consts::PI / 6.0).tan()
}

