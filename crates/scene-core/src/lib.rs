pub mod camera;
pub mod clock;
pub mod color;
pub mod composer;
pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod orbit;
pub mod params;
pub mod render_loop;
pub mod scene;
pub mod session;
pub mod stats;
pub mod text;
pub mod viewport;

pub use camera::*;
pub use clock::*;
pub use color::*;
pub use composer::*;
pub use config::*;
pub use constants::*;
pub use controls::*;
pub use error::*;
pub use geometry::*;
pub use orbit::*;
pub use params::*;
pub use render_loop::*;
pub use scene::*;
pub use session::*;
pub use stats::*;
pub use text::*;
pub use viewport::*;

// Shaders bundled as string constants
pub static BASIC_WGSL: &str = include_str!("../shaders/basic.wgsl");
