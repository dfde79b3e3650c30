//! Flat-shaded software rasterizer
//!
//! Features:
//! - Flat color triangles, no textures
//! - No depth buffer: painter's algorithm, draw order is occlusion
//! - Geometry is submitted in a 320x240 reference frame and rescaled
//!   to the framebuffer's real size

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Reference frame every draw call is expressed in
pub const REF_WIDTH: usize = 320;
pub const REF_HEIGHT: usize = 240;

/// Screen dimensions (low resolution)
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;

/// High resolution dimensions (2x)
pub const WIDTH_HI: usize = 640;
pub const HEIGHT_HI: usize = 480;
