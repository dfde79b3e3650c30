//! First-person view of the hexagon world
//!
//! - Camera pose and two projection variants (rejecting, always valid)
//! - Distance/frustum culling and floor level-of-detail
//! - Far-to-near ordering of hexagons and wall segments
//! - Frame rendering through any `Rasterizer`

mod camera;
mod visibility;
mod depth;
mod scene;

pub use camera::*;
pub use visibility::*;
pub use depth::*;
pub use scene::*;
