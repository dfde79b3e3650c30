//! Hexcrawl: first-person hexagon dungeon on a flat-shaded software rasterizer
//!
//! - Flat-top hexagon cells on an axial grid, rooms and corridors
//! - Painter's-algorithm rendering, no depth buffer
//! - Distance/frustum culling and floor level-of-detail
//! - Wall sliding collision against the same geometry that is drawn

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod rasterizer;
pub mod world;
pub mod view;
pub mod collision;
pub mod player;
pub mod config;

pub use collision::{resolve_collision, Resolution};
pub use config::RenderSettings;
pub use player::Player;
pub use view::{render_frame, Camera, FrameStats};
pub use world::{init_hexagons, HexRecord, HexType, Hexagon};
