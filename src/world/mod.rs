//! World module - hexagon dungeon data
//!
//! - Flat-top hexagon cells on an axial grid
//! - Per-edge wall/doorway geometry shared by rendering and collision
//! - RON map files

mod hexagon;
mod edge;
mod map;

pub use hexagon::*;
pub use edge::*;
pub use map::*;
