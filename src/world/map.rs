//! Map loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable map files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::rasterizer::Palette;
use super::hexagon::{init_hexagons, Direction, HexRecord, HexType, Hexagon, CONNECTION_MASK};

/// Error type for map loading
#[derive(Debug)]
pub enum MapError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    /// Connection mask uses bits beyond the six directions
    InvalidConnections { q: i32, r: i32, connections: u8 },
    /// Two records share one grid cell
    DuplicateHex { q: i32, r: i32 },
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for MapError {
    fn from(e: ron::error::SpannedError) -> Self {
        MapError::ParseError(e)
    }
}

impl From<ron::Error> for MapError {
    fn from(e: ron::Error) -> Self {
        MapError::SerializeError(e)
    }
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::IoError(e) => write!(f, "IO error: {}", e),
            MapError::ParseError(e) => write!(f, "Parse error: {}", e),
            MapError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            MapError::InvalidConnections { q, r, connections } => {
                write!(f, "Hex ({}, {}) has invalid connection mask {:#04x}", q, r, connections)
            }
            MapError::DuplicateHex { q, r } => write!(f, "Hex ({}, {}) appears more than once", q, r),
        }
    }
}

impl std::error::Error for MapError {}

/// A whole dungeon as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    /// Generator seed, also picks the color palette
    #[serde(default)]
    pub seed: String,
    pub hexagons: Vec<HexRecord>,
}

impl MapData {
    /// Build map data from a list of cells, connecting every pair of cells
    /// that are grid neighbours
    pub fn from_cells(seed: &str, cells: &[(i32, i32, HexType)]) -> Self {
        let occupied: HashSet<(i32, i32)> = cells.iter().map(|&(q, r, _)| (q, r)).collect();

        let hexagons = cells
            .iter()
            .map(|&(q, r, kind)| {
                let connections = Direction::ALL
                    .iter()
                    .filter(|dir| {
                        let (dq, dr) = dir.axial_offset();
                        occupied.contains(&(q + dq, r + dr))
                    })
                    .fold(0u8, |mask, dir| mask | dir.bit());
                HexRecord::new(q, r, connections, kind)
            })
            .collect();

        Self { seed: seed.to_string(), hexagons }
    }

    /// Reject masks with stray bits and duplicate cells. Connections to
    /// missing neighbours are kept but reported.
    pub fn validate(&self) -> Result<(), MapError> {
        let mut seen = HashSet::with_capacity(self.hexagons.len());
        for rec in &self.hexagons {
            if rec.connections & !CONNECTION_MASK != 0 {
                return Err(MapError::InvalidConnections { q: rec.q, r: rec.r, connections: rec.connections });
            }
            if !seen.insert((rec.q, rec.r)) {
                return Err(MapError::DuplicateHex { q: rec.q, r: rec.r });
            }
        }

        for rec in &self.hexagons {
            for dir in Direction::ALL {
                if rec.connections & dir.bit() == 0 {
                    continue;
                }
                let (dq, dr) = dir.axial_offset();
                if !seen.contains(&(rec.q + dq, rec.r + dr)) {
                    log::warn!("hex ({}, {}) connects {:?} to a missing neighbour", rec.q, rec.r, dir);
                }
            }
        }
        Ok(())
    }

    pub fn to_hexagons(&self) -> Vec<Hexagon> {
        init_hexagons(&self.hexagons)
    }

    pub fn palette(&self) -> Palette {
        Palette::from_seed(&self.seed)
    }
}

/// Load a map from a RON file
pub fn load_map<P: AsRef<Path>>(path: P) -> Result<MapData, MapError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let map = load_map_from_str(&contents)?;
    log::info!("loaded map {} ({} hexes, seed {:?})", path.as_ref().display(), map.hexagons.len(), map.seed);
    Ok(map)
}

/// Load a map from a RON string (for embedded maps or testing)
pub fn load_map_from_str(s: &str) -> Result<MapData, MapError> {
    let map: MapData = ron::from_str(s)?;
    map.validate()?;
    Ok(map)
}

/// Save a map to a RON file
pub fn save_map<P: AsRef<Path>>(map: &MapData, path: P) -> Result<(), MapError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(2)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(map, config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Built-in dungeon: two rooms joined by a winding corridor
pub fn demo_map() -> MapData {
    use HexType::{Corridor, Room};

    let mut cells = Vec::new();

    // Spawn room: center plus ring
    cells.push((0, 0, Room));
    for dir in Direction::ALL {
        let (dq, dr) = dir.axial_offset();
        cells.push((dq, dr, Room));
    }

    // Corridor heading north out of the spawn room
    cells.extend([(0, -2, Corridor), (0, -3, Corridor), (1, -4, Corridor), (1, -5, Corridor)]);

    // Far room
    cells.extend([(1, -6, Room), (2, -7, Room), (1, -7, Room), (0, -6, Room)]);

    MapData::from_cells("encom", &cells)
}
