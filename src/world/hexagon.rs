//! Hexagon geometry
//!
//! Flat-top hexagons on an axial (q, r) grid. Every hexagon is built once
//! from map data and never changes afterwards; renderer and collision both
//! read the same precomputed vertices.

use serde::{Serialize, Deserialize};
use crate::rasterizer::Vec2;

/// Center to vertex
pub const HEX_RADIUS: f32 = 50.0;

/// Center to edge midpoint (`R * sqrt(3) / 2`)
pub const HEX_APOTHEM: f32 = HEX_RADIUS * 0.866_025_4;

/// Horizontal distance between neighbouring column centers
pub const SPACING_X: f32 = 1.5 * HEX_RADIUS;

/// Vertical distance between centers in the same column
pub const SPACING_Z: f32 = 2.0 * HEX_APOTHEM;

pub const FLOOR_HEIGHT: f32 = 0.0;
pub const CEILING_HEIGHT: f32 = 20.0;

/// Vertex offsets from the center, counter-clockwise from +X
pub const HEX_TEMPLATE: [Vec2; 6] = [
    Vec2::new(HEX_RADIUS, 0.0),
    Vec2::new(HEX_RADIUS / 2.0, HEX_APOTHEM),
    Vec2::new(-HEX_RADIUS / 2.0, HEX_APOTHEM),
    Vec2::new(-HEX_RADIUS, 0.0),
    Vec2::new(-HEX_RADIUS / 2.0, -HEX_APOTHEM),
    Vec2::new(HEX_RADIUS / 2.0, -HEX_APOTHEM),
];

/// Whether a cell is part of a room or a corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexType {
    Room,
    Corridor,
}

/// One of the six edges of a hexagon, named by the neighbour it faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Southeast,
    Northeast,
    North,
    Northwest,
    Southwest,
    South,
}

/// Everything that is fixed about a direction
struct DirectionInfo {
    /// Bit in the connection mask
    bit: u8,
    /// Indices into the hexagon's vertex array, in template order
    vertices: (usize, usize),
    /// Axial offset (dq, dr) of the neighbour across this edge
    offset: (i32, i32),
}

/// The single source of truth for direction -> (bit, vertex pair, neighbour).
/// Indexed by `Direction::index()`.
const DIRECTIONS: [DirectionInfo; 6] = [
    DirectionInfo { bit: 1 << 0, vertices: (5, 0), offset: (1, 0) },
    DirectionInfo { bit: 1 << 1, vertices: (0, 1), offset: (1, -1) },
    DirectionInfo { bit: 1 << 2, vertices: (1, 2), offset: (0, -1) },
    DirectionInfo { bit: 1 << 3, vertices: (2, 3), offset: (-1, 0) },
    DirectionInfo { bit: 1 << 4, vertices: (3, 4), offset: (-1, 1) },
    DirectionInfo { bit: 1 << 5, vertices: (4, 5), offset: (0, 1) },
];

/// Mask of all valid connection bits
pub const CONNECTION_MASK: u8 = 0x3F;

impl Direction {
    /// All directions in connection-bit order
    pub const ALL: [Direction; 6] = [
        Direction::Southeast,
        Direction::Northeast,
        Direction::North,
        Direction::Northwest,
        Direction::Southwest,
        Direction::South,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    fn info(self) -> &'static DirectionInfo {
        &DIRECTIONS[self.index()]
    }

    pub fn bit(self) -> u8 {
        self.info().bit
    }

    pub fn vertex_pair(self) -> (usize, usize) {
        self.info().vertices
    }

    pub fn axial_offset(self) -> (i32, i32) {
        self.info().offset
    }

    pub fn opposite(self) -> Direction {
        Self::ALL[(self.index() + 3) % 6]
    }
}

/// Raw map record: where a cell sits on the grid and how it connects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexRecord {
    pub q: i32,
    pub r: i32,
    pub connections: u8,
    pub kind: HexType,
}

impl HexRecord {
    pub fn new(q: i32, r: i32, connections: u8, kind: HexType) -> Self {
        Self { q, r, connections, kind }
    }
}

/// Convert axial grid coordinates to the world-space center of a hexagon
pub fn axial_to_world(q: i32, r: i32) -> Vec2 {
    let (q, r) = (q as f32, r as f32);
    Vec2::new(SPACING_X * q, -SPACING_Z * (r + q * 0.5))
}

/// A placed hexagon
#[derive(Debug, Clone, PartialEq)]
pub struct Hexagon {
    pub q: i32,
    pub r: i32,
    pub center: Vec2,
    pub connections: u8,
    pub kind: HexType,
    /// World-space vertices, `center + HEX_TEMPLATE[i]`
    pub vertices: [Vec2; 6],
}

impl Hexagon {
    pub fn new(q: i32, r: i32, connections: u8, kind: HexType) -> Self {
        let center = axial_to_world(q, r);
        Self {
            q,
            r,
            center,
            connections,
            kind,
            vertices: HEX_TEMPLATE.map(|offset| center + offset),
        }
    }

    pub fn from_record(record: &HexRecord) -> Self {
        Self::new(record.q, record.r, record.connections, record.kind)
    }

    pub fn is_connected(&self, dir: Direction) -> bool {
        self.connections & dir.bit() != 0
    }

    /// World-space endpoints of the edge facing `dir`
    pub fn edge(&self, dir: Direction) -> (Vec2, Vec2) {
        let (a, b) = dir.vertex_pair();
        (self.vertices[a], self.vertices[b])
    }

    pub fn edge_midpoint(&self, dir: Direction) -> Vec2 {
        let (a, b) = self.edge(dir);
        a.lerp(b, 0.5)
    }

    /// Axial coordinates of the neighbour across `dir`
    pub fn neighbour(&self, dir: Direction) -> (i32, i32) {
        let (dq, dr) = dir.axial_offset();
        (self.q + dq, self.r + dr)
    }
}

/// Build the immutable hexagon collection from raw map records
pub fn init_hexagons(records: &[HexRecord]) -> Vec<Hexagon> {
    records.iter().map(Hexagon::from_record).collect()
}
