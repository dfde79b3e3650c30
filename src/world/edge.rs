//! Edge state machine and wall/doorway segments
//!
//! Each hexagon edge is a solid wall, a doorway or open, decided by its
//! connection bit and the hexagon type. The renderer draws exactly the
//! segments produced here and the collision system tests exactly these
//! segments, so the two can never disagree.

use crate::rasterizer::{point_segment_distance, Vec2};
use super::hexagon::{Direction, HexType, Hexagon};

/// Fraction of a doorway edge left open in the middle
pub const DOOR_GAP_RATIO: f32 = 0.33;

/// Fraction of the edge covered by each flanking wall piece
pub const DOOR_FLANK_RATIO: f32 = (1.0 - DOOR_GAP_RATIO) / 2.0;

/// Length of the door frame cap, measured along the wall into the gap
pub const DOOR_FRAME_THICKNESS: f32 = 1.5;

/// Below this length a segment has no usable direction
pub const DEGENERATE_LENGTH: f32 = 1e-4;

/// What a single edge turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeState {
    /// Full wall from floor to ceiling
    Solid,
    /// Two flanking walls with door frames around an open center
    Doorway,
    /// Nothing at all
    Open,
}

impl EdgeState {
    /// Unconnected edges are walls; connected corridors get door frames,
    /// connected rooms merge seamlessly.
    pub fn decide(connected: bool, kind: HexType) -> Self {
        match (connected, kind) {
            (false, _) => EdgeState::Solid,
            (true, HexType::Corridor) => EdgeState::Doorway,
            (true, HexType::Room) => EdgeState::Open,
        }
    }
}

impl Hexagon {
    pub fn edge_state(&self, dir: Direction) -> EdgeState {
        EdgeState::decide(self.is_connected(dir), self.kind)
    }
}

/// A straight wall piece on the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn vector(&self) -> Vec2 {
        self.b - self.a
    }

    pub fn length(&self) -> f32 {
        self.vector().len()
    }

    pub fn midpoint(&self) -> Vec2 {
        self.a.lerp(self.b, 0.5)
    }

    pub fn is_degenerate(&self) -> bool {
        self.length() < DEGENERATE_LENGTH
    }

    /// Unit direction from `a` to `b`, None if degenerate
    pub fn direction(&self) -> Option<Vec2> {
        if self.is_degenerate() {
            None
        } else {
            Some(self.vector().normalize())
        }
    }

    pub fn distance_to(&self, p: Vec2) -> f32 {
        point_segment_distance(p, self.a, self.b)
    }
}

/// Concrete geometry for one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeGeometry {
    Open,
    Solid(Segment),
    Doorway {
        /// Outer pieces, `[from a, into b]`
        flanks: [Segment; 2],
        /// Caps on the inner ends of the flanks
        frames: [Segment; 2],
    },
}

impl EdgeGeometry {
    pub fn of(hex: &Hexagon, dir: Direction) -> Self {
        let (a, b) = hex.edge(dir);
        match hex.edge_state(dir) {
            EdgeState::Open => EdgeGeometry::Open,
            EdgeState::Solid => EdgeGeometry::Solid(Segment::new(a, b)),
            EdgeState::Doorway => doorway(a, b),
        }
    }

    /// Wall pieces (full edge or the two flanks)
    pub fn walls(&self) -> &[Segment] {
        match self {
            EdgeGeometry::Open => &[],
            EdgeGeometry::Solid(seg) => std::slice::from_ref(seg),
            EdgeGeometry::Doorway { flanks, .. } => flanks,
        }
    }

    /// Door frame caps, empty unless this is a doorway
    pub fn frames(&self) -> &[Segment] {
        match self {
            EdgeGeometry::Doorway { frames, .. } => frames,
            _ => &[],
        }
    }

    /// Every segment that blocks movement
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.walls().iter().chain(self.frames())
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EdgeGeometry::Open)
    }
}

fn doorway(a: Vec2, b: Vec2) -> EdgeGeometry {
    let inner_a = a.lerp(b, DOOR_FLANK_RATIO);
    let inner_b = a.lerp(b, 1.0 - DOOR_FLANK_RATIO);
    let along = (b - a).normalize() * DOOR_FRAME_THICKNESS;

    EdgeGeometry::Doorway {
        flanks: [Segment::new(a, inner_a), Segment::new(inner_b, b)],
        frames: [
            Segment::new(inner_a, inner_a + along),
            Segment::new(inner_b - along, inner_b),
        ],
    }
}
