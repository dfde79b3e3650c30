//! Movement collision against walls and door frames
//!
//! The player is a circle on the ground plane. A position is blocked when
//! it is closer than the radius to any wall piece produced by
//! `EdgeGeometry`, the same pieces the renderer draws. Blocked moves try a
//! single slide along the nearest wall before giving up.

use crate::rasterizer::Vec2;
use crate::world::{Direction, EdgeGeometry, Hexagon, Segment, HEX_RADIUS};

/// Slides shorter than this count as no movement
const MIN_SLIDE: f32 = 1e-4;

/// A wall piece closer than the player radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub segment: Segment,
    pub distance: f32,
}

/// Outcome of a movement request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Where the player ends up
    pub position: Vec2,
    /// Movement was refused; `position` is the old position
    pub blocked: bool,
    /// Movement was redirected along a wall
    pub slid: bool,
}

impl Resolution {
    fn free(position: Vec2) -> Self {
        Self { position, blocked: false, slid: false }
    }

    fn slide(position: Vec2) -> Self {
        Self { position, blocked: false, slid: true }
    }

    fn block(old: Vec2) -> Self {
        Self { position: old, blocked: true, slid: false }
    }
}

/// Anything a moving circle can bump into
pub trait Blockers {
    /// The nearest piece closer than `radius` to `p`, if any
    fn closest_violation(&self, p: Vec2, radius: f32) -> Option<Hit>;

    fn collides(&self, p: Vec2, radius: f32) -> bool {
        self.closest_violation(p, radius).is_some()
    }
}

fn keep_closest(best: &mut Option<Hit>, segment: &Segment, p: Vec2, radius: f32) {
    let distance = segment.distance_to(p);
    if distance < radius && best.map_or(true, |b| distance < b.distance) {
        *best = Some(Hit { segment: *segment, distance });
    }
}

impl Blockers for [Segment] {
    fn closest_violation(&self, p: Vec2, radius: f32) -> Option<Hit> {
        let mut best = None;
        for segment in self {
            keep_closest(&mut best, segment, p, radius);
        }
        best
    }
}

impl Blockers for [Hexagon] {
    /// Brute force over every edge of every hexagon whose bounding circle
    /// could reach `p`
    fn closest_violation(&self, p: Vec2, radius: f32) -> Option<Hit> {
        let reach = HEX_RADIUS + radius + 1.0;
        let mut best = None;
        for hex in self.iter().filter(|hex| hex.center.distance_sq(p) <= reach * reach) {
            for dir in Direction::ALL {
                for segment in EdgeGeometry::of(hex, dir).segments() {
                    keep_closest(&mut best, segment, p, radius);
                }
            }
        }
        best
    }
}

/// Resolve a move from `old` to `proposed` against any set of blockers
pub fn resolve_movement<B: Blockers + ?Sized>(blockers: &B, old: Vec2, proposed: Vec2, radius: f32) -> Resolution {
    let Some(hit) = blockers.closest_violation(proposed, radius) else {
        return Resolution::free(proposed);
    };

    let Some(along) = hit.segment.direction() else {
        log::trace!("blocked by degenerate segment at {:?}", hit.segment.a);
        return Resolution::block(old);
    };

    // Keep only the part of the attempted move that runs along the wall
    let slide = along * (proposed - old).dot(along);
    if slide.len_sq() < MIN_SLIDE * MIN_SLIDE {
        return Resolution::block(old);
    }

    let slide_pos = old + slide;
    if blockers.collides(slide_pos, radius) {
        log::trace!("slide to {:?} blocked as well", slide_pos);
        return Resolution::block(old);
    }
    Resolution::slide(slide_pos)
}

/// Resolve a move against the walls and door frames of the dungeon
pub fn resolve_collision(hexagons: &[Hexagon], old: Vec2, proposed: Vec2, radius: f32) -> Resolution {
    resolve_movement(hexagons, old, proposed, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{HexType, DOOR_FLANK_RATIO, DOOR_FRAME_THICKNESS, HEX_APOTHEM};

    const EPS: f32 = 0.001;
    const RADIUS: f32 = 3.0;

    fn lone_room() -> Vec<Hexagon> {
        vec![Hexagon::new(0, 0, 0, HexType::Room)]
    }

    #[test]
    fn test_free_movement_is_accepted() {
        let hexes = lone_room();
        let res = resolve_collision(&hexes, Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), RADIUS);
        assert_eq!(res, Resolution::free(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_head_on_wall_approach_is_blocked() {
        let hexes = lone_room();
        let old = Vec2::new(0.0, HEX_APOTHEM - 5.0);
        let proposed = Vec2::new(0.0, HEX_APOTHEM - 2.0);
        let res = resolve_collision(&hexes, old, proposed, RADIUS);
        assert!(res.blocked);
        assert_eq!(res.position, old);
    }

    #[test]
    fn test_diagonal_approach_slides_along_wall() {
        let hexes = lone_room();
        let old = Vec2::new(0.0, HEX_APOTHEM - 5.0);
        let proposed = Vec2::new(2.0, HEX_APOTHEM - 2.0);
        let res = resolve_collision(&hexes, old, proposed, RADIUS);
        assert!(res.slid && !res.blocked);
        assert!((res.position - Vec2::new(2.0, old.z)).len() < EPS);
    }

    #[test]
    fn test_solid_wall_blocks_within_radius_only() {
        let hexes = lone_room();
        // North wall runs along z = apothem for x in [-25, 25]
        assert!(hexes[..].collides(Vec2::new(10.0, HEX_APOTHEM - 2.9), RADIUS));
        assert!(!hexes[..].collides(Vec2::new(10.0, HEX_APOTHEM - 3.1), RADIUS));
        // Past the end of the segment the distance is to the endpoint
        assert!(hexes[..].collides(Vec2::new(25.0, HEX_APOTHEM + 2.0), RADIUS));
    }

    #[test]
    fn test_doorway_center_is_passable() {
        let hexes = vec![Hexagon::new(0, 0, Direction::North.bit(), HexType::Corridor)];
        let (a, b) = hexes[0].edge(Direction::North);
        let mid = a.lerp(b, 0.5);

        // Gap between frame caps is wide enough for the player
        let half_gap = (b - a).len() * (0.5 - DOOR_FLANK_RATIO) - DOOR_FRAME_THICKNESS;
        assert!(half_gap > RADIUS);

        for z_off in [-2.0, 0.0, 2.0] {
            let p = mid + Vec2::new(0.0, z_off);
            assert!(!hexes[..].collides(p, RADIUS), "blocked at {:?}", p);
        }

        // Walking straight through the doorway
        let res = resolve_collision(&hexes, mid - Vec2::new(0.0, 4.0), mid + Vec2::new(0.0, 4.0), RADIUS);
        assert!(!res.blocked && !res.slid);
    }

    #[test]
    fn test_doorway_frames_block() {
        let hexes = vec![Hexagon::new(0, 0, Direction::North.bit(), HexType::Corridor)];
        let geo = EdgeGeometry::of(&hexes[0], Direction::North);
        let frame = geo.frames()[0];
        // Just past the frame's inner end, inside the gap
        let beyond = frame.b + (frame.b - frame.a).normalize() * 2.0;
        assert!(hexes[..].collides(beyond, RADIUS));
    }

    #[test]
    fn test_open_room_edge_does_not_block() {
        let hexes = vec![Hexagon::new(0, 0, Direction::North.bit(), HexType::Room)];
        let mid = hexes[0].edge_midpoint(Direction::North);
        assert!(!hexes[..].collides(mid, RADIUS));
    }

    #[test]
    fn test_slide_into_second_wall_is_blocked() {
        let walls = [
            Segment::new(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)),
            Segment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0)),
        ];
        let old = Vec2::new(4.0, 5.0);
        // Nearest violation is the horizontal wall; sliding along it hits the vertical one
        let res = resolve_movement(&walls[..], old, Vec2::new(2.5, 2.0), RADIUS);
        assert!(res.blocked);
        assert_eq!(res.position, old);
    }

    #[test]
    fn test_degenerate_segment_blocks() {
        let p = Vec2::new(1.0, 1.0);
        let walls = [Segment::new(p, p)];
        let old = Vec2::new(10.0, 1.0);
        let res = resolve_movement(&walls[..], old, Vec2::new(2.0, 1.0), RADIUS);
        assert!(res.blocked);
        assert_eq!(res.position, old);
    }

    #[test]
    fn test_closest_violation_wins() {
        let walls = [
            Segment::new(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)),
            Segment::new(Vec2::new(-10.0, 3.0), Vec2::new(10.0, 3.0)),
        ];
        let hit = walls[..].closest_violation(Vec2::new(0.0, 1.0), RADIUS).expect("hit");
        assert_eq!(hit.segment, walls[0]);
        assert!((hit.distance - 1.0).abs() < EPS);
    }
}
