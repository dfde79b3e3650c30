//! Depth ordering (painter's algorithm)
//!
//! Floors and ceilings are ordered per hexagon, walls per edge segment since
//! walls of neighbouring hexagons interleave in depth. Everything is sorted
//! far-to-near by squared distance; ties fall back to collection order
//! (hexagon index, then direction) so the result is deterministic.

use std::cmp::Ordering;
use crate::config::RenderSettings;
use crate::world::{Direction, EdgeState, Hexagon};
use super::camera::Camera;
use super::visibility::should_render;

/// A visible hexagon and its squared distance from the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexDepth {
    pub index: usize,
    pub distance_sq: f32,
}

/// One non-open edge queued for drawing this frame
#[derive(Debug, Clone, Copy)]
pub struct WallSegment<'a> {
    pub hex: &'a Hexagon,
    /// Index of `hex` in the collection, for tie-breaking
    pub hex_index: usize,
    pub direction: Direction,
    pub distance_sq: f32,
}

impl WallSegment<'_> {
    fn key(&self) -> (usize, usize) {
        (self.hex_index, self.direction.index())
    }
}

/// Wall segments for one frame, already sorted far-to-near
#[derive(Debug, Default)]
pub struct WallList<'a> {
    pub segments: Vec<WallSegment<'a>>,
    /// Segments dropped because the cap was reached
    pub dropped: usize,
}

fn far_to_near<K: Ord>(a: (f32, K), b: (f32, K)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1))
}

/// Exact reverse of `far_to_near`, so the nearest `n` under this order are
/// the last `n` of the draw order
fn near_to_far<K: Ord>(a: (f32, K), b: (f32, K)) -> Ordering {
    far_to_near(b, a)
}

/// Sort hexagons far-to-near, ties by index
pub fn sort_hexagons(items: &mut [HexDepth]) {
    items.sort_by(|a, b| far_to_near((a.distance_sq, a.index), (b.distance_sq, b.index)));
}

/// Visible hexagons in draw order
pub fn collect_hexagons(hexagons: &[Hexagon], camera: &Camera, settings: &RenderSettings) -> Vec<HexDepth> {
    let eye = camera.ground_position();
    let mut visible: Vec<HexDepth> = hexagons
        .iter()
        .enumerate()
        .filter(|(_, hex)| should_render(hex, camera, settings))
        .map(|(index, hex)| HexDepth { index, distance_sq: eye.distance_sq(hex.center) })
        .collect();
    sort_hexagons(&mut visible);
    visible
}

/// Sort wall segments far-to-near, keeping only the `cap` nearest.
/// Returns how many were dropped.
pub fn sort_wall_segments(segments: &mut Vec<WallSegment<'_>>, cap: usize) -> usize {
    let mut dropped = 0;
    if segments.len() > cap {
        dropped = segments.len() - cap;
        if cap > 0 {
            segments.select_nth_unstable_by(cap, |a, b| {
                near_to_far((a.distance_sq, a.key()), (b.distance_sq, b.key()))
            });
        }
        segments.truncate(cap);
    }
    segments.sort_by(|a, b| far_to_near((a.distance_sq, a.key()), (b.distance_sq, b.key())));
    dropped
}

/// Gather every non-open edge of the visible hexagons, cull by distance
/// to the edge midpoint and sort.
pub fn collect_wall_segments<'a>(
    hexagons: &'a [Hexagon],
    visible: &[HexDepth],
    camera: &Camera,
    settings: &RenderSettings,
) -> WallList<'a> {
    let eye = camera.ground_position();
    let max_sq = settings.max_render_distance_sq();

    // Collect in hexagon order so tie-breaks don't depend on the hex sort
    let mut indices: Vec<usize> = visible.iter().map(|h| h.index).collect();
    indices.sort_unstable();

    let mut segments = Vec::new();
    for index in indices {
        let hex = &hexagons[index];
        for direction in Direction::ALL {
            if hex.edge_state(direction) == EdgeState::Open {
                continue;
            }
            let distance_sq = eye.distance_sq(hex.edge_midpoint(direction));
            if distance_sq > max_sq {
                continue;
            }
            segments.push(WallSegment { hex, hex_index: index, direction, distance_sq });
        }
    }

    let dropped = sort_wall_segments(&mut segments, settings.max_wall_segments);
    if dropped > 0 {
        log::debug!("wall segment cap {} reached, dropped {}", settings.max_wall_segments, dropped);
    }
    WallList { segments, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec3;
    use crate::world::{demo_map, HexType};

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 10.0, 0.0), 0.0, 277.0)
    }

    #[test]
    fn test_hex_sort_is_far_to_near_with_index_ties() {
        let mut items = vec![
            HexDepth { index: 3, distance_sq: 10.0 },
            HexDepth { index: 1, distance_sq: 50.0 },
            HexDepth { index: 2, distance_sq: 10.0 },
            HexDepth { index: 0, distance_sq: 10.0 },
        ];
        let mut again = items.clone();
        again.reverse();

        sort_hexagons(&mut items);
        sort_hexagons(&mut again);

        let order: Vec<usize> = items.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![1, 0, 2, 3]);
        assert_eq!(items, again);
    }

    #[test]
    fn test_collected_hexagons_are_sorted() {
        let hexes = demo_map().to_hexagons();
        let visible = collect_hexagons(&hexes, &camera(), &RenderSettings::default());
        assert!(!visible.is_empty());
        for pair in visible.windows(2) {
            assert!(pair[0].distance_sq >= pair[1].distance_sq);
        }
        // The hexagon under the camera is drawn last
        assert_eq!(visible.last().map(|h| h.index), Some(0));
    }

    #[test]
    fn test_wall_segments_skip_open_edges() {
        // A lone room with all connections set has no walls at all
        let hexes = vec![Hexagon::new(0, 0, 0x3F, HexType::Room)];
        let settings = RenderSettings::default();
        let visible = collect_hexagons(&hexes, &camera(), &settings);
        assert!(collect_wall_segments(&hexes, &visible, &camera(), &settings).segments.is_empty());

        let hexes = vec![Hexagon::new(0, 0, 0x3F, HexType::Corridor)];
        let visible = collect_hexagons(&hexes, &camera(), &settings);
        assert_eq!(collect_wall_segments(&hexes, &visible, &camera(), &settings).segments.len(), 6);
    }

    #[test]
    fn test_far_edges_of_a_visible_hexagon_are_culled() {
        // Center at 390 is in range; the three far edge midpoints are past 400
        let cam = Camera::new(Vec3::new(0.0, 10.0, -390.0), 0.0, 277.0);
        let hexes = vec![Hexagon::new(0, 0, 0, HexType::Room)];
        let settings = RenderSettings::default();

        let visible = collect_hexagons(&hexes, &cam, &settings);
        assert_eq!(visible.len(), 1);

        let walls = collect_wall_segments(&hexes, &visible, &cam, &settings);
        let mut dirs: Vec<Direction> = walls.segments.iter().map(|s| s.direction).collect();
        dirs.sort_by_key(|d| d.index());
        assert_eq!(dirs, vec![Direction::Southeast, Direction::Southwest, Direction::South]);
        assert_eq!(walls.dropped, 0);
    }

    #[test]
    fn test_wall_segments_are_sorted_and_deterministic() {
        let hexes = demo_map().to_hexagons();
        let settings = RenderSettings::default();
        let visible = collect_hexagons(&hexes, &camera(), &settings);

        let first = collect_wall_segments(&hexes, &visible, &camera(), &settings);
        let second = collect_wall_segments(&hexes, &visible, &camera(), &settings);

        assert!(first.segments.len() > 6);
        for pair in first.segments.windows(2) {
            assert!(pair[0].distance_sq >= pair[1].distance_sq);
        }
        fn keys(list: &WallList) -> Vec<(usize, usize)> {
            list.segments.iter().map(|s| s.key()).collect()
        }
        assert_eq!(keys(&first), keys(&second));
    }

    #[test]
    fn test_wall_cap_drops_the_farthest() {
        let hexes = demo_map().to_hexagons();
        let settings = RenderSettings::default();
        let visible = collect_hexagons(&hexes, &camera(), &settings);
        let full = collect_wall_segments(&hexes, &visible, &camera(), &settings);

        let capped_settings = RenderSettings { max_wall_segments: 5, ..Default::default() };
        let capped = collect_wall_segments(&hexes, &visible, &camera(), &capped_settings);

        assert_eq!(capped.segments.len(), 5);
        assert_eq!(capped.dropped, full.segments.len() - 5);
        // The survivors are exactly the five nearest, still far-to-near
        let nearest: Vec<_> = full.segments[full.segments.len() - 5..].iter().map(|s| s.key()).collect();
        let kept: Vec<_> = capped.segments.iter().map(|s| s.key()).collect();
        assert_eq!(kept, nearest);
    }

    #[test]
    fn test_zero_cap_drops_everything() {
        let hex = Hexagon::new(0, 0, 0, HexType::Room);
        let mut segs: Vec<WallSegment> = Direction::ALL
            .iter()
            .map(|&direction| WallSegment { hex: &hex, hex_index: 0, direction, distance_sq: 1.0 })
            .collect();
        assert_eq!(sort_wall_segments(&mut segs, 0), 6);
        assert!(segs.is_empty());
    }
}
