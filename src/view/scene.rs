//! Frame rendering
//!
//! Draw order is occlusion: floors, then ceilings, then wall segments with
//! their door frames and corner posts, each pass far-to-near. Every list is
//! fully sorted before the first triangle of that pass is submitted.

use std::collections::HashMap;
use crate::config::RenderSettings;
use crate::rasterizer::{Palette, Rasterizer, ScreenPos, Vec2, Vec3};
use crate::world::{EdgeGeometry, Hexagon, Segment, CEILING_HEIGHT, FLOOR_HEIGHT};
use super::camera::Camera;
use super::depth::{collect_hexagons, collect_wall_segments, HexDepth, WallSegment};
use super::visibility::Lod;

/// Half the width of a corner post
pub const PILLAR_HALF_SIZE: f32 = 1.0;

/// Corners closer than 1 / CORNER_SNAP are one post
const CORNER_SNAP: f32 = 100.0;

type CornerKey = (i32, i32);

fn corner_key(p: Vec2) -> CornerKey {
    ((p.x * CORNER_SNAP).round() as i32, (p.z * CORNER_SNAP).round() as i32)
}

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub hexagons_visible: usize,
    pub walls_drawn: usize,
    pub walls_dropped: usize,
    pub pillars_drawn: usize,
    pub triangles_drawn: usize,
    /// Triangles dropped because a vertex was behind the camera
    pub triangles_skipped: usize,
}

/// Issue every draw call for one frame
pub fn render_frame<R: Rasterizer>(
    rast: &mut R,
    hexagons: &[Hexagon],
    camera: &Camera,
    settings: &RenderSettings,
    palette: &Palette,
) -> FrameStats {
    let visible = collect_hexagons(hexagons, camera, settings);
    let walls = collect_wall_segments(hexagons, &visible, camera, settings);

    // Each corner gets one post, drawn with the nearest wall that touches it
    let mut post_owner = HashMap::new();
    if settings.draw_pillars {
        for (i, segment) in walls.segments.iter().enumerate() {
            let (a, b) = segment.hex.edge(segment.direction);
            post_owner.insert(corner_key(a), i);
            post_owner.insert(corner_key(b), i);
        }
    }

    let mut painter = Painter {
        rast,
        camera,
        settings,
        palette,
        post_owner,
        stats: FrameStats {
            hexagons_visible: visible.len(),
            walls_drawn: walls.segments.len(),
            walls_dropped: walls.dropped,
            ..Default::default()
        },
    };

    painter.rast.set_color(palette.floor());
    for item in &visible {
        painter.floor(&hexagons[item.index], item, FLOOR_HEIGHT, false);
    }

    painter.rast.set_color(palette.ceiling());
    for item in &visible {
        painter.floor(&hexagons[item.index], item, CEILING_HEIGHT, true);
    }

    for (i, segment) in walls.segments.iter().enumerate() {
        painter.wall_segment(i, segment);
    }

    painter.stats
}

struct Painter<'a, R: Rasterizer> {
    rast: &'a mut R,
    camera: &'a Camera,
    settings: &'a RenderSettings,
    palette: &'a Palette,
    /// Corner -> index of the wall segment that draws its post
    post_owner: HashMap<CornerKey, usize>,
    stats: FrameStats,
}

impl<R: Rasterizer> Painter<'_, R> {
    fn triangle(&mut self, a: ScreenPos, b: ScreenPos, c: ScreenPos) {
        self.rast.triangle(a, b, c);
        self.stats.triangles_drawn += 1;
    }

    /// Floor or ceiling polygon. Uses the always-valid projection so the
    /// ground never has holes, even under the camera.
    fn floor(&mut self, hex: &Hexagon, item: &HexDepth, height: f32, ceiling: bool) {
        let screen = hex
            .vertices
            .map(|v| self.camera.project_always_valid(Vec3::at_height(v, height)));

        for &[a, b, c] in Lod::select(item.distance_sq, self.settings).floor_triangles() {
            if ceiling {
                // Reversed winding so the face points down
                self.triangle(screen[a], screen[c], screen[b]);
            } else {
                self.triangle(screen[a], screen[b], screen[c]);
            }
        }
    }

    /// Vertical quad from floor to ceiling over a ground segment.
    /// Dropped whole if any corner is behind the camera.
    fn upright(&mut self, seg: &Segment) {
        let project = |p: Vec2, y: f32| self.camera.project(Vec3::at_height(p, y));
        let corners = (
            project(seg.a, FLOOR_HEIGHT),
            project(seg.b, FLOOR_HEIGHT),
            project(seg.a, CEILING_HEIGHT),
            project(seg.b, CEILING_HEIGHT),
        );

        match corners {
            (Some(b0), Some(b1), Some(t0), Some(t1)) => {
                self.triangle(b0, b1, t0);
                self.triangle(b1, t1, t0);
            }
            _ => self.stats.triangles_skipped += 2,
        }
    }

    fn wall_segment(&mut self, index: usize, segment: &WallSegment) {
        let geometry = EdgeGeometry::of(segment.hex, segment.direction);

        self.rast.set_color(self.palette.wall());
        for wall in geometry.walls() {
            self.upright(wall);
        }

        let frame_limit = self.settings.doorframe_distance;
        if !geometry.frames().is_empty() && segment.distance_sq <= frame_limit * frame_limit {
            self.rast.set_color(self.palette.door_frame());
            for frame in geometry.frames() {
                self.upright(frame);
            }
        }

        let (a, b) = segment.hex.edge(segment.direction);
        let posts: Vec<Vec2> = [a, b]
            .into_iter()
            .filter(|&p| self.post_owner.get(&corner_key(p)) == Some(&index))
            .collect();
        if !posts.is_empty() {
            self.rast.set_color(self.palette.pillar());
            for p in posts {
                self.pillar(p);
            }
        }
    }

    /// Square post around a hexagon corner. Only faces turned toward the
    /// camera are drawn, which is enough for a convex box.
    fn pillar(&mut self, at: Vec2) {
        self.stats.pillars_drawn += 1;
        let s = PILLAR_HALF_SIZE;
        let corners = [
            at + Vec2::new(-s, -s),
            at + Vec2::new(s, -s),
            at + Vec2::new(s, s),
            at + Vec2::new(-s, s),
        ];
        let eye = self.camera.ground_position();

        for i in 0..4 {
            let face = Segment::new(corners[i], corners[(i + 1) % 4]);
            // Corners run counter-clockwise, so outward is the clockwise perpendicular
            let outward = -face.vector().perp();
            if outward.dot(eye - face.midpoint()) > 0.0 {
                self.upright(&face);
            }
        }
    }
}
