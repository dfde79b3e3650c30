//! Distance culling, frustum test and floor level-of-detail

use crate::config::RenderSettings;
use crate::rasterizer::Vec2;
use crate::world::Hexagon;
use super::camera::Camera;

/// Floor/ceiling detail level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lod {
    High,
    Medium,
    Low,
}

/// Full fan from vertex 0
const FAN_HIGH: [[usize; 3]; 4] = [[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]];
/// Coarser fan: the 2-3-4 ear is folded away
const FAN_MEDIUM: [[usize; 3]; 3] = [[0, 1, 2], [0, 2, 4], [0, 4, 5]];
/// Quad between opposite corners 0 and 3
const FAN_LOW: [[usize; 3]; 2] = [[0, 1, 3], [0, 3, 4]];

impl Lod {
    /// Pick a level from squared camera-to-center distance
    pub fn select(distance_sq: f32, settings: &RenderSettings) -> Self {
        let high = settings.lod_high_distance;
        let medium = settings.lod_medium_distance;
        if distance_sq < high * high {
            Lod::High
        } else if distance_sq < medium * medium {
            Lod::Medium
        } else {
            Lod::Low
        }
    }

    /// Vertex index triples for the floor, wound like the hexagon template.
    /// Ceilings reverse each triple.
    pub fn floor_triangles(self) -> &'static [[usize; 3]] {
        match self {
            Lod::High => &FAN_HIGH,
            Lod::Medium => &FAN_MEDIUM,
            Lod::Low => &FAN_LOW,
        }
    }
}

/// Wide frustum test on the ground plane.
///
/// Anything within the near radius passes so the hexagon under the player
/// is never culled; beyond it the direction to `target` only has to be
/// within ~135 degrees of the view direction.
pub fn in_frustum(target: Vec2, camera: &Camera, settings: &RenderSettings) -> bool {
    let to_target = target - camera.ground_position();
    let dist_sq = to_target.len_sq();
    if dist_sq <= settings.frustum_near_radius * settings.frustum_near_radius {
        return true;
    }
    let cos = to_target.dot(camera.forward()) / dist_sq.sqrt();
    cos > settings.frustum_min_cos
}

/// Distance cull plus frustum test for a whole hexagon
pub fn should_render(hex: &Hexagon, camera: &Camera, settings: &RenderSettings) -> bool {
    let dist_sq = camera.ground_position().distance_sq(hex.center);
    dist_sq <= settings.max_render_distance_sq() && in_frustum(hex.center, camera, settings)
}
