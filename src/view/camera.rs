//! Camera pose and perspective projection
//!
//! Camera space is world space translated to the eye and rotated by -yaw
//! about the vertical axis. At yaw 0 the camera looks down +Z.

use crate::config::RenderSettings;
use crate::rasterizer::{ScreenPos, Vec2, Vec3, REF_HEIGHT, REF_WIDTH};

/// Added to view depth so points right at the eye don't blow up
pub const DEPTH_BIAS: f32 = 10.0;

/// View depth at or below this is behind the camera
pub const MIN_DEPTH: f32 = 0.001;

const CENTER_X: f32 = REF_WIDTH as f32 / 2.0;
const CENTER_Y: f32 = REF_HEIGHT as f32 / 2.0;

/// Per-frame camera, rebuilt from the player every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Radians, positive turns the view toward -X
    pub yaw: f32,
    pub focal_length: f32,
    /// Off-screen clamp margin for `project`
    pub clip_margin: f32,
    /// Off-screen clamp margin for `project_always_valid`
    pub floor_clip_margin: f32,
    /// Depth used in place of anything behind the camera on floors
    pub near_substitute: f32,
}

impl Camera {
    pub fn new(position: Vec3, yaw: f32, focal_length: f32) -> Self {
        let defaults = RenderSettings::default();
        Self {
            position,
            yaw,
            focal_length,
            clip_margin: defaults.clip_margin,
            floor_clip_margin: defaults.floor_clip_margin,
            near_substitute: defaults.near_substitute,
        }
    }

    pub fn from_settings(position: Vec3, yaw: f32, settings: &RenderSettings) -> Self {
        Self {
            position,
            yaw,
            focal_length: settings.focal_length,
            clip_margin: settings.clip_margin,
            floor_clip_margin: settings.floor_clip_margin,
            near_substitute: settings.near_substitute,
        }
    }

    /// Unit view direction on the ground plane
    pub fn forward(&self) -> Vec2 {
        Vec2::new(-self.yaw.sin(), self.yaw.cos())
    }

    pub fn ground_position(&self) -> Vec2 {
        self.position.ground()
    }

    /// Rotate into camera space; returns (view_x, rel_y, view_z) with the
    /// depth bias already applied
    fn to_view(&self, point: Vec3) -> (f32, f32, f32) {
        let rel = point - self.position;
        let (sin, cos) = (-self.yaw).sin_cos();
        let view_x = rel.x * cos - rel.z * sin;
        let view_z = rel.x * sin + rel.z * cos + DEPTH_BIAS;
        (view_x, rel.y, view_z)
    }

    fn perspective(&self, view_x: f32, rel_y: f32, view_z: f32, margin: f32) -> ScreenPos {
        let x = CENTER_X + view_x * self.focal_length / view_z;
        let y = CENTER_Y - rel_y * self.focal_length / view_z;
        ScreenPos::new(
            x.clamp(-margin, REF_WIDTH as f32 + margin),
            y.clamp(-margin, REF_HEIGHT as f32 + margin),
        )
    }

    /// Project a world point, None if it is behind the camera
    pub fn project(&self, point: Vec3) -> Option<ScreenPos> {
        let (view_x, rel_y, view_z) = self.to_view(point);
        if view_z <= MIN_DEPTH {
            return None;
        }
        Some(self.perspective(view_x, rel_y, view_z, self.clip_margin))
    }

    /// Project a world point, substituting a near depth for anything behind
    /// the camera. Floors and ceilings use this so they never drop out.
    pub fn project_always_valid(&self, point: Vec3) -> ScreenPos {
        let (view_x, rel_y, mut view_z) = self.to_view(point);
        if view_z <= MIN_DEPTH {
            view_z = self.near_substitute;
        }
        self.perspective(view_x, rel_y, view_z, self.floor_clip_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 0.001;

    #[test]
    fn test_point_ahead_at_eye_height_hits_center() {
        let cam = Camera::new(Vec3::ZERO, 0.0, 277.0);
        let p = cam.project(Vec3::new(0.0, 0.0, 50.0)).expect("in front");
        assert!((p.x - 160.0).abs() < EPS);
        assert!((p.y - 120.0).abs() < EPS);
    }

    #[test]
    fn test_floor_point_from_eye_height() {
        let cam = Camera::new(Vec3::new(0.0, 10.0, 0.0), 0.0, 277.0);
        let p = cam.project(Vec3::new(0.0, 0.0, 50.0)).expect("in front");
        // rel_y = -10, view_z = 50 + 10
        assert!((p.x - 160.0).abs() < EPS);
        assert!((p.y - (120.0 + 10.0 * 277.0 / 60.0)).abs() < EPS);
    }

    #[test]
    fn test_point_behind_camera_is_invalid() {
        let cam = Camera::new(Vec3::ZERO, 0.0, 277.0);
        assert!(cam.project(Vec3::new(0.0, 0.0, -10.0)).is_none());
        assert!(cam.project(Vec3::new(0.0, 0.0, -50.0)).is_none());
        // Inside the depth bias still projects
        assert!(cam.project(Vec3::new(0.0, 0.0, -5.0)).is_some());
    }

    #[test]
    fn test_always_valid_substitutes_near_depth() {
        let cam = Camera::new(Vec3::new(0.0, 10.0, 0.0), 0.0, 277.0);
        let p = cam.project_always_valid(Vec3::new(0.1, 0.0, -50.0));
        // view_z replaced by 0.5: y = 120 + 10 * 277 / 0.5 clamps to the margin
        assert!((p.y - (240.0 + cam.floor_clip_margin)).abs() < EPS);
        assert!((p.x - (160.0 + 0.1 * 277.0 / 0.5)).abs() < EPS);
    }

    #[test]
    fn test_projection_is_clamped() {
        let mut cam = Camera::new(Vec3::ZERO, 0.0, 277.0);
        cam.clip_margin = 200.0;
        let p = cam.project(Vec3::new(-1000.0, 500.0, 1.0)).expect("in front");
        assert_eq!(p, ScreenPos::new(-200.0, -200.0));
    }

    #[test]
    fn test_yaw_rotates_view() {
        // Quarter turn: forward is -X, so a point at -X is dead ahead
        let cam = Camera::new(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 277.0);
        let f = cam.forward();
        assert!((f.x + 1.0).abs() < EPS && f.z.abs() < EPS);
        let p = cam.project(Vec3::new(-50.0, 0.0, 0.0)).expect("in front");
        assert!((p.x - 160.0).abs() < 0.01);
        assert!(cam.project(Vec3::new(50.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_settings_feed_the_camera() {
        let settings = RenderSettings { clip_margin: 42.0, focal_length: 100.0, ..Default::default() };
        let cam = Camera::from_settings(Vec3::ZERO, 0.0, &settings);
        assert_eq!(cam.clip_margin, 42.0);
        assert_eq!(cam.focal_length, 100.0);
    }

    proptest! {
        #[test]
        fn prop_farther_points_shrink_toward_center(
            lateral in 1.0f32..20.0,
            height in 1.0f32..20.0,
            near in 10.0f32..500.0,
            step in 1.0f32..500.0,
        ) {
            let cam = Camera::new(Vec3::ZERO, 0.0, 277.0);
            let a = cam.project(Vec3::new(lateral, height, near)).expect("in front");
            let b = cam.project(Vec3::new(lateral, height, near + step)).expect("in front");
            prop_assert!((b.x - 160.0).abs() < (a.x - 160.0).abs());
            prop_assert!((b.y - 120.0).abs() < (a.y - 120.0).abs());
        }
    }
}
