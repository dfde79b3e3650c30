//! Player state and movement
//!
//! Yaw is kept in whole degrees like the input layer produces it; the
//! camera gets radians.

use crate::collision::{resolve_collision, Resolution};
use crate::config::RenderSettings;
use crate::rasterizer::{Vec2, Vec3};
use crate::view::Camera;
use crate::world::Hexagon;

/// Collision radius of the player
pub const PLAYER_RADIUS: f32 = 3.0;

/// World units moved per frame while a move key is held
pub const MOVE_SPEED: f32 = 1.25;

/// Degrees turned per frame while a turn key is held
pub const TURN_SPEED: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Vec2,
    /// Always in [0, 360)
    pub yaw_degrees: i32,
    pub radius: f32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            yaw_degrees: 0,
            radius: PLAYER_RADIUS,
        }
    }

    /// Stand in the middle of the first hexagon, or at the origin for an
    /// empty map
    pub fn spawn(hexagons: &[Hexagon]) -> Self {
        Self::new(hexagons.first().map_or(Vec2::ZERO, |hex| hex.center))
    }

    pub fn turn(&mut self, degrees: i32) {
        self.yaw_degrees = (self.yaw_degrees + degrees).rem_euclid(360);
    }

    pub fn yaw_radians(&self) -> f32 {
        (self.yaw_degrees as f32).to_radians()
    }

    /// Unit facing on the ground plane, matching `Camera::forward`
    pub fn facing(&self) -> Vec2 {
        let yaw = self.yaw_radians();
        Vec2::new(-yaw.sin(), yaw.cos())
    }

    pub fn camera(&self, settings: &RenderSettings) -> Camera {
        Camera::from_settings(
            Vec3::at_height(self.position, settings.eye_height),
            self.yaw_radians(),
            settings,
        )
    }

    /// Move along the facing (negative `amount` walks backwards). The
    /// request goes through collision and only the resolved position is kept.
    pub fn move_forward(&mut self, amount: f32, hexagons: &[Hexagon]) -> Resolution {
        let proposed = self.position + self.facing() * amount;
        let res = resolve_collision(hexagons, self.position, proposed, self.radius);
        if res.blocked {
            log::trace!("move blocked at {:?}", self.position);
        }
        self.position = res.position;
        res
    }
}
