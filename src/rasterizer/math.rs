//! Vector math for the hexagon renderer and collision

use std::ops::{Add, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

/// 3D Vector (world space, +Y is up)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Lift a ground-plane point to the given height
    pub fn at_height(p: Vec2, y: f32) -> Self {
        Self { x: p.x, y, z: p.z }
    }

    /// Drop the height component
    pub fn ground(self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// 2D Vector on the ground plane (world X and Z)
///
/// Hexagon centers, vertices, wall segments and player positions all live
/// here; height only matters once geometry is handed to the projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub z: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, z: 0.0 };

    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.z * other.z
    }

    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn len(self) -> f32 {
        self.len_sq().sqrt()
    }

    pub fn distance_sq(self, other: Vec2) -> f32 {
        (other - self).len_sq()
    }

    pub fn normalize(self) -> Vec2 {
        let l = self.len();
        if l == 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(self.x / l, self.z / l)
    }

    /// Linear interpolation, `t = 0` is `self`
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        self + (other - self) * t
    }

    /// Rotate 90 degrees counter-clockwise (seen from above)
    pub fn perp(self) -> Vec2 {
        Vec2::new(-self.z, self.x)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.z + other.z)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.z - other.z)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.z * s)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.z)
    }
}

/// A projected point in screen space (pixels of the reference frame)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
}

impl ScreenPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Calculate barycentric coordinates for point (px, py) in triangle (a, b, c)
/// Returns None for degenerate triangles. Winding order does not matter.
pub fn barycentric(px: f32, py: f32, a: ScreenPos, b: ScreenPos, c: ScreenPos) -> Option<(f32, f32, f32)> {
    let d = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);

    if d.abs() < 0.0001 {
        return None;
    }

    let u = ((b.y - c.y) * (px - c.x) + (c.x - b.x) * (py - c.y)) / d;
    let v = ((c.y - a.y) * (px - c.x) + (a.x - c.x) * (py - c.y)) / d;
    let w = 1.0 - u - v;

    Some((u, v, w))
}

/// Shortest distance from `p` to the segment `a..b`, clamped to its endpoints
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.len_sq();
    if len_sq < 1e-12 {
        return (p - a).len();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).len()
}
