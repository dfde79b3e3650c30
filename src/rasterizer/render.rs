//! Flat-shaded triangle rasterization
//!
//! No depth buffer and no textures: whatever is submitted last wins, so
//! callers are responsible for far-to-near ordering.

use super::math::{barycentric, ScreenPos};
use super::types::Color;
use super::{REF_HEIGHT, REF_WIDTH};

/// The drawing primitive the renderer talks to.
///
/// Triangles are given in the 320x240 reference frame and are drawn with
/// whatever color was set last.
pub trait Rasterizer {
    fn set_color(&mut self, color: Color);
    fn triangle(&mut self, a: ScreenPos, b: ScreenPos, c: ScreenPos);
}

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
    color: Color,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
            color: Color::WHITE,
        }
    }

    /// Reallocate for a new size (resolution switch)
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            *self = Self::new(width, height);
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let p = &self.pixels[idx..idx + 4];
            Some(Color { r: p[0], g: p[1], b: p[2], a: p[3] })
        } else {
            None
        }
    }

    /// Scale from the reference frame to this framebuffer's pixels
    fn to_pixels(&self, p: ScreenPos) -> ScreenPos {
        ScreenPos::new(
            p.x * self.width as f32 / REF_WIDTH as f32,
            p.y * self.height as f32 / REF_HEIGHT as f32,
        )
    }

    /// Fill a triangle given in pixel coordinates
    fn fill_triangle(&mut self, v1: ScreenPos, v2: ScreenPos, v3: ScreenPos, color: Color) {
        // Bounding box, clipped to the framebuffer
        let min_x = v1.x.min(v2.x).min(v3.x).max(0.0) as usize;
        let max_x = (v1.x.max(v2.x).max(v3.x) + 1.0).clamp(0.0, self.width as f32) as usize;
        let min_y = v1.y.min(v2.y).min(v3.y).max(0.0) as usize;
        let max_y = (v1.y.max(v2.y).max(v3.y) + 1.0).clamp(0.0, self.height as f32) as usize;

        const ERR: f32 = -0.0001;
        for y in min_y..max_y {
            for x in min_x..max_x {
                // Sample at pixel centers
                let Some((u, v, w)) = barycentric(x as f32 + 0.5, y as f32 + 0.5, v1, v2, v3) else {
                    return;
                };
                if u >= ERR && v >= ERR && w >= ERR {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }
}

impl Rasterizer for Framebuffer {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn triangle(&mut self, a: ScreenPos, b: ScreenPos, c: ScreenPos) {
        let (a, b, c) = (self.to_pixels(a), self.to_pixels(b), self.to_pixels(c));
        self.fill_triangle(a, b, c, self.color);
    }
}

/// One recorded triangle with the color it was drawn in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnTriangle {
    pub color: Color,
    pub vertices: [ScreenPos; 3],
}

/// Rasterizer that records draw calls instead of filling pixels
#[derive(Debug, Default)]
pub struct DrawRecorder {
    pub triangles: Vec<DrawnTriangle>,
    color: Color,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors in submission order, with consecutive repeats collapsed
    pub fn color_runs(&self) -> Vec<Color> {
        let mut runs: Vec<Color> = Vec::new();
        for t in &self.triangles {
            if runs.last() != Some(&t.color) {
                runs.push(t.color);
            }
        }
        runs
    }
}

impl Rasterizer for DrawRecorder {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn triangle(&mut self, a: ScreenPos, b: ScreenPos, c: ScreenPos) {
        self.triangles.push(DrawnTriangle {
            color: self.color,
            vertices: [a, b, c],
        });
    }
}
