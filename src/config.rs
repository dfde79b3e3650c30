//! Tunable render settings
//!
//! Every distance threshold, clip bound and camera constant lives here so
//! it can be tuned from a RON file without touching the renderer. Fields
//! missing from the file keep their defaults.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};

/// Error type for settings loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Renderer and camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Hexagons farther than this (center distance) are not drawn
    pub max_render_distance: f32,
    /// Hexagons closer than this always pass the frustum test
    pub frustum_near_radius: f32,
    /// Minimum cosine between view direction and hexagon direction
    pub frustum_min_cos: f32,
    /// Full-detail floors up to this distance
    pub lod_high_distance: f32,
    /// Medium-detail floors up to this distance, low beyond
    pub lod_medium_distance: f32,
    /// Door frames farther than this are skipped
    pub doorframe_distance: f32,
    /// Upper bound on wall segments sorted per frame
    pub max_wall_segments: usize,
    /// Off-screen clamp margin for wall/pillar projection (reference pixels)
    pub clip_margin: f32,
    /// Off-screen clamp margin for floor/ceiling projection
    pub floor_clip_margin: f32,
    /// Depth substituted for points behind the camera on floors/ceilings
    pub near_substitute: f32,
    /// Camera height above the floor
    pub eye_height: f32,
    /// Focal length in reference pixels (277 = ~60 degree FOV)
    pub focal_length: f32,
    /// Draw posts at wall corners
    pub draw_pillars: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_render_distance: 400.0,
            frustum_near_radius: 50.0,
            frustum_min_cos: -0.7,
            lod_high_distance: 100.0,
            lod_medium_distance: 200.0,
            doorframe_distance: 200.0,
            max_wall_segments: 256,
            clip_margin: 500.0,
            floor_clip_margin: 500.0,
            near_substitute: 0.5,
            eye_height: 10.0,
            focal_length: 277.0,
            draw_pillars: true,
        }
    }
}

impl RenderSettings {
    pub fn max_render_distance_sq(&self) -> f32 {
        self.max_render_distance * self.max_render_distance
    }
}

/// Load settings from a RON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<RenderSettings, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_settings_from_str(&contents)
}

/// Load settings from a RON string
pub fn load_settings_from_str(s: &str) -> Result<RenderSettings, ConfigError> {
    Ok(ron::from_str(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = load_settings_from_str("(max_wall_segments: 32, draw_pillars: false)").expect("valid settings");
        assert_eq!(settings.max_wall_segments, 32);
        assert!(!settings.draw_pillars);
        assert_eq!(settings.focal_length, 277.0);
        assert_eq!(settings.max_render_distance_sq(), 160_000.0);
    }

    #[test]
    fn test_bundled_settings_are_the_defaults() {
        let settings = load_settings_from_str(include_str!("../assets/render.ron")).expect("valid settings");
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(load_settings_from_str("(max_wall_segments: )"), Err(ConfigError::ParseError(_))));
        assert!(matches!(load_settings("/nonexistent/hexcrawl.ron"), Err(ConfigError::IoError(_))));
    }
}
