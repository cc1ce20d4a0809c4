use serde::{Deserialize, Serialize};

use crate::projection::Projection;

/// Camera tuning. Every field has a default so partial JSON files load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Units per second for flight movement.
    pub movement_speed: f32,
    /// Radians per pixel of pointer motion.
    pub mouse_speed: f32,
    /// Zoom change per wheel notch.
    pub zoom_speed: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Zoom restored by a right click in look-around mode.
    pub default_zoom: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Prefer the target over the direction when building the view.
    pub use_target: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: 15.0,
            mouse_speed: 0.008,
            zoom_speed: 1.0,
            zoom_min: 0.01,
            zoom_max: f32::MAX,
            default_zoom: 1.0,
            fov_degrees: 60.0,
            near: 0.1,
            far: 500.0,
            use_target: false,
        }
    }
}

impl CameraSettings {
    pub fn projection(&self) -> Projection {
        Projection::from_degrees(self.fov_degrees, self.near, self.far)
    }

    /// Clamp a zoom value into the configured range. Inverted bounds favor
    /// `zoom_max`.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.max(self.zoom_min).min(self.zoom_max)
    }
}
