use glam::{IVec2, Mat4};
use serde::{Deserialize, Serialize};

/// Screen rectangle the camera renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Half-open hit test in screen coordinates.
    pub fn contains(&self, point: IVec2) -> bool {
        let inside = |v: i32, start: i32, len: u32| {
            let v = i64::from(v);
            let start = i64::from(start);
            v >= start && v < start + i64::from(len)
        };
        inside(point.x, self.x, self.width) && inside(point.y, self.y, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 60.0_f32.to_radians(),
            near: 0.1,
            far: 500.0,
        }
    }
}

impl Projection {
    pub fn from_degrees(fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_degrees.to_radians(),
            near,
            far,
        }
    }

    /// Right-handed perspective matrix for the given viewport.
    pub fn matrix(&self, viewport: &Viewport) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, viewport.aspect(), self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_queries() {
        let vp = Viewport {
            x: 10,
            y: 20,
            width: 100,
            height: 50,
        };
        assert!(vp.is_valid());
        assert!(vp.is_landscape());
        assert!(vp.contains(IVec2::new(10, 20)));
        assert!(vp.contains(IVec2::new(109, 69)));
        assert!(!vp.contains(IVec2::new(110, 30)));
        assert!(!vp.contains(IVec2::new(9, 30)));
        assert!(!Viewport::default().is_valid());
    }

    #[test]
    fn projection_is_finite() {
        let proj = Projection::default().matrix(&Viewport::new(1280, 720));
        assert!(proj.is_finite());
    }

    #[test]
    fn degrees_are_converted() {
        let p = Projection::from_degrees(90.0, 1.0, 10.0);
        assert!((p.fov_y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
