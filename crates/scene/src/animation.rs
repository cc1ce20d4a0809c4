use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Quarter turn about `axis` spread over `duration` seconds, continuing
/// past it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationAnimation {
    pub angle: f32,
    pub axis: Vec3,
    duration: f32,
    speed: f32,
}

impl RotationAnimation {
    pub fn new(duration: f32) -> Self {
        Self {
            angle: 0.0,
            axis: Vec3::X,
            duration,
            speed: std::f32::consts::FRAC_PI_2 / duration,
        }
    }

    /// Radians per second.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn advance(&mut self, elapsed: f32) -> Mat4 {
        self.angle += self.speed * elapsed;
        self.matrix()
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_axis_angle(self.axis, self.angle)
    }

    pub fn reset(&mut self) {
        *self = Self {
            axis: self.axis,
            ..Self::new(self.duration)
        };
    }
}

/// One unit along `direction` per `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TranslationAnimation {
    pub position: Vec3,
    pub direction: Vec3,
    duration: f32,
    speed: f32,
}

impl TranslationAnimation {
    pub fn new(duration: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::Z,
            duration,
            speed: 1.0 / duration,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn advance(&mut self, elapsed: f32) -> Mat4 {
        self.position += self.direction * (self.speed * elapsed);
        self.matrix()
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    pub fn reset(&mut self) {
        *self = Self {
            direction: self.direction,
            ..Self::new(self.duration)
        };
    }
}
