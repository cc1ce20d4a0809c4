use glam::Vec3;
use savagecube_common::assign_if_finite;
use serde::{Deserialize, Serialize};

/// Where the camera is and where it looks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    /// Unit view direction. Linked with `target`.
    pub direction: Vec3,
    /// Unit up vector.
    pub up: Vec3,
    pub target: Vec3,
    /// Eye distance factor relative to the target, always > 0.
    pub zoom: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            target: Vec3::ZERO,
            zoom: 1.0,
        }
    }
}

impl Pose {
    /// Pose at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut pose = Self {
            position,
            up: up.try_normalize().unwrap_or(Vec3::Y),
            ..Self::default()
        };
        pose.look_at_target(target);
        pose
    }

    /// `normalize(up × direction)`; points to the camera's left in a
    /// right-handed frame.
    pub fn right(&self) -> Vec3 {
        self.up.cross(self.direction).normalize()
    }

    /// Eye position after zooming along the target→position axis.
    pub fn eye(&self) -> Vec3 {
        if self.zoom != 1.0 {
            self.target + (self.position - self.target) * self.zoom
        } else {
            self.position
        }
    }

    /// Re-link target and direction. With `use_target` the direction follows
    /// the target, otherwise the target follows the direction.
    pub fn sync_target(&mut self, use_target: bool) {
        if use_target {
            assign_if_finite(&mut self.direction, (self.target - self.position).normalize());
        } else {
            self.target = self.position + self.direction;
        }
    }

    /// Aim at `target`. The direction is left untouched if `target` equals
    /// the position.
    pub fn look_at_target(&mut self, target: Vec3) {
        self.target = target;
        assign_if_finite(&mut self.direction, (target - self.position).normalize());
    }

    /// Set the direction, keeping the previous one if `direction` has no
    /// usable length.
    pub fn set_direction(&mut self, direction: Vec3) -> bool {
        assign_if_finite(&mut self.direction, direction.normalize())
    }

    pub fn set_up(&mut self, up: Vec3) -> bool {
        assign_if_finite(&mut self.up, up.normalize())
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.direction * distance;
    }

    pub fn move_backward(&mut self, distance: f32) {
        self.position -= self.direction * distance;
    }

    pub fn move_left(&mut self, distance: f32) {
        let right = self.right();
        if right.is_finite() {
            self.position += right * distance;
        }
    }

    pub fn move_right(&mut self, distance: f32) {
        let right = self.right();
        if right.is_finite() {
            self.position -= right * distance;
        }
    }
}
