use glam::{Mat4, Quat, Vec3, Vec4};
use savagecube_common::{assign_if_finite, finite_angle};
use savagecube_input::{FrameInput, InputEvent, MouseButton};

use crate::pose::Pose;
use crate::projection::{Projection, Viewport};
use crate::settings::CameraSettings;
use crate::trajectory::Trajectory;

/// How pointer and wheel input drive the camera.
#[derive(Debug, Default)]
pub enum InteractionMode {
    /// Orbit around the target, wheel zooms.
    LookAround,
    /// Steer the direction and fly along it.
    #[default]
    FreeFlight,
    /// Walk a keyed trajectory with the wheel.
    TrajectoryFlight(Trajectory),
}

impl InteractionMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LookAround => "look-around",
            Self::FreeFlight => "free-flight",
            Self::TrajectoryFlight(_) => "trajectory-flight",
        }
    }
}

/// Recover `(position, direction, up)` from a camera-to-world matrix.
///
/// `direction` and `up` are the camera-space axes to carry through the
/// matrix, usually `-Z` and `+Y`.
pub fn extract_look_at(matrix: &Mat4, direction: Vec3, up: Vec3) -> (Vec3, Vec3, Vec3) {
    let position = matrix.w_axis.truncate();
    let carry = |v: Vec3| (*matrix * Vec4::from((v, 0.0))).truncate().normalize();
    (position, carry(direction), carry(up))
}

fn is_quiet(event: InputEvent) -> bool {
    matches!(event, InputEvent::Idle | InputEvent::ButtonUp(_))
}

/// Yaw then pitch `direction` in place, each axis guarded on its own.
fn steer(pose: &mut Pose, dx: f32, dy: f32, mouse_speed: f32) {
    let mut direction = pose.direction;
    if let Some(yaw) = finite_angle(dx * mouse_speed) {
        let right = pose.up.cross(direction).normalize();
        let local_up = right.cross(direction).normalize();
        let turned = Quat::from_axis_angle(local_up, yaw) * direction;
        assign_if_finite(&mut direction, turned);
    }
    if let Some(pitch) = finite_angle(dy * mouse_speed) {
        let right = pose.up.cross(direction).normalize();
        let turned = Quat::from_axis_angle(right, pitch) * direction;
        assign_if_finite(&mut direction, turned);
    }
    pose.set_direction(direction);
}

/// Orbit mode. Returns `true` when the view must be rebuilt.
pub fn look_around(
    pose: &mut Pose,
    orbit: &mut Mat4,
    settings: &CameraSettings,
    input: &FrameInput,
) -> bool {
    let left = input.held(MouseButton::Left);
    let right = input.held(MouseButton::Right);
    match input.event {
        event if is_quiet(event) => return false,
        InputEvent::Wheel(delta) => {
            let zoom = settings.clamp_zoom(pose.zoom + settings.zoom_speed * delta);
            assign_if_finite(&mut pose.zoom, zoom);
        }
        InputEvent::PointerMove { dx, dy } if left => {
            let mut rotation = Mat4::IDENTITY;
            if let Some(yaw) = finite_angle(dx * settings.mouse_speed) {
                rotation *= Mat4::from_rotation_y(yaw);
            }
            if let Some(pitch) = finite_angle(dy * settings.mouse_speed) {
                rotation *= Mat4::from_rotation_x(pitch);
            }
            assign_if_finite(orbit, rotation * *orbit);
        }
        // dragging without Left leaves the orbit alone
        InputEvent::PointerMove { .. } => {}
        _ if right && !left => {
            pose.zoom = settings.default_zoom;
            *orbit = Mat4::IDENTITY;
        }
        _ => {}
    }
    true
}

/// Free flight. Returns `true` when the view must be rebuilt.
pub fn free_flight(
    pose: &mut Pose,
    movement_speed: &mut f32,
    settings: &CameraSettings,
    input: &FrameInput,
) -> bool {
    let left = input.held(MouseButton::Left);
    let right = input.held(MouseButton::Right);
    match input.event {
        event if is_quiet(event) => return false,
        InputEvent::Wheel(delta) => *movement_speed += delta,
        InputEvent::PointerMove { dx, dy } if left || right => {
            steer(pose, dx, dy, settings.mouse_speed);
        }
        _ => {}
    }

    let distance = *movement_speed * input.elapsed;
    if left && right {
        pose.move_backward(distance);
    } else if left {
        pose.move_forward(distance);
    }
    true
}

/// Trajectory flight. Returns `true` when the view must be rebuilt.
///
/// The wheel walks the key; pointer rotation needs the left button. Left and
/// right together fly forward, right alone flies backward.
pub fn trajectory_flight(
    pose: &mut Pose,
    trajectory: &mut Trajectory,
    movement_speed: f32,
    settings: &CameraSettings,
    input: &FrameInput,
) -> bool {
    let left = input.held(MouseButton::Left);
    let right = input.held(MouseButton::Right);
    match input.event {
        event if is_quiet(event) => return false,
        InputEvent::Wheel(delta) => {
            trajectory.step(delta);
            apply_sample(pose, trajectory);
        }
        InputEvent::PointerMove { dx, dy } if left => {
            steer(pose, dx, dy, settings.mouse_speed);
        }
        _ => {}
    }

    let distance = movement_speed * input.elapsed;
    if left && right {
        pose.move_forward(distance);
    } else if right {
        pose.move_backward(distance);
    }
    true
}

fn apply_sample(pose: &mut Pose, trajectory: &mut Trajectory) {
    if let Some(sample) = trajectory.sample() {
        assign_if_finite(&mut pose.position, sample.position);
        pose.set_direction(sample.direction);
        pose.set_up(sample.up);
    }
}

/// Owns a [`Pose`] plus the view, projection and orbit matrices, and updates
/// them from per-frame input.
#[derive(Debug)]
pub struct CameraController {
    pose: Pose,
    settings: CameraSettings,
    movement_speed: f32,
    mode: InteractionMode,
    viewport: Viewport,
    projection_params: Projection,
    projection: Mat4,
    view: Mat4,
    transform: Mat4,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::from_settings(CameraSettings::default())
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: CameraSettings) -> Self {
        let pose = Pose {
            zoom: settings.clamp_zoom(settings.default_zoom),
            ..Pose::default()
        };
        let mut camera = Self {
            pose,
            movement_speed: settings.movement_speed,
            projection_params: settings.projection(),
            settings,
            mode: InteractionMode::default(),
            viewport: Viewport::default(),
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            transform: Mat4::IDENTITY,
        };
        camera.look_at();
        camera
    }

    pub fn with_mode(mut self, mode: InteractionMode) -> Self {
        self.set_mode(mode);
        self
    }

    /// Switch mode, returning the previous one.
    pub fn set_mode(&mut self, mode: InteractionMode) -> InteractionMode {
        tracing::debug!(from = self.mode.name(), to = mode.name(), "camera mode");
        std::mem::replace(&mut self.mode, mode)
    }

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    pub fn mode_mut(&mut self) -> &mut InteractionMode {
        &mut self.mode
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Direct pose access. Call [`CameraController::look_at`] afterwards.
    pub fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn set_movement_speed(&mut self, speed: f32) {
        assign_if_finite(&mut self.movement_speed, speed);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn projection_params(&self) -> &Projection {
        &self.projection_params
    }

    /// Apply one frame of input under the current mode.
    pub fn update(&mut self, input: &FrameInput) {
        tracing::trace!(mode = self.mode.name(), event = ?input.event, "camera update");
        let changed = match &mut self.mode {
            InteractionMode::LookAround => {
                look_around(&mut self.pose, &mut self.transform, &self.settings, input)
            }
            InteractionMode::FreeFlight => {
                free_flight(&mut self.pose, &mut self.movement_speed, &self.settings, input)
            }
            InteractionMode::TrajectoryFlight(trajectory) => trajectory_flight(
                &mut self.pose,
                trajectory,
                self.movement_speed,
                &self.settings,
                input,
            ),
        };
        if changed {
            self.look_at();
        }
    }

    /// Re-link target and direction, then rebuild the view from the zoomed eye.
    pub fn look_at(&mut self) -> bool {
        self.pose.sync_target(self.settings.use_target);
        let (eye, target, up) = (self.pose.eye(), self.pose.target, self.pose.up);
        self.look_at_from(eye, target, up)
    }

    /// Build the view matrix from explicit vectors. A singular configuration
    /// leaves the previous matrix in place and returns `false`.
    pub fn look_at_from(&mut self, eye: Vec3, target: Vec3, up: Vec3) -> bool {
        let accepted = assign_if_finite(&mut self.view, Mat4::look_at_rh(eye, target, up));
        if !accepted {
            tracing::trace!(?eye, ?target, "degenerate look-at ignored");
        }
        accepted
    }

    /// Aim at `point` and rebuild the view.
    pub fn look_at_target(&mut self, point: Vec3) -> bool {
        self.pose.look_at_target(point);
        self.look_at()
    }

    /// Re-sample the trajectory at its current key. No-op outside
    /// trajectory mode.
    pub fn refresh_trajectory(&mut self) -> bool {
        match &mut self.mode {
            InteractionMode::TrajectoryFlight(trajectory) => {
                apply_sample(&mut self.pose, trajectory);
                self.look_at()
            }
            _ => false,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.viewport.width = width;
        self.viewport.height = height;
        self.refresh_projection()
    }

    /// Resize and replace the projection parameters. `fov_degrees` is in degrees.
    pub fn resize_with(
        &mut self,
        width: u32,
        height: u32,
        fov_degrees: f32,
        near: f32,
        far: f32,
    ) -> bool {
        self.projection_params = Projection::from_degrees(fov_degrees, near, far);
        self.resize(width, height)
    }

    /// Recompute the projection from the stored viewport and parameters.
    pub fn refresh_projection(&mut self) -> bool {
        if !self.viewport.is_valid() {
            tracing::warn!(
                width = self.viewport.width,
                height = self.viewport.height,
                "projection skipped for empty viewport"
            );
            return false;
        }
        let matrix = self.projection_params.matrix(&self.viewport);
        assign_if_finite(&mut self.projection, matrix)
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Accumulated look-around orbit.
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn proj_view(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn proj_view_transform(&self) -> Mat4 {
        self.projection * self.view * self.transform
    }

    /// Fold the orbit into the pose so that `view()` alone reproduces
    /// `view() * transform()`, then reset the orbit.
    pub fn fuse_transform(&mut self) {
        if self.transform == Mat4::IDENTITY {
            return;
        }
        let inverse = self.transform.inverse();
        if !inverse.is_finite() {
            tracing::warn!("orbit transform is singular, not fused");
            return;
        }
        let pose = &mut self.pose;
        pose.position = inverse.transform_point3(pose.position);
        pose.target = inverse.transform_point3(pose.target);
        pose.set_direction(inverse.transform_vector3(pose.direction));
        pose.set_up(inverse.transform_vector3(pose.up));
        self.transform = Mat4::IDENTITY;
        self.look_at();
    }
}
