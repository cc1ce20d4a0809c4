//! Camera: pose, projection and mouse-driven interaction modes.
//!
//! A [`CameraController`] owns a [`Pose`], turns [`FrameInput`] samples into
//! pose updates according to its [`InteractionMode`], and exposes the view and
//! projection matrices consumed by the renderer.
//!
//! # Invariants
//! - `direction` and `up` are unit vectors after every update.
//! - The view and projection matrices only ever hold finite values: a
//!   degenerate update is dropped and the previous matrix is kept.
//! - Camera motion never fails; there is no error type in this crate.
//!
//! [`FrameInput`]: savagecube_input::FrameInput

mod controller;
mod pose;
mod projection;
mod settings;
mod trajectory;

pub use controller::{
    CameraController, InteractionMode, extract_look_at, free_flight, look_around,
    trajectory_flight,
};
pub use pose::Pose;
pub use projection::{Projection, Viewport};
pub use settings::CameraSettings;
pub use trajectory::{MaxKey, Trajectory, TrajectorySample, TrajectorySampler};
