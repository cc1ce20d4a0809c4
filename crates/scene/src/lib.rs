//! The cube-grid demo scene.
//!
//! # Invariants
//! - Cell statuses depend only on the configured seed.
//! - Animation state advances only through explicit elapsed-time steps.

pub mod animation;
pub mod grid;

pub use animation::{RotationAnimation, TranslationAnimation};
pub use grid::{Cell, CubeGrid, CubeStatus, GridConfig, Instance, SceneError};
