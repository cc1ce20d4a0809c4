//! Input: mouse buttons, pointer/wheel events and per-frame input snapshots.
//!
//! The camera consumes [`FrameInput`] values, never raw window events. Any
//! windowing backend only has to drive a [`Mouse`] to produce them.
//!
//! # Invariants
//! - Pointer motion is always reported as a delta from the previous position.
//! - Held buttons are a set; pressing a held button is idempotent.

pub mod mouse;

pub use mouse::{FrameInput, InputEvent, Mouse, MouseButton, MouseButtons};
