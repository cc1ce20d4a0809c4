//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers only read camera, mesh and scene state.
//! - Draw commands are only built from finalized meshes.
//!
//! The GPU backend lives outside this workspace; [`DebugTextRenderer`]
//! implements the same [`Renderer`] trait for headless runs and tests.

mod draw;
mod renderer;
mod timer;

pub use draw::{DrawCommand, DrawList};
pub use renderer::{DebugTextRenderer, Frame, RenderView, Renderer};
pub use timer::FrameTimer;
