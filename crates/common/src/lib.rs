//! Shared types and numeric helpers used by every savagecube crate.
//!
//! # Invariants
//! - A [`Face`] always holds exactly three vertex indices.
//! - [`guard`] helpers never write a non-finite value.
//! - [`clamp_or_wrap`] always returns a value in `[min, max)`.

pub mod guard;
pub mod interval;
pub mod types;

pub use guard::{Finite, assign_if_finite, finite_angle};
pub use interval::clamp_or_wrap;
pub use types::{BoundingBox, Face};
