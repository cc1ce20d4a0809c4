//! Finite-value guards.
//!
//! Real-time camera code must never fail a frame because one input sample
//! produced a NaN or an infinity. Every such guard in the workspace goes
//! through these helpers so the skip-and-keep-previous policy stays uniform.

use glam::{Mat4, Vec3};

/// Values that can report whether every component is finite.
pub trait Finite {
    fn all_finite(&self) -> bool;
}

impl Finite for f32 {
    fn all_finite(&self) -> bool {
        self.is_finite()
    }
}

impl Finite for Vec3 {
    fn all_finite(&self) -> bool {
        self.is_finite()
    }
}

impl Finite for Mat4 {
    fn all_finite(&self) -> bool {
        self.is_finite()
    }
}

/// Write `value` into `slot` only if it is entirely finite.
///
/// Returns `true` when the assignment happened.
pub fn assign_if_finite<T: Finite>(slot: &mut T, value: T) -> bool {
    if value.all_finite() {
        *slot = value;
        true
    } else {
        tracing::trace!("rejected non-finite assignment");
        false
    }
}

/// `Some(angle)` if the angle is usable, `None` otherwise.
pub fn finite_angle(angle: f32) -> Option<f32> {
    angle.is_finite().then_some(angle)
}
