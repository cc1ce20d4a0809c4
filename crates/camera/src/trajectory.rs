use std::fmt;

use glam::Vec3;
use savagecube_common::clamp_or_wrap;
use serde::{Deserialize, Serialize};

/// Camera placement returned by a trajectory sampler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub position: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
}

impl TrajectorySample {
    pub fn new(position: Vec3, direction: Vec3, up: Vec3) -> Self {
        Self {
            position,
            direction,
            up,
        }
    }
}

/// Maps a trajectory key to a camera placement. `None` keeps the current pose.
pub trait TrajectorySampler {
    fn sample(&self, key: i32) -> Option<TrajectorySample>;
}

impl<F> TrajectorySampler for F
where
    F: Fn(i32) -> Option<TrajectorySample>,
{
    fn sample(&self, key: i32) -> Option<TrajectorySample> {
        self(key)
    }
}

/// Exclusive upper bound of the key range.
pub enum MaxKey {
    Fixed(i32),
    /// Evaluated on every use, e.g. the length of a growing path.
    Dynamic(Box<dyn Fn() -> i32>),
}

impl MaxKey {
    pub fn get(&self) -> i32 {
        match self {
            Self::Fixed(max) => *max,
            Self::Dynamic(f) => f(),
        }
    }
}

impl Default for MaxKey {
    fn default() -> Self {
        Self::Fixed(i32::MAX)
    }
}

impl fmt::Debug for MaxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(max) => f.debug_tuple("Fixed").field(max).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// A keyed path the camera can be driven along.
pub struct Trajectory {
    key: i32,
    max_key: MaxKey,
    looped: bool,
    sampler: Box<dyn TrajectorySampler>,
}

impl fmt::Debug for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trajectory")
            .field("key", &self.key)
            .field("max_key", &self.max_key)
            .field("looped", &self.looped)
            .finish_non_exhaustive()
    }
}

impl Trajectory {
    pub fn new(max_key: MaxKey, sampler: impl TrajectorySampler + 'static) -> Self {
        Self {
            key: 0,
            max_key,
            looped: false,
            sampler: Box::new(sampler),
        }
    }

    /// Wrap around instead of clamping at the ends.
    pub fn looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    pub fn key(&self) -> i32 {
        self.key
    }

    /// Store a raw key. It is brought into range on the next [`Trajectory::sample`].
    pub fn set_key(&mut self, key: i32) {
        self.key = key;
    }

    pub fn max_key(&self) -> i32 {
        self.max_key.get()
    }

    pub fn set_max_key(&mut self, max_key: MaxKey) {
        self.max_key = max_key;
    }

    /// Move the key one step in the direction of `delta`'s sign.
    pub fn step(&mut self, delta: f32) {
        if delta > 0.0 {
            self.key = self.key.saturating_add(1);
        } else if delta < 0.0 {
            self.key = self.key.saturating_sub(1);
        }
    }

    /// Normalize the key into `[0, max_key)` and sample it.
    ///
    /// An empty key range leaves the key untouched and samples nothing.
    pub fn sample(&mut self) -> Option<TrajectorySample> {
        let max = self.max_key.get();
        if max <= 0 {
            tracing::warn!(max, "trajectory has an empty key range");
            return None;
        }
        self.key = clamp_or_wrap(self.key, 0, max, self.looped);
        let sample = self.sampler.sample(self.key);
        tracing::trace!(key = self.key, hit = sample.is_some(), "trajectory sample");
        sample
    }
}
