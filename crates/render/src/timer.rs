use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame clock for the main loop.
///
/// [`FrameTimer::tick`] turns successive instants into the elapsed seconds
/// the camera integrates; the last `window` frame durations feed the fps
/// estimate.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    frames: VecDeque<Duration>,
    window: usize,
    previous: Option<Instant>,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameTimer {
    /// # Panics
    /// If `window` is zero.
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "frame timer needs at least one slot");
        Self {
            frames: VecDeque::with_capacity(window),
            window,
            previous: None,
        }
    }

    /// Mark the start of a frame at `now` and return the seconds since the
    /// previous tick. The first tick only starts the clock and returns 0.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let Some(previous) = self.previous.replace(now) else {
            return 0.0;
        };
        let dt = now.saturating_duration_since(previous);
        self.record(dt);
        dt.as_secs_f32()
    }

    /// Push a frame duration measured elsewhere, dropping the oldest one
    /// once the window is full.
    pub fn record(&mut self, dt: Duration) {
        if self.frames.len() == self.window {
            self.frames.pop_front();
        }
        self.frames.push_back(dt);
    }

    pub fn count(&self) -> usize {
        self.frames.len()
    }

    /// Latest frame duration in seconds, 0 before any frame.
    pub fn elapsed_secs(&self) -> f32 {
        self.frames.back().map_or(0.0, Duration::as_secs_f32)
    }

    pub fn average(&self) -> Duration {
        match self.frames.len() {
            0 => Duration::ZERO,
            n => self.frames.iter().sum::<Duration>() / n as u32,
        }
    }

    /// Shortest and longest frame in the window.
    pub fn spread(&self) -> (Duration, Duration) {
        let min = self.frames.iter().min().copied().unwrap_or_default();
        let max = self.frames.iter().max().copied().unwrap_or_default();
        (min, max)
    }

    pub fn fps(&self) -> f32 {
        let avg = self.average().as_secs_f32();
        if avg > 0.0 { avg.recip() } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reports_elapsed_since_previous() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(8);
        assert_eq!(timer.tick(start), 0.0);
        assert_eq!(timer.count(), 0);

        let dt = timer.tick(start + Duration::from_millis(20));
        assert!((dt - 0.02).abs() < 1e-6);
        let dt = timer.tick(start + Duration::from_millis(45));
        assert!((dt - 0.025).abs() < 1e-6);
        assert_eq!(timer.count(), 2);
        assert!((timer.elapsed_secs() - 0.025).abs() < 1e-6);
    }

    #[test]
    fn clock_going_backwards_is_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut timer = FrameTimer::default();
        timer.tick(start);
        assert_eq!(timer.tick(start - Duration::from_millis(5)), 0.0);
    }

    #[test]
    fn fps_over_window() {
        let mut timer = FrameTimer::new(4);
        for ms in [25, 15, 20] {
            timer.record(Duration::from_millis(ms));
        }
        assert_eq!(timer.average(), Duration::from_millis(20));
        assert_eq!(
            timer.spread(),
            (Duration::from_millis(15), Duration::from_millis(25))
        );
        assert!((timer.fps() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn oldest_frames_drop_out() {
        let mut timer = FrameTimer::new(2);
        for ms in [100, 10, 30] {
            timer.record(Duration::from_millis(ms));
        }
        assert_eq!(timer.count(), 2);
        assert_eq!(timer.spread().1, Duration::from_millis(30));
        assert_eq!(timer.average(), Duration::from_millis(20));
    }

    #[test]
    fn empty_timer() {
        let timer = FrameTimer::default();
        assert_eq!(timer.fps(), 0.0);
        assert_eq!(timer.elapsed_secs(), 0.0);
        assert_eq!(timer.spread(), (Duration::ZERO, Duration::ZERO));
    }
}
