//! Per-frame elapsed time.
//!
//! [`FrameClock`] measures wall time between consecutive frames. Long stalls
//! (window drags, breakpoints) are clamped so the camera does not jump across
//! the scene on the next frame. [`FixedStep`] hands out a constant delta for
//! windowless runs.

use std::time::Instant;

use tracing::warn;

/// Longest frame passed on to the simulation, in seconds.
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Step used when no wall clock drives the frames: 60 Hz.
pub const FIXED_DT: f32 = 1.0 / 60.0;

/// Wall-clock frame timer.
///
/// The first [`delta`](Self::delta) after construction or
/// [`reset`](Self::reset) starts the clock and returns zero.
#[derive(Debug, Default)]
pub struct FrameClock {
    previous: Option<Instant>,
    frame_count: u64,
    elapsed: f64,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call.
    pub fn delta(&mut self) -> f32 {
        self.delta_at(Instant::now())
    }

    /// [`delta`](Self::delta) with an explicit current time.
    pub fn delta_at(&mut self, now: Instant) -> f32 {
        let raw = match self.previous {
            Some(previous) => now.saturating_duration_since(previous).as_secs_f32(),
            None => 0.0,
        };
        self.previous = Some(now);
        self.frame_count += 1;
        let delta = clamp_frame_time(raw);
        self.elapsed += f64::from(delta);
        delta
    }

    /// Stops the clock; the next delta is zero again.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of every delta handed out, after clamping.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Constant-step clock for scripted runs.
#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: f32,
    frame_count: u64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(FIXED_DT)
    }
}

impl FixedStep {
    /// `dt` is clamped the same way as a measured frame.
    #[must_use]
    pub fn new(dt: f32) -> Self {
        Self {
            dt: clamp_frame_time(dt),
            frame_count: 0,
        }
    }

    pub fn delta(&mut self) -> f32 {
        self.frame_count += 1;
        self.dt
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

fn clamp_frame_time(raw: f32) -> f32 {
    if raw.is_nan() || raw < 0.0 {
        return 0.0;
    }
    if raw > MAX_FRAME_TIME {
        warn!(
            "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
            raw * 1000.0,
            MAX_FRAME_TIME * 1000.0
        );
        return MAX_FRAME_TIME;
    }
    raw
}
