//! Simulation time model.
//!
//! # Design
//!
//! The simulation advances by variable-length frames: the owning loop passes
//! the elapsed seconds of each frame into `Sim::update`.  `SimClock` keeps
//! both the frame counter and the accumulated simulated seconds so reports can
//! use either.  Elapsed time is `f32` seconds, matching every timer on
//! `Agent`.

use std::fmt;

/// Frame counter plus accumulated simulated seconds.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Number of `advance` calls so far.
    pub ticks: u64,
    /// Sum of every `dt` passed to `advance`.
    pub elapsed_secs: f32,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize a frame delta: negative and NaN values become `0.0`.
    #[inline]
    pub fn sanitize_dt(dt: f32) -> f32 {
        if dt.is_nan() || dt < 0.0 { 0.0 } else { dt }
    }

    /// Advance the clock by one frame of `dt` seconds and return the
    /// sanitized delta that was applied.
    #[inline]
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = Self::sanitize_dt(dt);
        self.ticks += 1;
        self.elapsed_secs += dt;
        dt
    }

    /// Split elapsed time into whole minutes and remaining seconds.
    pub fn elapsed_ms(&self) -> (u32, f32) {
        let total = self.elapsed_secs.max(0.0);
        let minutes = (total / 60.0).floor();
        (minutes as u32, total - minutes * 60.0)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s) = self.elapsed_ms();
        write!(f, "T{} ({}:{:05.2})", self.ticks, m, s)
    }
}
