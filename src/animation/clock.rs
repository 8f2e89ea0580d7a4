use std::time::Instant;

use crate::foundation::error::{FaceError, FaceResult};

/// Seconds since the current loop started.
///
/// Once elapsed time passes the loop period the epoch jumps forward by whole
/// periods, so the schedule snaps back to its start instead of crossfading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    epoch: f64,
    loop_period: f64,
    elapsed: f64,
}

impl AnimationClock {
    pub fn start(now: f64, loop_period: f64) -> FaceResult<Self> {
        if !loop_period.is_finite() || loop_period <= 0.0 {
            return Err(FaceError::validation("loop period must be > 0"));
        }
        if !now.is_finite() {
            return Err(FaceError::validation("clock start time must be finite"));
        }
        Ok(Self {
            epoch: now,
            loop_period,
            elapsed: 0.0,
        })
    }

    /// Moves the clock to host time `now` and returns the elapsed loop time.
    pub fn advance(&mut self, now: f64) -> f64 {
        let mut elapsed = (now - self.epoch).max(0.0);
        if elapsed > self.loop_period {
            let wraps = (elapsed / self.loop_period).floor();
            self.epoch += wraps * self.loop_period;
            elapsed = (now - self.epoch).max(0.0);
            tracing::debug!(wraps, elapsed, "animation clock wrapped");
        }
        self.elapsed = elapsed;
        elapsed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Host time in seconds, polled once per frame.
pub trait TimeSource {
    fn now_secs(&mut self) -> f64;
}

/// Wall-clock time since construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now_secs(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Deterministic `frame / fps` time for offline rendering; each poll steps one frame.
#[derive(Clone, Copy, Debug)]
pub struct FixedStep {
    fps: f64,
    frame: u64,
}

impl FixedStep {
    pub fn new(fps: u32) -> FaceResult<Self> {
        if fps == 0 {
            return Err(FaceError::validation("fps must be > 0"));
        }
        Ok(Self {
            fps: f64::from(fps),
            frame: 0,
        })
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl TimeSource for FixedStep {
    fn now_secs(&mut self) -> f64 {
        let t = self.frame as f64 / self.fps;
        self.frame += 1;
        t
    }
}
