use crate::foundation::error::{FaceError, FaceResult};

/// A scalar ramp from `from` to `to` over the clock window `[start, end)`.
///
/// Outside the window the value is held at `before` / `after`, which default to
/// `from` / `to`. Windows are summed by their callers, so overlapping windows
/// compound rather than blend.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeWindow {
    pub start: f64, // seconds on the animation clock
    pub end: f64,   // exclusive
    pub from: f64,
    pub to: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<f64>,
}

impl TimeWindow {
    pub const fn new(start: f64, end: f64, from: f64, to: f64) -> Self {
        Self {
            start,
            end,
            from,
            to,
            before: None,
            after: None,
        }
    }

    pub fn with_clamps(mut self, before: f64, after: f64) -> Self {
        self.before = Some(before);
        self.after = Some(after);
        self
    }

    pub fn clamp_before(&self) -> f64 {
        self.before.unwrap_or(self.from)
    }

    pub fn clamp_after(&self) -> f64 {
        self.after.unwrap_or(self.to)
    }

    pub fn validate(&self) -> FaceResult<()> {
        let values = [self.start, self.end, self.from, self.to];
        if values.iter().any(|v| !v.is_finite())
            || self.before.is_some_and(|v| !v.is_finite())
            || self.after.is_some_and(|v| !v.is_finite())
        {
            return Err(FaceError::validation("time window values must be finite"));
        }
        if self.end <= self.start {
            return Err(FaceError::validation(format!(
                "time window end ({}) must be after start ({})",
                self.end, self.start
            )));
        }
        Ok(())
    }

    pub fn sample(&self, t_now: f64) -> f64 {
        if self.end <= self.start {
            // Zero-length window: a step at `start`.
            return if t_now >= self.start {
                self.clamp_after()
            } else {
                self.clamp_before()
            };
        }

        let u = (t_now - self.start) / (self.end - self.start);
        if u >= 1.0 {
            return self.clamp_after();
        }
        if u < 0.0 {
            return self.clamp_before();
        }
        self.from * (1.0 - u) + self.to * u
    }
}

/// Linear ramp over `[start, end)` evaluated at `t_now`, held at the endpoints outside it.
pub fn windowed_lerp(t_now: f64, start: f64, end: f64, from: f64, to: f64) -> f64 {
    TimeWindow::new(start, end, from, to).sample(t_now)
}
