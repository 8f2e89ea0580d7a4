use crate::{
    animation::interp::TimeWindow,
    foundation::error::{FaceError, FaceResult},
};

pub const LOOP_PERIOD_SECS: f64 = 10.0;
pub const MAX_ROTATION_DEG: f64 = 25.0;
pub const MIN_IRIS_RADIUS: f64 = 25.0;
pub const MAX_IRIS_RADIUS: f64 = 45.0;

/// One animated scalar: `base` plus the sum of every window's current value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Channel {
    #[serde(default)]
    pub base: f64,
    pub windows: Vec<TimeWindow>,
}

impl Channel {
    pub fn new(base: f64, windows: Vec<TimeWindow>) -> Self {
        Self { base, windows }
    }

    pub fn sample(&self, t: f64) -> f64 {
        self.windows
            .iter()
            .fold(self.base, |acc, w| acc + w.sample(t))
    }

    pub fn validate(&self) -> FaceResult<()> {
        if !self.base.is_finite() {
            return Err(FaceError::validation("channel base must be finite"));
        }
        self.windows.iter().try_for_each(TimeWindow::validate)
    }
}

/// Per-eye signals for one clock instant.
///
/// `rotation` (degrees) is indexed by frame side, 0 = canvas left.
/// `iris_radius` is indexed by eye slot, slot 0 = canvas right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleSample {
    pub rotation: [f64; 2],
    pub iris_radius: [f64; 2],
}

/// Declarative animation for the face, replayed every `loop_period_secs`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSchedule {
    pub loop_period_secs: f64,
    pub rotation: [Channel; 2],
    pub iris_radius: [Channel; 2],
}

impl Default for AnimationSchedule {
    fn default() -> Self {
        let tilt = |start: f64, sign: f64| {
            TimeWindow::new(start, start + 0.2, 0.0, sign * MAX_ROTATION_DEG)
        };
        // The closing half of the tilt, shared by both eyes.
        let shared = [tilt(3.9, 1.0), tilt(4.2, -1.0), tilt(4.5, 1.0), tilt(4.8, -1.0)];

        let mut left = vec![tilt(3.0, 1.0), tilt(3.5, -1.0)];
        left.extend(shared);
        let mut right = vec![tilt(2.0, 1.0), tilt(2.5, -1.0)];
        right.extend(shared);

        let narrow = MIN_IRIS_RADIUS - MAX_IRIS_RADIUS;
        let widen = MAX_IRIS_RADIUS - MIN_IRIS_RADIUS;
        let pulse = |shrink_at: f64, grow_at: f64| {
            Channel::new(
                MAX_IRIS_RADIUS,
                vec![
                    TimeWindow::new(shrink_at, shrink_at + 0.25, 0.0, narrow),
                    TimeWindow::new(grow_at, grow_at + 0.25, 0.0, widen),
                ],
            )
        };

        Self {
            loop_period_secs: LOOP_PERIOD_SECS,
            rotation: [Channel::new(0.0, left), Channel::new(0.0, right)],
            iris_radius: [pulse(0.2, 0.75), pulse(1.10, 1.65)],
        }
    }
}

impl AnimationSchedule {
    pub fn validate(&self) -> FaceResult<()> {
        if !self.loop_period_secs.is_finite() || self.loop_period_secs <= 0.0 {
            return Err(FaceError::validation("loop_period_secs must be > 0"));
        }
        for ch in self.rotation.iter().chain(self.iris_radius.iter()) {
            ch.validate()?;
        }
        Ok(())
    }

    pub fn sample(&self, t: f64) -> ScheduleSample {
        ScheduleSample {
            rotation: [self.rotation[0].sample(t), self.rotation[1].sample(t)],
            iris_radius: [self.iris_radius[0].sample(t), self.iris_radius[1].sample(t)],
        }
    }
}
