use crate::{
    animation::{
        clock::AnimationClock,
        schedule::{AnimationSchedule, ScheduleSample},
    },
    face::{
        config::FaceConfig,
        controls::{KnotEdit, run_overlay},
        eyes::{draw_eyes, eye_slots},
        nose::draw_nose,
        state::FaceState,
    },
    foundation::{
        core::{Cursor, PointerState},
        error::{FaceError, FaceResult},
    },
    geometry::{
        eye_frame::{Side, build_layers, solve_frame},
        knot::Knot,
    },
    render::plan::{DrawOp, FramePlan},
};

/// One composed frame and the knot edit its pointer input produced, if any.
#[derive(Clone, Debug)]
pub struct ComposedFrame {
    pub plan: FramePlan,
    pub edit: Option<KnotEdit>,
}

/// Builds the full draw list for one clock instant, back to front:
/// clear, nose, both frames, knot handles, eyes.
///
/// Pure: knot edits are returned, not applied. A frame with any non-finite
/// op is rejected whole, edit included.
pub fn compose_frame(
    config: &FaceConfig,
    knots: &[Knot; 2],
    time: f64,
    sample: &ScheduleSample,
    pointer: PointerState,
) -> FaceResult<ComposedFrame> {
    let canvas = config.canvas;
    let mut ops = vec![DrawOp::Clear];

    let nose = draw_nose(&config.nose, canvas);
    ops.extend(nose.ops);
    let pivot = nose.pivot;

    let solution = solve_frame(&config.eye_frame, canvas, knots)?;
    for side in Side::BOTH {
        let layers = build_layers(
            &solution,
            &config.eye_frame,
            canvas,
            side,
            sample.rotation[side.index()],
            pivot,
        );
        ops.extend(layers.draw_ops());
    }

    let (cursor, edit) = if config.controls.enabled {
        let overlay = run_overlay(&config.controls, &solution, pointer);
        ops.extend(overlay.ops);
        (overlay.cursor, overlay.edit)
    } else {
        (Cursor::Arrow, None)
    };

    let slots = eye_slots(&config.eyes, canvas, pivot, sample.rotation);
    ops.extend(draw_eyes(&config.eyes, canvas, &slots, sample.iris_radius));

    // Finite knots can still overflow once scaled out to the rim.
    if let Some(idx) = ops.iter().position(|op| !op.is_finite()) {
        return Err(FaceError::geometry(format!(
            "composed op {idx} has non-finite coordinates"
        )));
    }

    Ok(ComposedFrame {
        plan: FramePlan {
            canvas,
            time,
            ops,
            cursor,
        },
        edit,
    })
}

/// The animated face: configuration, schedule, and the state carried between frames.
#[derive(Clone, Debug)]
pub struct Face {
    config: FaceConfig,
    schedule: AnimationSchedule,
    state: FaceState,
}

impl Face {
    /// Validates inputs and starts the animation clock at host time `now`.
    pub fn setup(config: FaceConfig, schedule: AnimationSchedule, now: f64) -> FaceResult<Self> {
        config.validate()?;
        schedule.validate()?;
        let clock = AnimationClock::start(now, schedule.loop_period_secs)?;
        let state = FaceState::new(config.knots, clock);
        tracing::debug!(
            width = config.canvas.width,
            height = config.canvas.height,
            controls = config.controls.enabled,
            "face set up"
        );
        Ok(Self {
            config,
            schedule,
            state,
        })
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn schedule(&self) -> &AnimationSchedule {
        &self.schedule
    }

    pub fn state(&self) -> &FaceState {
        &self.state
    }

    /// Advances the clock to `now` and composes the frame.
    ///
    /// A geometry error rejects this frame only; knots are left untouched and
    /// the next call recomputes from scratch.
    #[tracing::instrument(skip(self), fields(t = tracing::field::Empty))]
    pub fn render_frame(&mut self, now: f64, pointer: PointerState) -> FaceResult<FramePlan> {
        let t = self.state.clock.advance(now);
        tracing::Span::current().record("t", t);

        let sample = self.schedule.sample(t);
        let composed = compose_frame(&self.config, &self.state.knots, t, &sample, pointer)?;
        if let Some(edit) = composed.edit {
            self.state.apply(edit);
        }
        Ok(composed.plan)
    }
}
