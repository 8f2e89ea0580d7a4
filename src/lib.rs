//! Procedural geometry and animation for a robot face.
//!
//! Each frame the face is rebuilt from scratch:
//!
//! - advance the looping [`AnimationClock`] and sample the [`AnimationSchedule`]
//! - solve the eye frames from the two editable [`Knot`]s
//! - emit an ordered [`FramePlan`] of fill primitives
//!
//! Plans replay against any [`DrawSurface`]; [`CpuSurface`] rasterizes them with vello_cpu
//! and [`render_to_mp4`] streams them into the system `ffmpeg`.
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod encode;
pub mod face;
pub mod geometry;
pub mod pipeline;
pub mod render;

pub use crate::foundation::core::{Canvas, Cursor, Point, PointerState, Rgb8, Vec2};
pub use crate::foundation::error::{FaceError, FaceResult};
pub use crate::foundation::math;

pub use crate::animation::clock::{AnimationClock, FixedStep, SystemTimeSource, TimeSource};
pub use crate::animation::interp::{TimeWindow, windowed_lerp};
pub use crate::animation::schedule::{AnimationSchedule, Channel, ScheduleSample};
pub use crate::encode::{EncodeConfig, FfmpegEncoder};
pub use crate::face::compose::{ComposedFrame, Face, compose_frame};
pub use crate::face::config::FaceConfig;
pub use crate::face::controls::{ControlsConfig, KnotEdit};
pub use crate::face::state::FaceState;
pub use crate::geometry::eye_frame::{EyeFrameConfig, FrameSolution, Side, solve_frame};
pub use crate::geometry::knot::{DEFAULT_KNOTS, Knot, KnotId};
pub use crate::pipeline::{
    RenderStats, RenderToMp4Opts, render_frame_rgba, render_frames, render_to_mp4,
};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::plan::{DrawOp, DrawSurface, FramePlan, execute_plan};
pub use crate::render::{FrameRGBA, RenderSettings};
