use std::path::PathBuf;

use crate::{
    animation::clock::{FixedStep, TimeSource},
    encode::{EncodeConfig, FfmpegEncoder},
    face::compose::Face,
    foundation::{
        core::PointerState,
        error::{FaceError, FaceResult},
    },
    render::{FrameRGBA, cpu::CpuSurface, plan::execute_plan},
};

/// Composes and rasterizes one frame at host time `now`.
///
/// Returns **premultiplied** RGBA8 pixels.
pub fn render_frame_rgba(
    face: &mut Face,
    surface: &mut CpuSurface,
    now: f64,
    pointer: PointerState,
) -> FaceResult<FrameRGBA> {
    let plan = face.render_frame(now, pointer)?;
    execute_plan(surface, &plan)?;
    surface.finish()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
    pub frames_skipped: u64,
}

/// Drives the face like a host frame loop, polling `time` once per frame.
///
/// A frame that fails is logged and dropped; the loop carries on with the next tick.
pub fn render_frames(
    face: &mut Face,
    surface: &mut CpuSurface,
    time: &mut dyn TimeSource,
    count: usize,
    pointer: PointerState,
) -> FaceResult<(Vec<FrameRGBA>, RenderStats)> {
    let mut out = Vec::with_capacity(count.min(4096));
    let mut stats = RenderStats::default();

    for _ in 0..count {
        let now = time.now_secs();
        stats.frames_total += 1;
        match render_frame_rgba(face, surface, now, pointer) {
            Ok(frame) => {
                out.push(frame);
                stats.frames_rendered += 1;
            }
            Err(err @ FaceError::Geometry(_)) => {
                tracing::warn!(now, error = %err, "frame rejected");
                stats.frames_skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok((out, stats))
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    pub fps: u32,
    pub frames: u64,
    /// Straight RGBA the frames are flattened over.
    pub bg_rgba: [u8; 4],
    pub overwrite: bool,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            fps: 30,
            frames: 300,
            bg_rgba: [255, 255, 255, 255],
            overwrite: true,
        }
    }
}

/// Renders `opts.frames` frames at a fixed step and encodes them with the system `ffmpeg`.
///
/// A rejected frame is replaced by the previous good one so the video keeps its length.
/// Rejects before the first good frame are filled with that frame instead.
pub fn render_to_mp4(
    face: &mut Face,
    surface: &mut CpuSurface,
    out_path: impl Into<PathBuf>,
    opts: &RenderToMp4Opts,
) -> FaceResult<RenderStats> {
    if opts.frames == 0 {
        return Err(FaceError::validation("render_to_mp4 needs at least one frame"));
    }

    let canvas = face.config().canvas;
    let cfg = EncodeConfig {
        overwrite: opts.overwrite,
        ..EncodeConfig::mp4(out_path, canvas.width, canvas.height, opts.fps)
    };
    let mut time = FixedStep::new(opts.fps)?;
    let mut enc = FfmpegEncoder::new(cfg, opts.bg_rgba)?;

    let stats = encode_with_backfill(
        opts.frames,
        || {
            let now = time.now_secs();
            render_frame_rgba(face, surface, now, PointerState::default())
        },
        |frame| enc.encode_frame(frame),
    )?;

    enc.finish()?;
    tracing::info!(
        rendered = stats.frames_rendered,
        skipped = stats.frames_skipped,
        "mp4 written"
    );
    Ok(stats)
}

/// Emits exactly `frames` frames: every rejected slot repeats the nearest good frame,
/// the previous one if any, else the first one that follows.
fn encode_with_backfill<R, E>(frames: u64, mut render: R, mut emit: E) -> FaceResult<RenderStats>
where
    R: FnMut() -> FaceResult<FrameRGBA>,
    E: FnMut(&FrameRGBA) -> FaceResult<()>,
{
    let mut stats = RenderStats::default();
    let mut last: Option<FrameRGBA> = None;
    let mut pending_lead = 0u64;

    for _ in 0..frames {
        stats.frames_total += 1;
        match render() {
            Ok(frame) => {
                for _ in 0..std::mem::take(&mut pending_lead) {
                    emit(&frame)?;
                }
                emit(&frame)?;
                stats.frames_rendered += 1;
                last = Some(frame);
            }
            Err(err @ FaceError::Geometry(_)) => {
                tracing::warn!(frame = stats.frames_total - 1, error = %err, "frame rejected");
                stats.frames_skipped += 1;
                match &last {
                    Some(prev) => emit(prev)?,
                    None => pending_lead += 1,
                }
            }
            Err(err) => return Err(err),
        }
    }

    if last.is_none() {
        return Err(FaceError::geometry(format!(
            "all {frames} frames were rejected; nothing to encode"
        )));
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tag: u8) -> FrameRGBA {
        FrameRGBA {
            width: 1,
            height: 1,
            data: vec![tag, tag, tag, 255],
            premultiplied: true,
        }
    }

    fn run(script: Vec<FaceResult<FrameRGBA>>) -> (FaceResult<RenderStats>, Vec<u8>) {
        let frames = script.len() as u64;
        let mut script = script.into_iter();
        let mut emitted = Vec::new();
        let res = encode_with_backfill(
            frames,
            || script.next().unwrap(),
            |f| {
                emitted.push(f.data[0]);
                Ok(())
            },
        );
        (res, emitted)
    }

    fn rejected() -> FaceResult<FrameRGBA> {
        Err(FaceError::geometry("degenerate"))
    }

    #[test]
    fn leading_rejects_take_the_first_good_frame() {
        let (res, emitted) = run(vec![
            rejected(),
            rejected(),
            Ok(frame(1)),
            rejected(),
            Ok(frame(2)),
        ]);
        let stats = res.unwrap();
        assert_eq!(emitted, vec![1, 1, 1, 1, 2]);
        assert_eq!(
            stats,
            RenderStats {
                frames_total: 5,
                frames_rendered: 2,
                frames_skipped: 3,
            }
        );
    }

    #[test]
    fn trailing_rejects_repeat_the_last_good_frame() {
        let (res, emitted) = run(vec![Ok(frame(7)), rejected(), rejected()]);
        assert_eq!(res.unwrap().frames_skipped, 2);
        assert_eq!(emitted, vec![7, 7, 7]);
    }

    #[test]
    fn all_rejected_is_an_error() {
        let (res, emitted) = run(vec![rejected(), rejected()]);
        assert!(matches!(res, Err(FaceError::Geometry(_))));
        assert!(emitted.is_empty());
    }

    #[test]
    fn non_geometry_errors_stop_the_run() {
        let (res, emitted) = run(vec![
            Ok(frame(1)),
            Err(FaceError::render("surface lost")),
            Ok(frame(2)),
        ]);
        assert!(matches!(res, Err(FaceError::Render(_))));
        assert_eq!(emitted, vec![1]);
    }
}
