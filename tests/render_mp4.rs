use std::path::PathBuf;

use robo_face::{
    AnimationSchedule, Canvas, CpuSurface, DEFAULT_KNOTS, Face, FaceConfig, FaceError, Knot,
    RenderSettings, RenderStats, RenderToMp4Opts, encode::is_ffmpeg_on_path, render_to_mp4,
};

fn out_path(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("render_mp4");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

fn opts(frames: u64) -> RenderToMp4Opts {
    RenderToMp4Opts {
        frames,
        ..RenderToMp4Opts::default()
    }
}

#[test]
fn short_clip_is_encoded() {
    if !is_ffmpeg_on_path() {
        eprintln!("ffmpeg not on PATH; skipping");
        return;
    }
    let mut face = Face::setup(FaceConfig::default(), AnimationSchedule::default(), 0.0).unwrap();
    let mut surface = CpuSurface::new(Canvas::default(), RenderSettings::default()).unwrap();
    let path = out_path("short.mp4");

    let stats = render_to_mp4(&mut face, &mut surface, path.clone(), &opts(6)).unwrap();
    assert_eq!(
        stats,
        RenderStats {
            frames_total: 6,
            frames_rendered: 6,
            frames_skipped: 0,
        }
    );
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn clip_with_no_good_frame_is_an_error() {
    if !is_ffmpeg_on_path() {
        eprintln!("ffmpeg not on PATH; skipping");
        return;
    }
    let config = FaceConfig {
        knots: [
            Knot {
                angle: 90.0,
                length: 1e306,
            },
            DEFAULT_KNOTS[1],
        ],
        ..FaceConfig::default()
    };
    let mut face = Face::setup(config, AnimationSchedule::default(), 0.0).unwrap();
    let mut surface = CpuSurface::new(Canvas::default(), RenderSettings::default()).unwrap();

    let res = render_to_mp4(&mut face, &mut surface, out_path("rejected.mp4"), &opts(3));
    assert!(matches!(res, Err(FaceError::Geometry(_))));
}
