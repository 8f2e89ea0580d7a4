use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use robo_face::{
    AnimationSchedule, CpuSurface, Face, FaceConfig, PointerState, RenderSettings,
    RenderToMp4Opts,
};

#[derive(Parser, Debug)]
#[command(name = "robo-face", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the animation loop as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the default face configuration as JSON.
    DumpConfig,
    /// Print the default animation schedule as JSON.
    DumpSchedule,
}

#[derive(Args, Debug)]
struct Inputs {
    /// Face configuration JSON; omitted fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Animation schedule JSON.
    #[arg(long)]
    schedule: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    inputs: Inputs,

    /// Clock time in seconds; values past the loop period wrap.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Pointer position as `X,Y` in canvas pixels.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<(f64, f64)>,

    /// Hold the pointer button down.
    #[arg(long, requires = "pointer")]
    pressed: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    inputs: Inputs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Video length; defaults to one animation loop.
    #[arg(long)]
    seconds: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::DumpConfig => print_json(&FaceConfig::default()),
        Command::DumpSchedule => print_json(&AnimationSchedule::default()),
    }
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok((x, y))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn setup_face(inputs: &Inputs) -> anyhow::Result<Face> {
    let config = match &inputs.config {
        Some(path) => read_json(path, "config")?,
        None => FaceConfig::default(),
    };
    let schedule = match &inputs.schedule {
        Some(path) => read_json(path, "schedule")?,
        None => AnimationSchedule::default(),
    };
    Ok(Face::setup(config, schedule, 0.0)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut face = setup_face(&args.inputs)?;
    let mut surface = CpuSurface::new(face.config().canvas, RenderSettings::default())?;

    let pointer = match args.pointer {
        Some((x, y)) if args.pressed => PointerState::pressed_at(x, y),
        Some((x, y)) => PointerState::at(x, y),
        None => PointerState::default(),
    };
    let frame = robo_face::render_frame_rgba(&mut face, &mut surface, args.time, pointer)
        .with_context(|| format!("render frame at t={}", args.time))?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.unpremultiplied(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    tracing::debug!(cursor = ?surface.cursor(), "frame done");
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut face = setup_face(&args.inputs)?;
    let seconds = args.seconds.unwrap_or(face.schedule().loop_period_secs);
    if !seconds.is_finite() || seconds <= 0.0 {
        anyhow::bail!("--seconds must be > 0");
    }

    let settings = RenderSettings {
        clear_rgba: Some([255, 255, 255, 255]),
    };
    let mut surface = CpuSurface::new(face.config().canvas, settings)?;
    let opts = RenderToMp4Opts {
        fps: args.fps,
        frames: (seconds * f64::from(args.fps)).round().max(1.0) as u64,
        ..RenderToMp4Opts::default()
    };

    let stats = robo_face::render_to_mp4(&mut face, &mut surface, &args.out, &opts)?;
    eprintln!(
        "wrote {} ({} frames, {} skipped)",
        args.out.display(),
        stats.frames_total,
        stats.frames_skipped
    );
    Ok(())
}
