//! Video output. MP4 encoding shells out to the system `ffmpeg` binary.

pub mod ffmpeg;

pub use ffmpeg::{EncodeConfig, FfmpegEncoder, is_ffmpeg_on_path};
