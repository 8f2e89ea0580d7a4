use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    foundation::error::{FaceError, FaceResult},
    render::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn mp4(out_path: impl Into<PathBuf>, width: u32, height: u32, fps: u32) -> Self {
        Self {
            width,
            height,
            fps,
            out_path: out_path.into(),
            overwrite: true,
        }
    }

    pub fn validate(&self) -> FaceResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FaceError::validation("encode width/height must be > 0"));
        }
        if self.fps == 0 {
            return Err(FaceError::validation("encode fps must be > 0"));
        }
        // yuv420p subsamples chroma 2x2.
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(FaceError::validation(format!(
                "encode size {}x{} must be even for yuv420p output",
                self.width, self.height
            )));
        }
        Ok(())
    }

    fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> FaceResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams raw RGBA frames into an `ffmpeg` child process.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    bg_rgba: [u8; 4],
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
    frames_written: u64,
}

impl FfmpegEncoder {
    /// `bg_rgba` is what translucent pixels are flattened over; MP4 has no alpha.
    pub fn new(cfg: EncodeConfig, bg_rgba: [u8; 4]) -> FaceResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(FaceError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(FaceError::encode("ffmpeg was not found on PATH"));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg(if cfg.overwrite { "-y" } else { "-n" })
            .args(["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"])
            .args(["-s", &format!("{}x{}", cfg.width, cfg.height)])
            .args(["-r", &cfg.fps.to_string()])
            .args(["-i", "pipe:0", "-an", "-c:v", "libx264", "-pix_fmt", "yuv420p"])
            .args(["-movflags", "+faststart"])
            .arg(&cfg.out_path);

        let mut child = cmd
            .spawn()
            .map_err(|e| FaceError::encode(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| FaceError::encode("ffmpeg stdin was not piped"))?;

        tracing::debug!(
            out = %cfg.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps,
            "ffmpeg started"
        );

        Ok(Self {
            scratch: vec![0u8; cfg.frame_bytes()],
            cfg,
            bg_rgba,
            child,
            stdin: Some(stdin),
            frames_written: 0,
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> FaceResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(FaceError::validation(format!(
                "frame is {}x{}, encoder expects {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(FaceError::encode("encoder already finished"));
        };
        stdin
            .write_all(&self.scratch)
            .map_err(|e| FaceError::encode(format!("failed to write frame to ffmpeg: {e}")))?;
        self.frames_written += 1;
        Ok(())
    }

    /// Closes the pipe and waits for ffmpeg to finalize the file.
    pub fn finish(mut self) -> FaceResult<()> {
        drop(self.stdin.take());

        let output = self
            .child
            .wait_with_output()
            .map_err(|e| FaceError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FaceError::encode(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::debug!(frames = self.frames_written, "ffmpeg finished");
        Ok(())
    }
}

/// Composites RGBA8 pixels over an opaque background.
pub fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    premultiplied: bool,
    bg_rgba: [u8; 4],
) -> FaceResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FaceError::validation(format!(
            "pixel buffers differ: {} vs {} bytes",
            dst.len(),
            src.len()
        )));
    }

    let bg = [bg_rgba[0], bg_rgba[1], bg_rgba[2]].map(u16::from);
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let fg = u16::from(s[c]);
            let fg = if premultiplied { fg } else { mul_div255(fg, a) };
            d[c] = (fg + mul_div255(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}
