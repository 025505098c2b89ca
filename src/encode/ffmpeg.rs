use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, Rgb8};
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::render::frame::{FrameRGBA, byte_len, flatten_premul_over_bg_to_opaque_rgba8};

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Color used to flatten any remaining alpha.
    pub background: Rgb8,
}

impl FfmpegSinkOpts {
    /// Options writing `out_path` over a black background.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            background: Rgb8::BLACK,
        }
    }

    /// Set the flatten background.
    pub fn with_background(mut self, background: Rgb8) -> Self {
        self.background = background;
        self
    }
}

/// Spawns the system `ffmpeg` and streams raw RGBA frames to its stdin.
///
/// Output is H.264 in `yuv420p` with no audio track.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Sink that spawns `ffmpeg` on `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    /// Path the encoder writes to.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    fn command(&self, cfg: &SinkConfig) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        // Input framerate goes before `-i` for rawvideo.
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0"]);
        cmd.args([
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);
        cmd
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> ShortsResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ShortsError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(ShortsError::validation(
                "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;

        if !is_ffmpeg_on_path() {
            return Err(ShortsError::render(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut child = self.command(&cfg).spawn().map_err(|e| {
            ShortsError::render(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ShortsError::render("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ShortsError::render("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "ffmpeg started"
        );

        self.scratch = vec![0u8; byte_len(cfg.width, cfg.height)];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ShortsResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| ShortsError::render("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(ShortsError::render(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ShortsError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(ShortsError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        flatten_premul_over_bg_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            self.opts.background.to_rgba8(),
        );

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(ShortsError::render("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            ShortsError::render(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> ShortsResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| ShortsError::render("ffmpeg sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| ShortsError::render(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| ShortsError::render("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| ShortsError::render(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        self.cfg = None;
        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(ShortsError::render(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg finished");
        Ok(())
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    cmd.args(["-r", &fps_arg(fps)]);
}

fn fps_arg(fps: Fps) -> String {
    format!("{}/{}", fps.num, fps.den)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ShortsResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
