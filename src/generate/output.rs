use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{ShortsError, ShortsResult};

/// Prefix of generated video file names.
pub const FILE_PREFIX: &str = "trivia_video_";

/// `trivia_video_YYYYmmdd_HHMMSS.mp4` for the given local time.
pub fn file_name_at<Tz>(at: &chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{FILE_PREFIX}{}.mp4", at.format("%Y%m%d_%H%M%S"))
}

/// Timestamped output path inside `dir`, using the current local time.
pub fn timestamped_output_path(dir: &Path) -> PathBuf {
    dir.join(file_name_at(&chrono::Local::now()))
}

/// Directory an output file will be written into. A bare file name resolves to `.`.
pub fn output_dir_of(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Fail with [`ShortsError::PermissionDenied`] unless files can be created in `dir`.
///
/// A missing directory is created. Read-only permission bits are honored even for privileged
/// users; otherwise a probe file is created and removed again.
pub fn check_output_dir_writable(dir: &Path) -> ShortsResult<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => ShortsError::permission_denied(dir),
            _ => anyhow::Error::new(e)
                .context(format!("failed to create output directory '{}'", dir.display()))
                .into(),
        })?;
    }

    let meta = std::fs::metadata(dir)
        .with_context(|| format!("failed to inspect output directory '{}'", dir.display()))?;
    if !meta.is_dir() {
        return Err(ShortsError::validation(format!(
            "output path '{}' is not a directory",
            dir.display()
        )));
    }
    if meta.permissions().readonly() {
        return Err(ShortsError::permission_denied(dir));
    }

    let probe = dir.join(format!(".trivia-shorts-probe-{}", std::process::id()));
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe)
    {
        Ok(file) => {
            drop(file);
            remove_leftover(&probe);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(ShortsError::permission_denied(dir))
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("failed to write into '{}'", dir.display()))
            .into()),
    }
}

/// Best-effort removal of a scratch or partial file. Failures are logged, not returned.
pub(crate) fn remove_leftover(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not remove file");
            false
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/output.rs"]
mod tests;
