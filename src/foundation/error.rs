use std::path::PathBuf;

/// Convenience result type used across the crate.
pub type ShortsResult<T> = Result<T, ShortsError>;

/// Failure taxonomy surfaced to callers of the generation pipeline.
///
/// Recoverable conditions (missing fonts, a missing or corrupt think animation) never appear
/// here: they are logged and replaced by fallbacks at the point they occur.
#[derive(thiserror::Error, Debug)]
pub enum ShortsError {
    /// The caller supplied no facts; nothing is rendered and no file is created.
    #[error("no trivia facts provided")]
    NoFacts,

    /// Invalid configuration, input document or frame geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// The output directory cannot be written to.
    #[error(
        "permission denied: no write permission in the directory '{}'",
        dir.display()
    )]
    PermissionDenied {
        /// Directory that failed the write check.
        dir: PathBuf,
    },

    /// The sink reported success but the encoded file does not exist.
    #[error("render error: failed to write video file '{}'", path.display())]
    OutputMissing {
        /// Expected output path.
        path: PathBuf,
    },

    /// Encoding failed; the message carries the underlying cause.
    #[error("render error: failed to generate video: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShortsError {
    /// Build a [`ShortsError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShortsError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ShortsError::PermissionDenied`] value.
    pub fn permission_denied(dir: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied { dir: dir.into() }
    }

    /// `true` for the permission condition, so callers can suggest rerunning with more rights.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
