//! Typed configuration model.

use std::path::{Path, PathBuf};

/// Executable used when no override is configured; resolved on `PATH`.
pub const DEFAULT_FFMPEG_BIN: &str = "ffmpeg";
/// Named pipes are created in the working directory unless overridden.
pub const DEFAULT_PIPE_DIR: &str = ".";
/// Log level used when none is configured; command results go to stdout, so
/// only warnings reach stderr by default.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Settings shared by the frame and merge operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConfig {
    ffmpeg_bin: PathBuf,
    pipe_dir: PathBuf,
    log_level: String,
    log_format: Option<String>,
}

impl MediaConfig {
    /// Build a configuration with default logging settings.
    #[must_use]
    pub fn new(ffmpeg_bin: impl Into<PathBuf>, pipe_dir: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_bin: ffmpeg_bin.into(),
            pipe_dir: pipe_dir.into(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: None,
        }
    }

    /// Replace the logging settings.
    #[must_use]
    pub fn with_logging(mut self, level: impl Into<String>, format: Option<String>) -> Self {
        self.log_level = level.into();
        self.log_format = format;
        self
    }

    /// Media subprocess executable.
    #[must_use]
    pub fn ffmpeg_bin(&self) -> &Path {
        &self.ffmpeg_bin
    }

    /// Directory that receives the ephemeral named pipes.
    #[must_use]
    pub fn pipe_dir(&self) -> &Path {
        &self.pipe_dir
    }

    /// Log level directive.
    #[must_use]
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Normalised log format name (`json` or `pretty`) when configured.
    #[must_use]
    pub fn log_format(&self) -> Option<&str> {
        self.log_format.as_deref()
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG_BIN, DEFAULT_PIPE_DIR)
    }
}
