//! # Design
//!
//! - One error enum covers validation, filesystem, pipe, and subprocess failures.
//! - Capture operation context (paths, fields) so failures are reproducible in tests.
//! - Subprocess failures always carry the full captured stderr text.

use std::fmt::{self, Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors produced by the frame and merge operations.
#[derive(Debug, Error)]
pub enum MediaError {
    /// A required path argument was empty.
    #[error("{field} cannot be empty")]
    EmptyPath {
        /// Argument that was empty.
        field: &'static str,
    },
    /// A path argument carried an extension outside the accepted set.
    #[error(
        "{field} is not of a supported format (supported: {}, got: {extension:?})",
        .supported.join(", ")
    )]
    UnsupportedFormat {
        /// Argument that failed validation.
        field: &'static str,
        /// Lexical extension found on the path (may be empty).
        extension: String,
        /// Accepted extensions for the argument.
        supported: &'static [&'static str],
    },
    /// IO failures while interacting with real files.
    #[error("{operation} failed for {}", .path.display())]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The source path names a directory.
    #[error("source {} is a directory, not a file", .path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },
    /// A named pipe could not be created.
    #[error("failed to create named pipe {}", .path.display())]
    PipeCreation {
        /// Path of the pipe that could not be created.
        path: PathBuf,
        /// Underlying nix error.
        source: nix::Error,
    },
    /// The media subprocess failed to launch or exited unsuccessfully.
    #[error("media subprocess {} {outcome}{}", .program.display(), stderr_suffix(.stderr))]
    Subprocess {
        /// Executable that was invoked.
        program: PathBuf,
        /// Launch or exit failure description.
        outcome: SubprocessOutcome,
        /// Full standard error captured from the subprocess.
        stderr: String,
    },
    /// A pipe writer failed to open or fill its pipe.
    #[error("failed to feed named pipe {}", .path.display())]
    PipeWrite {
        /// Pipe the writer was bound to.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The consumer exited before attaching to a pipe.
    #[error("named pipe {} was never opened by the media subprocess", .path.display())]
    PipeDetached {
        /// Pipe that never saw a reader.
        path: PathBuf,
    },
    /// A pipe writer task panicked or was cancelled.
    #[error("pipe writer for {} did not complete", .path.display())]
    WriterJoin {
        /// Pipe the writer was bound to.
        path: PathBuf,
        /// Underlying join error.
        source: tokio::task::JoinError,
    },
}

/// How the media subprocess failed.
#[derive(Debug)]
pub enum SubprocessOutcome {
    /// The executable could not be started.
    Launch(io::Error),
    /// The executable ran and exited unsuccessfully.
    Exit(ExitStatus),
}

impl Display for SubprocessOutcome {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launch(err) => write!(formatter, "failed to launch: {err}"),
            Self::Exit(status) => write!(formatter, "failed with {status}"),
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{trimmed}")
    }
}

impl MediaError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Whether the error was raised while validating arguments, before any IO.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyPath { .. } | Self::UnsupportedFormat { .. })
    }

    /// Whether the error is a writer hitting a pipe whose reader already closed.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(
            self,
            Self::PipeWrite { source, .. } if source.kind() == io::ErrorKind::BrokenPipe
        )
    }
}
