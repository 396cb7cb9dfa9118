//! Errors surfaced to the terminal, each mapped to a process exit code.

use std::fmt::{self, Display, Formatter};

use cartithyia_media::MediaError;

/// Errors returned by CLI dispatch and command handlers.
#[derive(Debug)]
pub(crate) enum CliError {
    /// The first argument did not name a registered subcommand.
    UnknownFeature(String),
    /// Arguments were rejected before any work started.
    Validation(String),
    /// The command ran and failed.
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn unknown_feature(token: Option<&str>, supported: &[&str]) -> Self {
        let listing = supported.join(", ");
        let message = match token {
            Some(token) => {
                format!("unsupported subcommand {token:?} (supported subcommands: {listing})")
            }
            None => format!("no subcommand given (supported subcommands: {listing})"),
        };
        Self::UnknownFeature(message)
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownFeature(_) => 1,
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::UnknownFeature(message) | Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl From<MediaError> for CliError {
    fn from(error: MediaError) -> Self {
        if error.is_validation() {
            Self::Validation(error.to_string())
        } else {
            Self::Failure(error.into())
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_message())
    }
}

impl std::error::Error for CliError {}
