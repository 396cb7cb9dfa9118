//! Media subprocess launch and output capture.
//!
//! Stdout and stderr are buffered separately; a failed run is always reported
//! together with the full stderr text.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult, SubprocessOutcome};

/// Where the subprocess reads its standard input from.
#[derive(Debug)]
pub enum StdinSource {
    /// No input; reads see end of file.
    Null,
    /// An already opened file bound directly as stdin.
    File(File),
}

/// One invocation of the media subprocess.
#[derive(Debug)]
pub struct MediaCommand {
    program: PathBuf,
    args: Vec<OsString>,
    stdin: StdinSource,
}

impl MediaCommand {
    /// Invocation of `program` with `args` and no stdin.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            args,
            stdin: StdinSource::Null,
        }
    }

    /// Bind `file` as the subprocess's standard input.
    #[must_use]
    pub fn stdin_file(mut self, file: File) -> Self {
        self.stdin = StdinSource::File(file);
        self
    }

    /// Executable to run.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to the executable.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

/// Buffered result of a finished subprocess.
#[derive(Debug)]
pub struct CapturedOutput {
    /// Everything written to standard output.
    pub stdout: Vec<u8>,
    /// Everything written to standard error.
    pub stderr: Vec<u8>,
    /// Exit outcome.
    pub status: ExitStatus,
}

impl CapturedOutput {
    /// Whether the subprocess exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Standard error decoded lossily as UTF-8.
    #[must_use]
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Standard output of a successful run.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Subprocess`] carrying the exit status and the full
    /// stderr text when the run was unsuccessful.
    pub fn into_stdout(self, program: &Path) -> MediaResult<Vec<u8>> {
        if self.success() {
            return Ok(self.stdout);
        }
        Err(MediaError::Subprocess {
            program: program.to_path_buf(),
            stderr: self.stderr_text(),
            outcome: SubprocessOutcome::Exit(self.status),
        })
    }
}

/// Run `command` to completion, capturing stdout and stderr.
///
/// A non-zero exit is not an error here; callers decide via
/// [`CapturedOutput::into_stdout`].
///
/// # Errors
///
/// Returns [`MediaError::Subprocess`] with a launch outcome when the executable
/// cannot be started or its output cannot be collected.
pub async fn run_captured(command: MediaCommand) -> MediaResult<CapturedOutput> {
    let MediaCommand {
        program,
        args,
        stdin,
    } = command;

    let stdin = match stdin {
        StdinSource::Null => Stdio::null(),
        StdinSource::File(file) => Stdio::from(file),
    };

    debug!(program = %program.display(), ?args, "launching media subprocess");
    let output = Command::new(&program)
        .args(&args)
        .stdin(stdin)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|err| MediaError::Subprocess {
            program: program.clone(),
            outcome: SubprocessOutcome::Launch(err),
            stderr: String::new(),
        })?;

    debug!(
        program = %program.display(),
        status = %output.status,
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "media subprocess exited"
    );

    Ok(CapturedOutput {
        stdout: output.stdout,
        stderr: output.stderr,
        status: output.status,
    })
}
