//! Named-pipe feeder that streams in-memory buffers into a consumer subprocess.
//!
//! # Design
//!
//! - Every pipe exists on disk before the consumer is launched; the consumer is
//!   never waited on before launch.
//! - Each writer waits explicitly for a reader: a non-blocking write-open fails
//!   with `ENXIO` until the consumer opens the read end, and is retried on a short
//!   interval. Once the consumer exits, the orchestrator raises a detach signal so
//!   writers that never saw a reader stop instead of waiting forever.
//! - Writers are supervised: their outcomes are joined in [`PipeSupply::finish`]
//!   before the operation concludes.
//! - Pipe entries are removed on every path. Removal failures are logged, never
//!   returned.

use std::path::{Path, PathBuf};
use std::time::Duration;

use nix::errno::Errno;
use nix::sys::stat::Mode;
use nix::unistd::mkfifo;
use tokio::io::AsyncWriteExt;
use tokio::net::unix::pipe;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{MediaError, MediaResult};

/// Delay between attempts to find a reader on a pipe.
pub const ATTACH_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A named pipe living for the duration of one operation.
#[derive(Debug)]
pub struct EphemeralPipe {
    path: PathBuf,
    removed: bool,
}

impl EphemeralPipe {
    /// Create a pipe with a random name inside `dir`, readable and writable by the
    /// owner only.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::PipeCreation`] when the entry already exists or the
    /// filesystem refuses special files.
    pub fn create(dir: &Path) -> MediaResult<Self> {
        Self::create_named(dir, &Uuid::new_v4().to_string())
    }

    fn create_named(dir: &Path, name: &str) -> MediaResult<Self> {
        let path = dir.join(name);
        mkfifo(path.as_path(), Mode::S_IRUSR | Mode::S_IWUSR).map_err(|source| {
            MediaError::PipeCreation {
                path: path.clone(),
                source,
            }
        })?;
        debug!(pipe = %path.display(), "created named pipe");
        Ok(Self {
            path,
            removed: false,
        })
    }

    /// Filesystem location of the pipe.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(pipe = %self.path.display(), "removed named pipe"),
            Err(err) => warn!(
                pipe = %self.path.display(),
                error = %err,
                "failed to remove named pipe"
            ),
        }
    }
}

impl Drop for EphemeralPipe {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Result of a writer that delivered its whole buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOutcome {
    /// Pipe the writer fed.
    pub path: PathBuf,
    /// Bytes delivered to the reader.
    pub bytes_written: usize,
}

/// Entry point for supplying byte streams through named pipes.
#[derive(Debug)]
pub struct PipeFeeder;

impl PipeFeeder {
    /// Create one pipe per buffer in `dir`, then start one writer task per pipe.
    ///
    /// Must be called from within a tokio runtime. If any pipe cannot be created,
    /// the pipes created so far are removed before returning.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::PipeCreation`] when a pipe cannot be created.
    pub fn start(dir: &Path, buffers: Vec<Vec<u8>>) -> MediaResult<PipeSupply> {
        Self::start_named(dir, buffers, || Uuid::new_v4().to_string())
    }

    fn start_named(
        dir: &Path,
        buffers: Vec<Vec<u8>>,
        mut next_name: impl FnMut() -> String,
    ) -> MediaResult<PipeSupply> {
        let pipes = buffers
            .iter()
            .map(|_| EphemeralPipe::create_named(dir, &next_name()))
            .collect::<MediaResult<Vec<_>>>()?;

        let (detach, detached) = watch::channel(false);
        let writers = pipes
            .iter()
            .zip(buffers)
            .map(|(pipe, buffer)| {
                tokio::spawn(write_pipe(pipe.path().to_path_buf(), buffer, detached.clone()))
            })
            .collect();

        Ok(PipeSupply {
            pipes,
            writers,
            detach,
        })
    }
}

/// Live pipes and the writer tasks feeding them.
#[derive(Debug)]
pub struct PipeSupply {
    pipes: Vec<EphemeralPipe>,
    writers: Vec<JoinHandle<MediaResult<WriterOutcome>>>,
    detach: watch::Sender<bool>,
}

impl PipeSupply {
    /// Pipe paths in the order of the buffers they carry.
    #[must_use]
    pub fn paths(&self) -> Vec<&Path> {
        self.pipes.iter().map(EphemeralPipe::path).collect()
    }

    /// Detach writers, join them, and remove every pipe.
    ///
    /// Call once the consumer has exited. When the consumer failed, writer
    /// failures are logged and `Ok` is returned with the outcomes that did
    /// complete, leaving the consumer's error to the caller.
    ///
    /// # Errors
    ///
    /// When `consumer_succeeded`, returns the first writer failure other than a
    /// broken pipe (the consumer closing its end early).
    pub async fn finish(mut self, consumer_succeeded: bool) -> MediaResult<Vec<WriterOutcome>> {
        self.detach.send_replace(true);

        let mut outcomes = Vec::with_capacity(self.writers.len());
        let mut failure = None;
        for (pipe, writer) in self.pipes.iter().zip(self.writers.drain(..)) {
            let result = writer.await.unwrap_or_else(|source| {
                Err(MediaError::WriterJoin {
                    path: pipe.path().to_path_buf(),
                    source,
                })
            });
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) if consumer_succeeded && !err.is_broken_pipe() => {
                    failure.get_or_insert(err);
                }
                Err(err) => warn!(
                    pipe = %pipe.path().display(),
                    error = %err,
                    "pipe writer stopped early"
                ),
            }
        }

        for pipe in &mut self.pipes {
            pipe.remove();
        }

        failure.map_or(Ok(outcomes), Err)
    }
}

async fn write_pipe(
    path: PathBuf,
    buffer: Vec<u8>,
    mut detached: watch::Receiver<bool>,
) -> MediaResult<WriterOutcome> {
    let mut sender = tokio::select! {
        sender = wait_for_reader(&path) => sender?,
        _ = detached.wait_for(|detached| *detached) => {
            return Err(MediaError::PipeDetached { path: path.clone() });
        }
    };
    debug!(pipe = %path.display(), bytes = buffer.len(), "pipe reader attached");

    sender
        .write_all(&buffer)
        .await
        .map_err(|source| MediaError::PipeWrite {
            path: path.clone(),
            source,
        })?;
    drop(sender);

    debug!(pipe = %path.display(), "pipe writer finished");
    Ok(WriterOutcome {
        path,
        bytes_written: buffer.len(),
    })
}

async fn wait_for_reader(path: &Path) -> MediaResult<pipe::Sender> {
    loop {
        match pipe::OpenOptions::new().open_sender(path) {
            Ok(sender) => return Ok(sender),
            Err(err) if err.raw_os_error() == Some(Errno::ENXIO as i32) => {
                tokio::time::sleep(ATTACH_POLL_INTERVAL).await;
            }
            Err(source) => {
                return Err(MediaError::PipeWrite {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
}
