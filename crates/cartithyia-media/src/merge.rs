//! Video-only concatenation of two clips fed through named pipes.

use std::path::Path;

use cartithyia_config::MediaConfig;
use tracing::{debug, info};

use crate::capture::{CapturedOutput, MediaCommand, run_captured};
use crate::error::{MediaError, MediaResult};
use crate::ffmpeg;
use crate::fifo::PipeFeeder;
use crate::output::{OutputReport, write_output};
use crate::request::MergeRequest;

/// Concatenate the request's first and second clips into its destination.
///
/// Both sources are read fully into memory, then streamed to the media
/// subprocess through two named pipes in the configured pipe directory. The
/// pipes are removed whether or not the subprocess succeeds.
///
/// # Errors
///
/// - [`MediaError::Io`] when a source cannot be read or the destination written.
/// - [`MediaError::PipeCreation`] when the pipes cannot be created.
/// - [`MediaError::Subprocess`] when the media subprocess fails, including its stderr.
/// - [`MediaError::PipeWrite`] or [`MediaError::PipeDetached`] when the subprocess
///   succeeded but an input was not delivered.
pub async fn merge_videos(
    config: &MediaConfig,
    request: &MergeRequest,
) -> MediaResult<OutputReport> {
    let first = read_source(request.first()).await?;
    let second = read_source(request.second()).await?;
    debug!(
        first_bytes = first.len(),
        second_bytes = second.len(),
        "merge sources loaded"
    );

    let supply = PipeFeeder::start(config.pipe_dir(), vec![first, second])?;
    let command = MediaCommand::new(config.ffmpeg_bin(), ffmpeg::concat_args(&supply.paths()));

    let captured = run_captured(command).await;
    let consumer_succeeded = captured.as_ref().is_ok_and(CapturedOutput::success);
    let delivered = supply.finish(consumer_succeeded).await;

    let merged = captured?.into_stdout(config.ffmpeg_bin())?;
    let writers = delivered?;
    debug!(inputs = writers.len(), "all merge inputs delivered");

    let report = write_output("merge.write_destination", request.destination(), &merged).await?;
    info!(
        first = %request.first().display(),
        second = %request.second().display(),
        destination = %report.destination.display(),
        bytes = report.bytes,
        "videos merged"
    );
    Ok(report)
}

async fn read_source(path: &Path) -> MediaResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|err| MediaError::io("merge.read_source", path, err))
}
