//! Single-frame extraction.

use cartithyia_config::MediaConfig;
use tracing::info;

use crate::capture::{MediaCommand, run_captured};
use crate::error::{MediaError, MediaResult};
use crate::ffmpeg;
use crate::output::{OutputReport, write_output};
use crate::request::FrameRequest;

/// Extract the first decodable frame of the request's source into a JPEG.
///
/// The source file is bound directly as the subprocess's stdin; nothing is
/// written unless the subprocess succeeds.
///
/// # Errors
///
/// - [`MediaError::Io`] when the source cannot be inspected or opened, or the
///   destination cannot be written.
/// - [`MediaError::NotAFile`] when the source is a directory.
/// - [`MediaError::Subprocess`] when the media subprocess fails, including its stderr.
pub async fn extract_frame(
    config: &MediaConfig,
    request: &FrameRequest,
) -> MediaResult<OutputReport> {
    let source = request.source();
    let metadata = tokio::fs::metadata(source)
        .await
        .map_err(|err| MediaError::io("frame.stat_source", source, err))?;
    if metadata.is_dir() {
        return Err(MediaError::NotAFile {
            path: source.to_path_buf(),
        });
    }

    let file = tokio::fs::File::open(source)
        .await
        .map_err(|err| MediaError::io("frame.open_source", source, err))?
        .into_std()
        .await;

    let command = MediaCommand::new(config.ffmpeg_bin(), ffmpeg::frame_args()).stdin_file(file);
    let frame = run_captured(command)
        .await?
        .into_stdout(config.ffmpeg_bin())?;

    let report = write_output("frame.write_destination", request.destination(), &frame).await?;
    info!(
        source = %source.display(),
        destination = %report.destination.display(),
        bytes = report.bytes,
        "frame extracted"
    );
    Ok(report)
}
