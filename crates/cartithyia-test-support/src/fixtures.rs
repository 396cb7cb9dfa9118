//! Test fixtures: scripted stand-ins for the media subprocess and host probes.
//!
//! The scripts honour the same argument contract as the real encoder so the
//! frame and merge plumbing can be exercised without codecs installed.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Returns `true` if an `ffmpeg` executable answers on `PATH`.
#[must_use]
pub fn ffmpeg_available() -> bool {
    tool_available("ffmpeg")
}

/// Returns `true` if an `ffprobe` executable answers on `PATH`.
#[must_use]
pub fn ffprobe_available() -> bool {
    tool_available("ffprobe")
}

fn tool_available(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Create a scratch directory with a recognisable prefix.
///
/// # Errors
///
/// Returns an error when the temporary directory cannot be created.
pub fn temp_dir() -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix("cartithyia-")
        .tempdir()
        .context("failed to create temporary directory")
}

/// Write an executable `/bin/sh` script named `name` into `dir`.
///
/// # Errors
///
/// Returns an error when the script cannot be written or made executable.
pub fn write_script(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))
        .with_context(|| format!("failed to write script {}", path.display()))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("failed to mark {} executable", path.display()))?;
    Ok(path)
}

/// Encoder that drains stdin and emits `payload` as the extracted frame.
///
/// # Errors
///
/// Returns an error when the script cannot be written.
pub fn frame_encoder(dir: &Path, payload: &str) -> Result<PathBuf> {
    write_script(
        dir,
        "fake-frame-encoder",
        &format!("cat > /dev/null\nprintf '%s' '{payload}'"),
    )
}

/// Encoder that records its arguments (one per line) into `record` and then
/// streams both `-i` inputs to stdout in order, mimicking a concat graph.
///
/// # Errors
///
/// Returns an error when the script cannot be written.
pub fn concat_encoder(dir: &Path, record: &Path) -> Result<PathBuf> {
    write_script(
        dir,
        "fake-concat-encoder",
        &format!(
            "printf '%s\\n' \"$@\" > '{}'\ncat \"$2\" \"$4\"",
            record.display()
        ),
    )
}

/// Encoder that writes `message` to stderr and exits with `code` without
/// touching any input.
///
/// # Errors
///
/// Returns an error when the script cannot be written.
pub fn failing_encoder(dir: &Path, message: &str, code: i32) -> Result<PathBuf> {
    write_script(
        dir,
        "fake-failing-encoder",
        &format!("echo '{message}' >&2\nexit {code}"),
    )
}

/// Render a one-second, ten-frame synthetic clip with the real `ffmpeg`.
///
/// The index is written up front so the clip can be demuxed from a pipe.
///
/// # Errors
///
/// Returns an error when `ffmpeg` fails to produce the clip.
pub fn render_test_clip(path: &Path, pattern: &str) -> Result<()> {
    let output = Command::new("ffmpeg")
        .args(["-y", "-loglevel", "error", "-f", "lavfi", "-i"])
        .arg(format!("{pattern}=duration=1:size=64x64:rate=10"))
        .args(["-pix_fmt", "yuv420p", "-c:v", "mpeg4", "-movflags", "+faststart"])
        .arg(path)
        .output()
        .context("failed to launch ffmpeg")?;
    anyhow::ensure!(
        output.status.success(),
        "ffmpeg could not render {}: {}",
        path.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(())
}

/// Count decoded video frames in `path` with the real `ffprobe`.
///
/// # Errors
///
/// Returns an error when `ffprobe` fails or prints an unexpected value.
pub fn count_video_frames(path: &Path) -> Result<u64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-count_frames",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=nb_read_frames",
            "-of",
            "csv=p=0",
        ])
        .arg(path)
        .output()
        .context("failed to launch ffprobe")?;
    anyhow::ensure!(output.status.success(), "ffprobe rejected {}", path.display());
    String::from_utf8_lossy(&output.stdout)
        .trim()
        .trim_end_matches(',')
        .parse()
        .context("ffprobe printed a non-numeric frame count")
}
