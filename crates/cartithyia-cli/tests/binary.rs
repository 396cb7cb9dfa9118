//! Drives the compiled binary to check exit codes and stream usage.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use cartithyia_test_support::fixtures::{failing_encoder, frame_encoder, temp_dir};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn cartithyia(args: &[&str], encoder: &Path, pipe_dir: &Path) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_cartithyia"))
        .args(args)
        .env("CARTITHYIA_FFMPEG_BIN", encoder)
        .env("CARTITHYIA_PIPE_DIR", pipe_dir)
        .env("CARTITHYIA_LOG_FORMAT", "json")
        .env_remove("RUST_LOG")
        .output()
}

#[test]
fn unknown_subcommand_exits_with_one() -> TestResult {
    let dir = temp_dir()?;
    let output = cartithyia(&["resize"], Path::new("ffmpeg"), dir.path())?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.starts_with("error: unsupported subcommand \"resize\""));
    assert!(stderr.contains("frame, merge"));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn invalid_destination_exits_with_two() -> TestResult {
    let dir = temp_dir()?;
    let output = cartithyia(
        &["frame", "-source", "clip.mp4", "-destination", "still.png"],
        Path::new("ffmpeg"),
        dir.path(),
    )?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("destination is not of a supported format"));
    Ok(())
}

#[test]
fn blank_configuration_exits_with_two() -> TestResult {
    let dir = temp_dir()?;
    let output = Command::new(env!("CARGO_BIN_EXE_cartithyia"))
        .args(["frame", "-source", "a.mp4", "-destination", "a.jpg"])
        .env("CARTITHYIA_FFMPEG_BIN", "   ")
        .env("CARTITHYIA_PIPE_DIR", dir.path())
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("CARTITHYIA_FFMPEG_BIN"));
    Ok(())
}

#[test]
fn frame_success_reports_on_stdout() -> TestResult {
    let dir = temp_dir()?;
    let source = dir.path().join("clip.mp4");
    fs::write(&source, b"clip")?;
    let destination = dir.path().join("still.jpg");
    let encoder = frame_encoder(dir.path(), "FRAME")?;

    let output = cartithyia(
        &[
            "frame",
            "-source",
            &source.to_string_lossy(),
            "-destination",
            &destination.to_string_lossy(),
        ],
        &encoder,
        dir.path(),
    )?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read(&destination)?, b"FRAME");
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(
        stdout.trim_end(),
        format!("frame written to {} (5 bytes)", destination.display())
    );
    Ok(())
}

#[test]
fn subprocess_failure_exits_with_three() -> TestResult {
    let dir = temp_dir()?;
    let source = dir.path().join("clip.mp4");
    fs::write(&source, b"clip")?;
    let destination = dir.path().join("still.jpg");
    let encoder = failing_encoder(dir.path(), "Invalid data found", 1)?;

    let output = cartithyia(
        &[
            "frame",
            "-source",
            &source.to_string_lossy(),
            "-destination",
            &destination.to_string_lossy(),
        ],
        &encoder,
        dir.path(),
    )?;
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8(output.stderr)?.contains("Invalid data found"));
    assert!(!destination.exists());
    Ok(())
}

#[test]
fn help_write_failure_is_reported() -> TestResult {
    let dir = temp_dir()?;
    let readonly = dir.path().join("stdout.txt");
    fs::write(&readonly, b"")?;
    let output = Command::new(env!("CARGO_BIN_EXE_cartithyia"))
        .args(["frame", "--help"])
        .env("CARTITHYIA_PIPE_DIR", dir.path())
        .stdout(fs::File::open(&readonly)?)
        .stderr(std::process::Stdio::piped())
        .output()?;
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8(output.stderr)?.starts_with("error: "));
    Ok(())
}
