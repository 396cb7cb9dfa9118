//! Entry point: argv handling, telemetry bootstrap, and subcommand dispatch.

use std::env;

use cartithyia_config::{MediaConfig, load_from_env};
use cartithyia_telemetry::{LogFormat, LoggingConfig, init_logging};
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::registry::{AppContext, FeatureRegistry};

const HELP_TOKENS: &[&str] = &["-h", "--help", "help"];

/// Run the CLI against the process arguments and environment.
///
/// Returns the process exit code: `0` on success, `1` for an unknown or
/// missing subcommand, `2` for rejected arguments or configuration, and `3`
/// when the operation itself failed.
pub async fn run() -> i32 {
    let args = env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let config = match load_from_env() {
        Ok(config) => config,
        Err(err) => return report(Err(CliError::validation(err.to_string()))),
    };
    init_telemetry(&config);

    let registry = FeatureRegistry::standard();
    let ctx = AppContext { config };
    report(dispatch(&registry, &ctx, args).await)
}

fn init_telemetry(config: &MediaConfig) {
    if let Err(err) = init_logging(&logging_config(config)) {
        eprintln!("warning: {err}");
    }
}

fn logging_config(config: &MediaConfig) -> LoggingConfig<'_> {
    LoggingConfig {
        level: config.log_level(),
        format: config
            .log_format()
            .and_then(LogFormat::parse)
            .unwrap_or_else(LogFormat::infer),
    }
}

fn report(result: CliResult<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

/// Select the subcommand named by the first argument and hand it the rest.
pub(crate) async fn dispatch(
    registry: &FeatureRegistry,
    ctx: &AppContext,
    args: Vec<String>,
) -> CliResult<()> {
    let mut args = args.into_iter();
    let Some(token) = args.next() else {
        return Err(CliError::unknown_feature(None, &registry.names()));
    };
    if HELP_TOKENS.contains(&token.as_str()) {
        println!("{}", usage(registry));
        return Ok(());
    }
    let feature = registry
        .get(&token)
        .ok_or_else(|| CliError::unknown_feature(Some(&token), &registry.names()))?;
    debug!(feature = feature.name(), "dispatching subcommand");
    feature.execute(ctx, args.collect()).await
}

fn usage(registry: &FeatureRegistry) -> String {
    let mut text = String::from("usage: cartithyia <subcommand> [flags]\n\nsubcommands:");
    for feature in registry.iter() {
        text.push_str(&format!("\n  {:<8} {}", feature.name(), feature.about()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use cartithyia_test_support::fixtures::{
        concat_encoder, failing_encoder, frame_encoder, temp_dir,
    };

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn context(encoder: &Path, pipe_dir: &Path) -> AppContext {
        AppContext {
            config: MediaConfig::new(encoder, pipe_dir),
        }
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn unknown_subcommand_exits_one_and_lists_supported() -> TestResult {
        let registry = FeatureRegistry::standard();
        let ctx = context(Path::new("ffmpeg"), Path::new("."));
        let err = dispatch(&registry, &ctx, args(&["foo"]))
            .await
            .err()
            .ok_or("unknown subcommand was accepted")?;
        assert_eq!(err.exit_code(), 1);
        let message = err.display_message();
        assert!(message.contains("\"foo\""));
        assert!(message.contains("frame, merge"));
        Ok(())
    }

    #[test]
    fn logging_follows_media_config() {
        let quiet = MediaConfig::default();
        let logging = logging_config(&quiet);
        assert_eq!(logging.level, cartithyia_config::DEFAULT_LOG_LEVEL);
        assert_eq!(logging.format, LogFormat::infer());

        let verbose = MediaConfig::default().with_logging("debug", Some("json".to_string()));
        let logging = logging_config(&verbose);
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[tokio::test]
    async fn missing_subcommand_exits_one() {
        let registry = FeatureRegistry::standard();
        let ctx = context(Path::new("ffmpeg"), Path::new("."));
        let result = dispatch(&registry, &ctx, Vec::new()).await;
        assert!(matches!(result, Err(CliError::UnknownFeature(_))));
    }

    #[tokio::test]
    async fn help_token_succeeds() {
        let registry = FeatureRegistry::standard();
        let ctx = context(Path::new("ffmpeg"), Path::new("."));
        assert!(dispatch(&registry, &ctx, args(&["--help"])).await.is_ok());
        assert!(dispatch(&registry, &ctx, args(&["frame", "-h"])).await.is_ok());
        assert!(usage(&registry).contains("merge"));
    }

    #[tokio::test]
    async fn unsupported_extension_is_rejected_before_io() -> TestResult {
        let dir = temp_dir()?;
        let registry = FeatureRegistry::standard();
        let ctx = context(Path::new("/nonexistent/ffmpeg"), dir.path());
        let destination = dir.path().join("out.mp4");

        let result = dispatch(
            &registry,
            &ctx,
            args(&[
                "merge",
                "-v1",
                "missing-a.mp4",
                "-v2",
                "b.txt",
                "-destination",
                &destination.to_string_lossy(),
            ]),
        )
        .await;
        let Err(err) = result else {
            return Err("merge with a .txt input succeeded".into());
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().starts_with("v2 is not of a supported format"));
        assert!(!destination.exists());
        assert_eq!(fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn empty_and_unknown_flags_are_validation_errors() {
        let registry = FeatureRegistry::standard();
        let ctx = context(Path::new("ffmpeg"), Path::new("."));

        let empty = dispatch(&registry, &ctx, args(&["frame", "-destination", "a.jpg"])).await;
        assert!(
            matches!(empty, Err(CliError::Validation(ref msg)) if msg == "source cannot be empty")
        );

        let unknown = dispatch(&registry, &ctx, args(&["frame", "-colour", "red"])).await;
        assert!(matches!(unknown, Err(CliError::Validation(_))));
    }

    #[tokio::test]
    async fn frame_runs_end_to_end_with_go_style_flags() -> TestResult {
        let dir = temp_dir()?;
        let source = dir.path().join("clip.mp4");
        fs::write(&source, b"not really a clip")?;
        let destination = dir.path().join("still.jpg");
        let encoder = frame_encoder(dir.path(), "JPEGDATA")?;
        let registry = FeatureRegistry::standard();
        let ctx = context(&encoder, dir.path());

        let source_flag = format!("-source={}", source.display());
        dispatch(
            &registry,
            &ctx,
            args(&[
                "frame",
                &source_flag,
                "-destination",
                &destination.to_string_lossy(),
            ]),
        )
        .await?;
        assert_eq!(fs::read(&destination)?, b"JPEGDATA");
        Ok(())
    }

    #[tokio::test]
    async fn merge_runs_end_to_end() -> TestResult {
        let dir = temp_dir()?;
        let pipes = temp_dir()?;
        let first = dir.path().join("a.mp4");
        let second = dir.path().join("b.mp4");
        fs::write(&first, b"first|")?;
        fs::write(&second, b"second")?;
        let destination = dir.path().join("joined.mkv");
        let encoder = concat_encoder(dir.path(), &dir.path().join("args.txt"))?;
        let registry = FeatureRegistry::standard();
        let ctx = context(&encoder, pipes.path());

        dispatch(
            &registry,
            &ctx,
            args(&[
                "merge",
                "-v1",
                &first.to_string_lossy(),
                "-v2",
                &second.to_string_lossy(),
                "-destination",
                &destination.to_string_lossy(),
            ]),
        )
        .await?;
        assert_eq!(fs::read(&destination)?, b"first|second");
        assert_eq!(fs::read_dir(pipes.path())?.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn subprocess_failure_exits_three_with_stderr() -> TestResult {
        let dir = temp_dir()?;
        let source = dir.path().join("clip.mp4");
        fs::write(&source, b"bytes")?;
        let destination = dir.path().join("still.jpg");
        let encoder = failing_encoder(dir.path(), "moov atom not found", 1)?;
        let registry = FeatureRegistry::standard();
        let ctx = context(&encoder, dir.path());

        let result = dispatch(
            &registry,
            &ctx,
            args(&[
                "frame",
                "-source",
                &source.to_string_lossy(),
                "-destination",
                &destination.to_string_lossy(),
            ]),
        )
        .await;
        let Err(err) = result else {
            return Err("failing encoder reported success".into());
        };
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("moov atom not found"));
        assert!(!destination.exists());
        Ok(())
    }
}
