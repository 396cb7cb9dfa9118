//! Environment-backed configuration loader.

use crate::error::{ConfigError, ConfigResult};
use crate::model::{DEFAULT_FFMPEG_BIN, DEFAULT_LOG_LEVEL, DEFAULT_PIPE_DIR, MediaConfig};

/// Overrides the media subprocess executable.
pub const ENV_FFMPEG_BIN: &str = "CARTITHYIA_FFMPEG_BIN";
/// Overrides the directory used for named pipes.
pub const ENV_PIPE_DIR: &str = "CARTITHYIA_PIPE_DIR";
/// Overrides the log level.
pub const ENV_LOG_LEVEL: &str = "CARTITHYIA_LOG_LEVEL";
/// Selects `json` or `pretty` log output.
pub const ENV_LOG_FORMAT: &str = "CARTITHYIA_LOG_FORMAT";

const LOG_FORMATS: &[&str] = &["json", "pretty"];

/// Load configuration from the process environment.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when a variable is set to a blank value or
/// names an unknown log format.
pub fn load_from_env() -> ConfigResult<MediaConfig> {
    load_with(|name| std::env::var(name).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when a variable is set to a blank value or
/// names an unknown log format.
pub fn load_with<F>(lookup: F) -> ConfigResult<MediaConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let ffmpeg_bin =
        non_blank(ENV_FFMPEG_BIN, lookup(ENV_FFMPEG_BIN))?.unwrap_or_else(|| DEFAULT_FFMPEG_BIN.into());
    let pipe_dir =
        non_blank(ENV_PIPE_DIR, lookup(ENV_PIPE_DIR))?.unwrap_or_else(|| DEFAULT_PIPE_DIR.into());
    let log_level =
        non_blank(ENV_LOG_LEVEL, lookup(ENV_LOG_LEVEL))?.unwrap_or_else(|| DEFAULT_LOG_LEVEL.into());
    let log_format = non_blank(ENV_LOG_FORMAT, lookup(ENV_LOG_FORMAT))?
        .map(|value| parse_log_format(&value))
        .transpose()?;

    Ok(MediaConfig::new(ffmpeg_bin, pipe_dir).with_logging(log_level, log_format))
}

fn non_blank(field: &'static str, value: Option<String>) -> ConfigResult<Option<String>> {
    match value {
        Some(raw) if raw.trim().is_empty() => Err(ConfigError::InvalidField {
            field,
            reason: "blank_value",
            value: Some(raw),
        }),
        Some(raw) => Ok(Some(raw.trim().to_string())),
        None => Ok(None),
    }
}

fn parse_log_format(value: &str) -> ConfigResult<String> {
    let normalised = value.to_ascii_lowercase();
    if LOG_FORMATS.contains(&normalised.as_str()) {
        Ok(normalised)
    } else {
        Err(ConfigError::InvalidField {
            field: ENV_LOG_FORMAT,
            reason: "unknown_log_format",
            value: Some(value.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |name| values.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() -> anyhow::Result<()> {
        let config = load_with(lookup_from(&[]))?;
        assert_eq!(config.ffmpeg_bin(), Path::new("ffmpeg"));
        assert_eq!(config.pipe_dir(), Path::new("."));
        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.log_format(), None);
        assert_eq!(config, MediaConfig::default());
        Ok(())
    }

    #[test]
    fn overrides_are_trimmed_and_applied() -> anyhow::Result<()> {
        let config = load_with(lookup_from(&[
            (ENV_FFMPEG_BIN, " /opt/ffmpeg/bin/ffmpeg "),
            (ENV_PIPE_DIR, "/tmp/pipes"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FORMAT, "JSON"),
        ]))?;
        assert_eq!(config.ffmpeg_bin(), Path::new("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(config.pipe_dir(), Path::new("/tmp/pipes"));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_format(), Some("json"));
        Ok(())
    }

    #[test]
    fn blank_values_are_rejected() {
        let err = load_with(lookup_from(&[(ENV_PIPE_DIR, "   ")])).err();
        assert!(matches!(
            err,
            Some(ConfigError::InvalidField {
                field: ENV_PIPE_DIR,
                reason: "blank_value",
                ..
            })
        ));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = load_with(lookup_from(&[(ENV_LOG_FORMAT, "yaml")])).err();
        assert_eq!(
            err,
            Some(ConfigError::InvalidField {
                field: ENV_LOG_FORMAT,
                reason: "unknown_log_format",
                value: Some("yaml".to_string()),
            })
        );
    }
}
