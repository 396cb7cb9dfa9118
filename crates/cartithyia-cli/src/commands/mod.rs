//! Subcommand handlers and the argument parsing they share.

pub(crate) mod frame;
pub(crate) mod merge;

use clap::Parser;
use clap::error::ErrorKind;

use crate::error::{CliError, CliResult};

/// Parse subcommand arguments, accepting single-dash long flags.
///
/// Returns `Ok(None)` after printing help or version text.
pub(crate) fn parse_args<T: Parser>(name: &str, args: Vec<String>) -> CliResult<Option<T>> {
    let argv = std::iter::once(name.to_string()).chain(normalize_flags(args));
    match T::try_parse_from(argv) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print().map_err(CliError::failure)?;
            Ok(None)
        }
        Err(err) => Err(CliError::validation(err.to_string().trim_end())),
    }
}

/// Rewrite `-name` and `-name=value` into their `--` forms.
///
/// The token following a long flag without `=` is its value and is passed
/// through untouched, so `-source -clip.mp4` keeps `-clip.mp4` as the value.
/// Single-character flags such as `-h` are left alone, as is everything after
/// a bare `--`.
pub(crate) fn normalize_flags(args: Vec<String>) -> Vec<String> {
    let mut terminated = false;
    let mut value_pending = false;
    args.into_iter()
        .map(|arg| {
            if terminated || std::mem::take(&mut value_pending) {
                return arg;
            }
            if arg == "--" {
                terminated = true;
                return arg;
            }
            let Some(dashes) = long_flag_dashes(&arg) else {
                return arg;
            };
            value_pending = !arg.contains('=');
            if dashes == 1 { format!("-{arg}") } else { arg }
        })
        .collect()
}

/// Dash count of a long flag token (`-name`, `--name`, with or without
/// `=value`).
fn long_flag_dashes(arg: &str) -> Option<usize> {
    let (rest, dashes) = match arg.strip_prefix("--") {
        Some(rest) => (rest, 2),
        None => (arg.strip_prefix('-')?, 1),
    };
    let name = rest.split('=').next().unwrap_or(rest);
    (name.len() > 1 && name.starts_with(|c: char| c.is_ascii_alphabetic()))
        .then_some(dashes)
}
