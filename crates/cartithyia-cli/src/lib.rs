#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::redundant_pub_crate)]

//! Command-line front end for frame extraction and clip merging.
//!
//! Layout:
//! - `cli.rs`: argv handling, telemetry bootstrap, and dispatch
//! - `registry.rs`: the explicit table of subcommands
//! - `commands/`: one handler per subcommand
//! - `error.rs`: exit-code aware CLI errors
//! - `output.rs`: result rendering
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod error;
pub(crate) mod output;
pub(crate) mod registry;

pub use cli::run;
