#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

//! Logging primitives shared across the cartithyia workspace.
//!
//! The CLI installs a single `tracing` subscriber at startup; library crates only
//! emit events and never configure output themselves.

mod error;
mod init;

pub use error::{Result, TelemetryError};
pub use init::{LogFormat, LoggingConfig, init_logging};
