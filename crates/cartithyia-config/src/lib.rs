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

//! Runtime configuration for the cartithyia media tools.
//!
//! Settings are read from `CARTITHYIA_*` environment variables once at startup and
//! handed to the media operations by reference.

pub mod error;
pub mod loader;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    ENV_FFMPEG_BIN, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_PIPE_DIR, load_from_env, load_with,
};
pub use model::{DEFAULT_FFMPEG_BIN, DEFAULT_LOG_LEVEL, DEFAULT_PIPE_DIR, MediaConfig};
