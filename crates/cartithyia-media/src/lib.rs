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

//! Frame extraction and clip merging on top of an external media subprocess.
//!
//! Layout:
//! - `request.rs`: lexical argument validation into typed requests
//! - `ffmpeg.rs`: the argument contract with the media subprocess
//! - `capture.rs`: subprocess launch with stdout/stderr capture
//! - `fifo.rs`: named pipes and the writer tasks that feed them
//! - `frame.rs` / `merge.rs`: the two operations

pub mod capture;
pub mod error;
pub mod ffmpeg;
pub mod fifo;
pub mod frame;
pub mod merge;
pub mod output;
pub mod request;

use cartithyia_config::MediaConfig;

pub use capture::{CapturedOutput, MediaCommand, run_captured};
pub use error::{MediaError, MediaResult, SubprocessOutcome};
pub use fifo::{EphemeralPipe, PipeFeeder, PipeSupply, WriterOutcome};
pub use frame::extract_frame;
pub use merge::merge_videos;
pub use output::OutputReport;
pub use request::{FrameRequest, MergeRequest, OperationRequest};

/// Run a validated request to completion.
///
/// # Errors
///
/// Propagates the error of the selected operation.
pub async fn execute(config: &MediaConfig, request: &OperationRequest) -> MediaResult<OutputReport> {
    match request {
        OperationRequest::Frame(frame) => extract_frame(config, frame).await,
        OperationRequest::Merge(merge) => merge_videos(config, merge).await,
    }
}
