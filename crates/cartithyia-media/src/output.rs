//! Persisting captured subprocess output.

use std::path::{Path, PathBuf};

use crate::error::{MediaError, MediaResult};

/// Where an operation wrote its result and how large it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputReport {
    /// File that was written.
    pub destination: PathBuf,
    /// Number of bytes written.
    pub bytes: usize,
}

/// Write `bytes` to `destination` in one whole-file write, replacing any
/// existing file.
pub(crate) async fn write_output(
    operation: &'static str,
    destination: &Path,
    bytes: &[u8],
) -> MediaResult<OutputReport> {
    tokio::fs::write(destination, bytes)
        .await
        .map_err(|source| MediaError::io(operation, destination, source))?;
    Ok(OutputReport {
        destination: destination.to_path_buf(),
        bytes: bytes.len(),
    })
}
