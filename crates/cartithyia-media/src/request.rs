//! Argument validation producing typed, immutable operation requests.
//!
//! Checks are purely lexical: no path is touched on disk here.

use std::path::{Path, PathBuf};

use crate::error::{MediaError, MediaResult};

/// Extensions accepted for source clips.
pub const VIDEO_SOURCE_FORMATS: &[&str] = &[".mp4"];
/// Extensions accepted for extracted frames.
pub const FRAME_FORMATS: &[&str] = &[".jpg"];
/// Extensions accepted for merged output.
pub const MERGE_OUTPUT_FORMATS: &[&str] = &[".mp4", ".mkv"];

/// A validated invocation of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRequest {
    /// Extract the first frame of a clip.
    Frame(FrameRequest),
    /// Concatenate two clips.
    Merge(MergeRequest),
}

/// Validated arguments for frame extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRequest {
    source: PathBuf,
    destination: PathBuf,
}

impl FrameRequest {
    /// Validate frame arguments.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::EmptyPath`] or [`MediaError::UnsupportedFormat`] for the
    /// first argument that fails, checking `source` before `destination`.
    pub fn new(source: &str, destination: &str) -> MediaResult<Self> {
        Ok(Self {
            source: validate_path("source", source, VIDEO_SOURCE_FORMATS)?,
            destination: validate_path("destination", destination, FRAME_FORMATS)?,
        })
    }

    /// Clip to read.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// JPEG file to write.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// Validated arguments for merging two clips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    first: PathBuf,
    second: PathBuf,
    destination: PathBuf,
}

impl MergeRequest {
    /// Validate merge arguments.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::EmptyPath`] or [`MediaError::UnsupportedFormat`] for the
    /// first argument that fails, in the order `v1`, `v2`, `destination`.
    pub fn new(first: &str, second: &str, destination: &str) -> MediaResult<Self> {
        Ok(Self {
            first: validate_path("v1", first, VIDEO_SOURCE_FORMATS)?,
            second: validate_path("v2", second, VIDEO_SOURCE_FORMATS)?,
            destination: validate_path("destination", destination, MERGE_OUTPUT_FORMATS)?,
        })
    }

    /// Clip that plays first.
    #[must_use]
    pub fn first(&self) -> &Path {
        &self.first
    }

    /// Clip that plays second.
    #[must_use]
    pub fn second(&self) -> &Path {
        &self.second
    }

    /// Merged file to write.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// Extension of the final path component, including the leading dot.
///
/// Returns an empty string when the final component has no dot. Matching is
/// case-sensitive.
#[must_use]
pub fn extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |idx| idx + 1);
    path[name_start..]
        .rfind('.')
        .map_or("", |idx| &path[name_start + idx..])
}

fn validate_path(
    field: &'static str,
    value: &str,
    supported: &'static [&'static str],
) -> MediaResult<PathBuf> {
    if value.is_empty() {
        return Err(MediaError::EmptyPath { field });
    }

    let ext = extension(value);
    if !supported.contains(&ext) {
        return Err(MediaError::UnsupportedFormat {
            field,
            extension: ext.to_string(),
            supported,
        });
    }

    Ok(PathBuf::from(value))
}
