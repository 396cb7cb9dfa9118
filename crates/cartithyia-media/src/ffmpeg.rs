//! Command-line contract with the media subprocess.
//!
//! Existing callers depend on these exact argument vectors; change them only
//! together with the encoder they target.

use std::ffi::OsString;
use std::path::Path;

/// Reads a clip on stdin and writes a single MJPEG image to stdout.
pub const FRAME_ARGS: &[&str] = &[
    "-i", "pipe:0", "-vframes", "1", "-f", "image2", "-vcodec", "mjpeg", "pipe:1",
];

/// Label of the filter graph output that carries the concatenated video.
pub const CONCAT_OUTPUT_LABEL: &str = "[outv]";

/// Fragmented MP4 so the muxer never needs to seek on stdout.
const CONCAT_OUTPUT_ARGS: &[&str] = &["-f", "mp4", "-movflags", "frag_keyframe+empty_moov", "pipe:1"];

/// Arguments for single-frame extraction.
#[must_use]
pub fn frame_args() -> Vec<OsString> {
    FRAME_ARGS.iter().map(OsString::from).collect()
}

/// Video-only concat graph over `inputs`, e.g. `[0:v][1:v]concat=n=2:v=1:a=0[outv]`.
#[must_use]
pub fn concat_filter(inputs: usize) -> String {
    let mut graph: String = (0..inputs).map(|idx| format!("[{idx}:v]")).collect();
    graph.push_str(&format!("concat=n={inputs}:v=1:a=0{CONCAT_OUTPUT_LABEL}"));
    graph
}

/// Arguments concatenating the video streams of `inputs` in order.
#[must_use]
pub fn concat_args(inputs: &[&Path]) -> Vec<OsString> {
    let mut args = Vec::with_capacity(inputs.len() * 2 + 9);
    for input in inputs {
        args.push(OsString::from("-i"));
        args.push(input.as_os_str().to_os_string());
    }
    args.push(OsString::from("-filter_complex"));
    args.push(OsString::from(concat_filter(inputs.len())));
    args.push(OsString::from("-map"));
    args.push(OsString::from(CONCAT_OUTPUT_LABEL));
    args.extend(CONCAT_OUTPUT_ARGS.iter().map(OsString::from));
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_args_match_contract() {
        let args = frame_args();
        assert_eq!(
            args,
            [
                "-i", "pipe:0", "-vframes", "1", "-f", "image2", "-vcodec", "mjpeg", "pipe:1"
            ]
            .map(OsString::from)
        );
    }

    #[test]
    fn concat_args_match_contract_for_two_inputs() {
        let args = concat_args(&[Path::new("pipe-a"), Path::new("pipe-b")]);
        assert_eq!(
            args,
            [
                "-i",
                "pipe-a",
                "-i",
                "pipe-b",
                "-filter_complex",
                "[0:v][1:v]concat=n=2:v=1:a=0[outv]",
                "-map",
                "[outv]",
                "-f",
                "mp4",
                "-movflags",
                "frag_keyframe+empty_moov",
                "pipe:1",
            ]
            .map(OsString::from)
        );
    }
}
