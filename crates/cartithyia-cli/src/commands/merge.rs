//! `merge`: two MP4 clips joined back to back, video only.

use async_trait::async_trait;
use cartithyia_media::{MergeRequest, OperationRequest, execute};
use clap::Parser;
use tracing::debug;

use super::parse_args;
use crate::error::CliResult;
use crate::output::render_report;
use crate::registry::{AppContext, Feature};

#[derive(Debug, Parser)]
#[command(
    name = "merge",
    about = "Concatenate the video streams of two MP4 clips"
)]
pub(crate) struct MergeArgs {
    /// First clip (.mp4).
    #[arg(long = "v1", default_value = "", allow_hyphen_values = true)]
    pub(crate) first: String,
    /// Second clip (.mp4), appended after the first.
    #[arg(long = "v2", default_value = "", allow_hyphen_values = true)]
    pub(crate) second: String,
    /// Destination (.mp4 or .mkv).
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub(crate) destination: String,
}

pub(crate) struct MergeFeature;

#[async_trait]
impl Feature for MergeFeature {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn about(&self) -> &'static str {
        "concatenate the video of two .mp4 clips into an .mp4 or .mkv file"
    }

    async fn execute(&self, ctx: &AppContext, args: Vec<String>) -> CliResult<()> {
        let Some(args) = parse_args::<MergeArgs>(self.name(), args)? else {
            return Ok(());
        };
        let request = MergeRequest::new(&args.first, &args.second, &args.destination)?;
        debug!(
            first = %request.first().display(),
            second = %request.second().display(),
            "merge request validated"
        );
        let report = execute(&ctx.config, &OperationRequest::Merge(request)).await?;
        render_report("merged video", &report);
        Ok(())
    }
}
