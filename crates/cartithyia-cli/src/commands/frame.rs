//! `frame`: first frame of an MP4 clip as a JPEG.

use async_trait::async_trait;
use cartithyia_media::{FrameRequest, OperationRequest, execute};
use clap::Parser;
use tracing::debug;

use super::parse_args;
use crate::error::CliResult;
use crate::output::render_report;
use crate::registry::{AppContext, Feature};

#[derive(Debug, Parser)]
#[command(
    name = "frame",
    about = "Extract the first frame of an MP4 clip as a JPEG image"
)]
pub(crate) struct FrameArgs {
    /// Source clip (.mp4).
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub(crate) source: String,
    /// Destination image (.jpg).
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub(crate) destination: String,
}

pub(crate) struct FrameFeature;

#[async_trait]
impl Feature for FrameFeature {
    fn name(&self) -> &'static str {
        "frame"
    }

    fn about(&self) -> &'static str {
        "extract the first frame of an .mp4 clip into a .jpg image"
    }

    async fn execute(&self, ctx: &AppContext, args: Vec<String>) -> CliResult<()> {
        let Some(args) = parse_args::<FrameArgs>(self.name(), args)? else {
            return Ok(());
        };
        let request = FrameRequest::new(&args.source, &args.destination)?;
        debug!(source = %request.source().display(), "frame request validated");
        let report = execute(&ctx.config, &OperationRequest::Frame(request)).await?;
        render_report("frame", &report);
        Ok(())
    }
}
