//! One-shot mode
//!
//! Drives the controller without a terminal UI: select one file, analyze it
//! once, report the result text.

use crate::analyzer::ImageAnalyzer;
use crate::controller::{Controller, SelectedFile};
use std::path::Path;

/// Result text plus whether the analysis succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeOutput {
    pub text: String,
    pub success: bool,
}

/// Select `path`, analyze it once and settle the controller.
pub async fn describe_file<A>(path: &Path, analyzer: &A) -> anyhow::Result<DescribeOutput>
where
    A: ImageAnalyzer + ?Sized,
{
    let file = SelectedFile::open(path).await?;

    let mut controller = Controller::default();
    controller.select_file(Some(file));

    let Some(request) = controller.begin_analysis() else {
        anyhow::bail!("analysis could not be started");
    };
    let completion = request.run(analyzer).await;
    let success = completion.outcome.is_ok();
    controller.finish_analysis(completion);

    Ok(DescribeOutput {
        text: controller.result_text().unwrap_or_default().to_string(),
        success,
    })
}
