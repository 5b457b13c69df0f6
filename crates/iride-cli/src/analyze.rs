//! `analyze` command: runs the two-phase pipeline with live stage output.

use iride_core::AnalysisStage;
use iride_pipeline::AnalysisPipeline;
use tokio::sync::mpsc;

use crate::OutputArgs;

/// Run a full analysis of `url` and emit the result.
///
/// Stage headlines are printed to stderr as the run progresses.
///
/// # Errors
///
/// Returns an error if configuration is missing, the pipeline fails, or the
/// report cannot be written.
pub(crate) async fn run_analyze(url: &str, args: &OutputArgs) -> anyhow::Result<()> {
    let config = iride_core::load_app_config()?;
    let pipeline = AnalysisPipeline::from_config(&config)?;

    let (tx, mut rx) = mpsc::channel::<AnalysisStage>(8);
    let printer = tokio::spawn(async move {
        while let Some(stage) = rx.recv().await {
            eprintln!("[{stage}] {}", stage.headline());
        }
    });

    let result = pipeline.run(url, Some(&tx)).await;
    drop(tx);
    if let Err(e) = printer.await {
        tracing::debug!(error = %e, "progress printer task ended abnormally");
    }

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    if report.sources.is_empty() {
        tracing::warn!(url = %report.url, "report has no grounding sources");
    }
    crate::emit(&report, args, crate::today())
}
