//! Two-phase analysis orchestration.

use iride_core::{normalize_url, AnalysisStage, AppConfig, SeoReport};
use iride_gemini::{GeminiClient, GeminiError};
use tokio::sync::mpsc;

use crate::analyzer::StrategicAnalyzer;
use crate::error::PipelineError;
use crate::gatherer::IntelligenceGatherer;
use crate::temporal::TemporalContext;

/// Research followed by structured analysis, sharing one Gemini client.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    client: GeminiClient,
    gatherer: IntelligenceGatherer,
    analyzer: StrategicAnalyzer,
}

impl AnalysisPipeline {
    #[must_use]
    pub fn new(
        client: GeminiClient,
        gatherer: IntelligenceGatherer,
        analyzer: StrategicAnalyzer,
    ) -> Self {
        Self {
            client,
            gatherer,
            analyzer,
        }
    }

    /// Builds the client and both phases from application config.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError`] if the HTTP client cannot be built or the
    /// configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, GeminiError> {
        let client = GeminiClient::with_base_url(
            &config.gemini_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.gemini_base_url,
        )?;
        Ok(Self::new(
            client,
            IntelligenceGatherer::new(&config.research_model),
            StrategicAnalyzer::new(&config.analysis_model, config.thinking_budget),
        ))
    }

    #[must_use]
    pub fn gatherer(&self) -> &IntelligenceGatherer {
        &self.gatherer
    }

    #[must_use]
    pub fn analyzer(&self) -> &StrategicAnalyzer {
        &self.analyzer
    }

    /// Runs a full analysis of `raw_url` dated today.
    ///
    /// See [`AnalysisPipeline::run_with_context`].
    ///
    /// # Errors
    ///
    /// Same as [`AnalysisPipeline::run_with_context`].
    pub async fn run(
        &self,
        raw_url: &str,
        progress: Option<&mpsc::Sender<AnalysisStage>>,
    ) -> Result<SeoReport, PipelineError> {
        self.run_with_context(raw_url, &TemporalContext::now(), progress)
            .await
    }

    /// Runs a full analysis of `raw_url` with an explicit date context.
    ///
    /// 1. Normalize the URL (`https://` is prefixed when no scheme is given).
    /// 2. Emit `Searching` and gather search-grounded research.
    /// 3. Emit `Thinking` and request the structured report.
    /// 4. Attach the research sources and emit `Complete`.
    ///
    /// Any failure after step 1 emits `Error`. An invalid URL fails before
    /// any stage is emitted and before any network call.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Validation`] for an empty or unparseable URL.
    /// - [`PipelineError::UpstreamService`] / [`PipelineError::Blocked`] if
    ///   either model call fails.
    /// - [`PipelineError::ReportFormat`] if the report cannot be decoded.
    pub async fn run_with_context(
        &self,
        raw_url: &str,
        ctx: &TemporalContext,
        progress: Option<&mpsc::Sender<AnalysisStage>>,
    ) -> Result<SeoReport, PipelineError> {
        let url = normalize_url(raw_url)?;
        tracing::info!(url = %url, "starting analysis");

        match self.run_phases(&url, ctx, progress).await {
            Ok(report) => {
                emit(progress, AnalysisStage::Complete).await;
                tracing::info!(url = %url, sources = report.sources.len(), "analysis complete");
                Ok(report)
            }
            Err(e) => {
                emit(progress, AnalysisStage::Error).await;
                tracing::error!(url = %url, error = %e, "analysis failed");
                Err(e)
            }
        }
    }

    async fn run_phases(
        &self,
        url: &str,
        ctx: &TemporalContext,
        progress: Option<&mpsc::Sender<AnalysisStage>>,
    ) -> Result<SeoReport, PipelineError> {
        emit(progress, AnalysisStage::Searching).await;
        let findings = self.gatherer.gather(&self.client, url).await?;

        emit(progress, AnalysisStage::Thinking).await;
        let mut report = self
            .analyzer
            .analyze(&self.client, url, &findings.research_text, ctx)
            .await?;

        report.sources = findings.sources;
        Ok(report)
    }
}

/// Best-effort progress notification; a dropped receiver never fails a run.
async fn emit(progress: Option<&mpsc::Sender<AnalysisStage>>, stage: AnalysisStage) {
    if let Some(tx) = progress {
        if tx.send(stage).await.is_err() {
            tracing::debug!(%stage, "progress receiver dropped");
        }
    }
}
