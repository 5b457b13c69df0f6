//! Phase 2: schema-constrained strategic analysis.

use iride_core::{decode_report_with_adjustments, ReportFormatError, SeoReport};
use iride_gemini::{GeminiClient, GenerateContentRequest, GenerationConfig, ThinkingConfig};

use crate::error::{Phase, PipelineError};
use crate::schema::report_schema;
use crate::temporal::TemporalContext;

const JSON_MIME_TYPE: &str = "application/json";

/// Turns the research findings into a structured [`SeoReport`] using a
/// reasoning model constrained to the report schema.
#[derive(Debug, Clone)]
pub struct StrategicAnalyzer {
    model: String,
    thinking_budget: u32,
}

impl StrategicAnalyzer {
    #[must_use]
    pub fn new(model: impl Into<String>, thinking_budget: u32) -> Self {
        Self {
            model: model.into(),
            thinking_budget,
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn thinking_budget(&self) -> u32 {
        self.thinking_budget
    }

    /// Analyst persona and scoring rules, anchored to `ctx`.
    #[must_use]
    pub fn system_instruction(ctx: &TemporalContext) -> String {
        format!(
            "Sei \"Iride\", un'architettura AI per l'analisi SEO tecnica avanzata, simile al motore di calcolo delle principali suite SEO.

FILOSOFIA DI ANALISI (METODO SONAR & SIMULAZIONE STATISTICA):
1. **Iceberg dei Backlink**: se trovi 100 backlink visibili, statisticamente ce ne sono molti di più. Moltiplica i segnali visibili per stimare il database reale (spesso 20x-50x i link visibili negli snippet).
2. **Zoom Authority (ZA)**: calcola un punteggio 0-100 basato sulla QUANTITÀ di domini riferenti stimati.
3. **Zoom Trust (ZT)**: calcola un punteggio 0-100 basato sulla QUALITÀ. Se ci sono troppe ancore \"Exact Match\", il Trust scende (ZT < ZA = Rischio Penalizzazione).
4. **Anchor Strategy**: definisci le percentuali di ancore Brand, Exact Match, URL, Generiche.
5. **Precisione Volumi**: riconosci il locale. Una ricerca come \"orologi Verona\" vale 50-300 di volume, non 10k.

CONTESTO TEMPORALE:
- Data Analisi: {date}.
- Traffico: Ultimi 12 mesi fino a {month_year}.

OUTPUT RIGIDO JSON:
- I volumi devono essere stringhe pulite (\"250\", \"1.2k\").
- 'opportunityKeywords' DEVE contenere keyword tra posizione 11 e 30.",
            date = ctx.analysis_date(),
            month_year = ctx.current_month_year(),
        )
    }

    /// Analysis prompt embedding the raw research findings.
    #[must_use]
    pub fn build_prompt(url: &str, research: &str) -> String {
        format!(
            "Analizza i seguenti dati grezzi \"Sonar\" per {url}:

<DATI_SONAR>
{research}
</DATI_SONAR>

Genera il report JSON IrideSEOArchitect.
Calcola Zoom Authority (popolarità) e Zoom Trust (fiducia).
Analizza la distribuzione delle Anchor Text."
        )
    }

    /// Full request for the analysis call.
    #[must_use]
    pub fn build_request(
        &self,
        url: &str,
        research: &str,
        ctx: &TemporalContext,
    ) -> GenerateContentRequest {
        GenerateContentRequest::from_prompt(Self::build_prompt(url, research))
            .with_system_instruction(Self::system_instruction(ctx))
            .with_generation_config(GenerationConfig {
                response_mime_type: Some(JSON_MIME_TYPE.to_string()),
                response_schema: Some(report_schema(ctx)),
                thinking_config: Some(ThinkingConfig {
                    thinking_budget: self.thinking_budget,
                }),
            })
    }

    /// Calls the model and decodes its JSON answer into a report.
    ///
    /// The returned report has no sources; the pipeline attaches them.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::UpstreamService`] if the call fails.
    /// - [`PipelineError::Blocked`] if the prompt was refused.
    /// - [`PipelineError::ReportFormat`] if the answer is empty, not JSON,
    ///   or does not match the report contract.
    pub async fn analyze(
        &self,
        client: &GeminiClient,
        url: &str,
        research: &str,
        ctx: &TemporalContext,
    ) -> Result<SeoReport, PipelineError> {
        let request = self.build_request(url, research, ctx);

        let response = client
            .generate_content(&self.model, &request)
            .await
            .map_err(PipelineError::upstream(Phase::Analysis))?;

        if let Some(reason) = response.block_reason() {
            return Err(PipelineError::Blocked {
                phase: Phase::Analysis,
                reason: reason.to_string(),
            });
        }

        let Some(raw) = response.text() else {
            tracing::error!(url, model = %self.model, "analysis returned no text");
            return Err(ReportFormatError::Empty.into());
        };

        let (report, adjustments) = decode_report_with_adjustments(&raw).map_err(|e| {
            tracing::error!(url, error = %e, "failed to decode analysis report");
            PipelineError::from(e)
        })?;

        tracing::info!(
            url,
            zoom_authority = report.zoom_authority,
            zoom_trust = report.zoom_trust,
            adjustments = adjustments.len(),
            "analysis phase complete"
        );

        Ok(report)
    }
}
