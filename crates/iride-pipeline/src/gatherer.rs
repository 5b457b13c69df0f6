//! Phase 1: search-grounded intelligence gathering.

use iride_core::Source;
use iride_gemini::{GeminiClient, GenerateContentRequest, GroundingChunk};

use crate::error::{Phase, PipelineError};
use crate::types::{ResearchFindings, LIMITED_DATA_PLACEHOLDER};

/// Runs the first model call with Google Search grounding enabled and
/// collects the raw findings and their web sources.
#[derive(Debug, Clone)]
pub struct IntelligenceGatherer {
    model: String,
}

impl IntelligenceGatherer {
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Research prompt for `url`.
    #[must_use]
    pub fn build_prompt(url: &str) -> String {
        format!(
            "Esegui una scansione tecnica profonda (livello crawler SEO) per il sito: {url}.

Obiettivi di Intelligence (SONAR MODE):
1. **Organic SERP Overlap**: non cercare i competitor \"business\", cerca chi si posiziona per le STESSE keyword. Chi intercetta il traffico organico?
2. **Backlink Deep Dive**: cerca il numero reale di backlink e di Referring Domains. Cerca pattern di Anchor Text (Brand vs Money Keywords).
3. **Striking Distance Keywords**: trova keyword specifiche dove il sito è in 2ª pagina (posizione 11-20) o a fine 1ª pagina. Sono le opportunità più preziose.
4. **Local vs National**: distingui se il traffico è puramente locale (es. una città) o nazionale.

Cerca dati specifici su volumi di ricerca reali, evitando stime generiche.
Rispondi in italiano con dati grezzi e numeri."
        )
    }

    /// Calls the model for `url` (already normalized).
    ///
    /// Empty text is not an error: the findings carry
    /// [`LIMITED_DATA_PLACEHOLDER`] so the analysis phase can still run.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UpstreamService`] if the call fails and
    /// [`PipelineError::Blocked`] if the prompt was refused.
    pub async fn gather(
        &self,
        client: &GeminiClient,
        url: &str,
    ) -> Result<ResearchFindings, PipelineError> {
        let request =
            GenerateContentRequest::from_prompt(Self::build_prompt(url)).with_google_search();

        let response = client
            .generate_content(&self.model, &request)
            .await
            .map_err(PipelineError::upstream(Phase::Research))?;

        if let Some(reason) = response.block_reason() {
            return Err(PipelineError::Blocked {
                phase: Phase::Research,
                reason: reason.to_string(),
            });
        }

        let sources = extract_sources(response.grounding_chunks());
        let search_queries = response.web_search_queries().to_vec();
        let research_text = response.text().unwrap_or_else(|| {
            tracing::warn!(
                url,
                model = %self.model,
                "research returned no text, using placeholder"
            );
            LIMITED_DATA_PLACEHOLDER.to_string()
        });

        tracing::info!(
            url,
            sources = sources.len(),
            queries = search_queries.len(),
            chars = research_text.len(),
            "research phase complete"
        );

        Ok(ResearchFindings {
            research_text,
            sources,
            search_queries,
        })
    }
}

/// Keeps grounding chunks whose web entry has both a title and a URI,
/// preserving service order.
#[must_use]
pub fn extract_sources(chunks: &[GroundingChunk]) -> Vec<Source> {
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let title = web.title.as_deref().filter(|t| !t.is_empty())?;
            let uri = web.uri.as_deref().filter(|u| !u.is_empty())?;
            Some(Source {
                title: title.to_string(),
                uri: uri.to_string(),
            })
        })
        .collect()
}
