use iride_core::Source;
use serde::{Deserialize, Serialize};

/// Research text used when the search-grounded call returns no text.
pub const LIMITED_DATA_PLACEHOLDER: &str = "Dati tecnici limitati.";

/// Output of the research phase: free-form findings plus the web pages the
/// model grounded them on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchFindings {
    pub research_text: String,
    /// Grounding sources in the order the service returned them.
    pub sources: Vec<Source>,
    /// Queries the model issued against the search tool.
    pub search_queries: Vec<String>,
}
