//! Two-phase SEO analysis: search-grounded research with one model, then a
//! schema-constrained strategic report from a reasoning model.

pub mod analyzer;
pub mod error;
pub mod gatherer;
pub mod pipeline;
pub mod schema;
pub mod temporal;
pub mod types;

pub use analyzer::StrategicAnalyzer;
pub use error::{Phase, PipelineError, GENERIC_FAILURE_MESSAGE, REPORT_FORMAT_MESSAGE};
pub use gatherer::{extract_sources, IntelligenceGatherer};
pub use pipeline::AnalysisPipeline;
pub use schema::report_schema;
pub use temporal::TemporalContext;
pub use types::{ResearchFindings, LIMITED_DATA_PLACEHOLDER};
