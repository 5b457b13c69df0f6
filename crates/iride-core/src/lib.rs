//! Shared contract for the Iride SEO analysis pipeline: report types,
//! decode-and-validate, analysis stages, URL normalization and
//! configuration.

pub mod app_config;
pub mod config;
pub mod decode;
pub mod error;
pub mod insights;
pub mod normalize;
pub mod report;
pub mod stage;
mod whole_number;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use decode::{decode_report, decode_report_with_adjustments, Adjustment};
pub use error::{ConfigError, ReportFormatError, ValidationError};
pub use normalize::normalize_url;
pub use report::{
    ActionCategory, ActionItem, AnchorShare, AnchorType, Competitor, Effort, Impact, Keyword,
    Potential, SeoReport, Source, TrafficPoint,
};
pub use stage::AnalysisStage;
