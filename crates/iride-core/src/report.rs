//! The SEO report data contract.
//!
//! Field names follow the camelCase wire format the analysis model is asked
//! to produce. Every top-level field except [`SeoReport::sources`] is
//! mandatory when decoding; `sources` is attached by the pipeline after the
//! structured call returns.

use serde::{Deserialize, Serialize};

/// A complete structured SEO analysis for one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoReport {
    /// The normalized target URL.
    pub url: String,
    /// Technical audit aimed at webmasters.
    pub summary: String,
    /// Business framing of the same findings, aimed at the client.
    pub client_summary: String,
    /// Domain popularity, 0-100.
    #[serde(deserialize_with = "crate::whole_number::deserialize")]
    pub zoom_authority: u32,
    /// Domain trust, 0-100. Below `zoom_authority` signals manipulation risk.
    #[serde(deserialize_with = "crate::whole_number::deserialize")]
    pub zoom_trust: u32,
    #[serde(deserialize_with = "crate::whole_number::deserialize")]
    pub backlinks_count: u64,
    #[serde(deserialize_with = "crate::whole_number::deserialize")]
    pub referring_domains: u64,
    pub anchor_profile: Vec<AnchorShare>,
    pub traffic_trend: Vec<TrafficPoint>,
    pub top_keywords: Vec<Keyword>,
    /// Striking-distance keywords, nominally ranked 11-30.
    pub opportunity_keywords: Vec<Keyword>,
    pub competitors: Vec<Competitor>,
    pub recommendations: Vec<ActionItem>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// One slice of the anchor-text distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorShare {
    #[serde(rename = "type")]
    pub kind: AnchorType,
    #[serde(deserialize_with = "crate::whole_number::deserialize")]
    pub percentage: u32,
    pub example: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorType {
    Brand,
    #[serde(rename = "Exact Match", alias = "ExactMatch")]
    ExactMatch,
    Generic,
    #[serde(rename = "URL", alias = "Url")]
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficPoint {
    pub month: String,
    #[serde(deserialize_with = "crate::whole_number::deserialize")]
    pub visits: u64,
}

/// A ranked keyword. `potential` is only populated for opportunity keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub term: String,
    /// Search volume as the model phrased it, e.g. `"250"` or `"1.2k"`.
    pub volume: String,
    #[serde(deserialize_with = "crate::whole_number::deserialize")]
    pub difficulty: u32,
    #[serde(deserialize_with = "crate::whole_number::deserialize")]
    pub current_rank: u32,
    #[serde(deserialize_with = "crate::whole_number::deserialize_vec")]
    pub rank_history: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential: Option<Potential>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Potential {
    Alto,
    Medio,
    Basso,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    pub url: String,
    #[serde(deserialize_with = "crate::whole_number::deserialize")]
    pub overlap_score: u32,
    #[serde(deserialize_with = "crate::whole_number::deserialize")]
    pub common_keywords: u64,
}

/// A prioritized recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub effort: Effort,
    pub category: ActionCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Impact {
    Critico,
    Alto,
    Medio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effort {
    Alto,
    Medio,
    Basso,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    #[serde(rename = "Content Gap", alias = "ContentGap")]
    ContentGap,
    #[serde(rename = "Anchor Strategy", alias = "AnchorStrategy")]
    AnchorStrategy,
    #[serde(rename = "Tech Health", alias = "TechHealth")]
    TechHealth,
    Authority,
}

/// A web citation collected during the research phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

impl AnchorType {
    pub const ALL: [AnchorType; 4] = [
        AnchorType::Brand,
        AnchorType::ExactMatch,
        AnchorType::Generic,
        AnchorType::Url,
    ];

    /// Wire label, identical to the serde representation.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AnchorType::Brand => "Brand",
            AnchorType::ExactMatch => "Exact Match",
            AnchorType::Generic => "Generic",
            AnchorType::Url => "URL",
        }
    }
}

impl Potential {
    pub const ALL: [Potential; 3] = [Potential::Alto, Potential::Medio, Potential::Basso];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Potential::Alto => "Alto",
            Potential::Medio => "Medio",
            Potential::Basso => "Basso",
        }
    }
}

impl Impact {
    pub const ALL: [Impact; 3] = [Impact::Critico, Impact::Alto, Impact::Medio];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Impact::Critico => "Critico",
            Impact::Alto => "Alto",
            Impact::Medio => "Medio",
        }
    }
}

impl Effort {
    pub const ALL: [Effort; 3] = [Effort::Alto, Effort::Medio, Effort::Basso];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Effort::Alto => "Alto",
            Effort::Medio => "Medio",
            Effort::Basso => "Basso",
        }
    }
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 4] = [
        ActionCategory::ContentGap,
        ActionCategory::AnchorStrategy,
        ActionCategory::TechHealth,
        ActionCategory::Authority,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ActionCategory::ContentGap => "Content Gap",
            ActionCategory::AnchorStrategy => "Anchor Strategy",
            ActionCategory::TechHealth => "Tech Health",
            ActionCategory::Authority => "Authority",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),+) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

display_via_label!(AnchorType, Potential, Impact, Effort, ActionCategory);
