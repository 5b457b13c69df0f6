use serde::{Deserialize, Serialize};

/// Progress of one analysis run, as observed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisStage {
    #[default]
    Idle,
    /// Phase 1: search-grounded research.
    Searching,
    /// Phase 2: structured strategic analysis.
    Thinking,
    Complete,
    Error,
}

impl AnalysisStage {
    /// `true` while a run is in flight.
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, AnalysisStage::Searching | AnalysisStage::Thinking)
    }

    /// `true` once a run has ended, successfully or not.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, AnalysisStage::Complete | AnalysisStage::Error)
    }

    /// Whether `self → next` is a legal transition.
    ///
    /// `Idle|Complete|Error → Searching → Thinking → Complete`, either running
    /// stage may fail into `Error`, and a finished run may be reset to `Idle`.
    #[must_use]
    pub fn can_transition_to(self, next: AnalysisStage) -> bool {
        use AnalysisStage::{Complete, Error, Idle, Searching, Thinking};
        matches!(
            (self, next),
            (Idle | Complete | Error, Searching)
                | (Searching, Thinking)
                | (Thinking, Complete)
                | (Searching | Thinking, Error)
                | (Complete | Error, Idle)
        )
    }

    /// Italian headline shown while the stage is active.
    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            AnalysisStage::Idle => "In attesa",
            AnalysisStage::Searching => "Raccolta Intelligence...",
            AnalysisStage::Thinking => "Analisi Strategica Profonda...",
            AnalysisStage::Complete => "Analisi completata",
            AnalysisStage::Error => "Analisi Fallita",
        }
    }
}

impl std::fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisStage::Idle => write!(f, "IDLE"),
            AnalysisStage::Searching => write!(f, "SEARCHING"),
            AnalysisStage::Thinking => write!(f, "THINKING"),
            AnalysisStage::Complete => write!(f, "COMPLETE"),
            AnalysisStage::Error => write!(f, "ERROR"),
        }
    }
}
