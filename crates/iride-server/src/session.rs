//! Single analysis session shared by the HTTP handlers.
//!
//! Holds at most one run at a time: its stage, and the report or error once
//! it finishes. A new run may start only when no run is in flight.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use iride_core::{AnalysisStage, SeoReport};
use serde::Serialize;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct SessionState {
    stage: AnalysisStage,
    url: Option<String>,
    report: Option<SeoReport>,
    error: Option<String>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

/// Point-in-time view of the session returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub stage: AnalysisStage,
    pub headline: &'static str,
    pub url: Option<String>,
    pub report: Option<SeoReport>,
    pub error: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Returned when an operation needs the session to be idle or finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionBusy(pub AnalysisStage);

#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    state: Arc<Mutex<SessionState>>,
}

impl AnalysisSession {
    /// Claims the session for a new run of `url`, discarding any previous
    /// result.
    pub async fn try_start(&self, url: &str) -> Result<(), SessionBusy> {
        let mut state = self.state.lock().await;
        if state.stage.is_running() {
            return Err(SessionBusy(state.stage));
        }
        *state = SessionState {
            stage: AnalysisStage::Searching,
            url: Some(url.to_string()),
            started_at: Some(Utc::now()),
            ..SessionState::default()
        };
        Ok(())
    }

    /// Applies an in-flight stage reported by the pipeline.
    ///
    /// Terminal stages are set by [`Self::complete`] and [`Self::fail`] so
    /// the stage and its result change together. Illegal transitions are
    /// ignored.
    pub async fn advance(&self, stage: AnalysisStage) {
        if !stage.is_running() {
            return;
        }
        let mut state = self.state.lock().await;
        if state.stage.can_transition_to(stage) {
            state.stage = stage;
        }
    }

    pub async fn complete(&self, report: SeoReport) {
        let mut state = self.state.lock().await;
        state.stage = AnalysisStage::Complete;
        state.report = Some(report);
        state.error = None;
        state.finished_at = Some(Utc::now());
    }

    pub async fn fail(&self, message: String) {
        let mut state = self.state.lock().await;
        state.stage = AnalysisStage::Error;
        state.report = None;
        state.error = Some(message);
        state.finished_at = Some(Utc::now());
    }

    /// Returns the session to `Idle`. Refused while a run is in flight.
    pub async fn reset(&self) -> Result<(), SessionBusy> {
        let mut state = self.state.lock().await;
        if state.stage.is_running() {
            return Err(SessionBusy(state.stage));
        }
        *state = SessionState::default();
        Ok(())
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            stage: state.stage,
            headline: state.stage.headline(),
            url: state.url.clone(),
            report: state.report.clone(),
            error: state.error.clone(),
            started_at: state.started_at,
            finished_at: state.finished_at,
        }
    }
}
