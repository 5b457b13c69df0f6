//! Analysis session handlers: start a run, inspect it, reset it.

use axum::{extract::State, Extension, Json};
use iride_core::{normalize_url, SeoReport};
use iride_pipeline::{PipelineError, GENERIC_FAILURE_MESSAGE};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::middleware::RequestId;
use crate::session::{SessionBusy, SessionSnapshot};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(in crate::api) struct StartAnalysisRequest {
    pub url: String,
}

fn busy_error(req_id: &str, SessionBusy(stage): SessionBusy) -> ApiError {
    ApiError::new(
        req_id,
        "conflict",
        format!("un'analisi è già in corso (stage {stage})"),
    )
}

/// `POST /api/v1/analysis`: runs the pipeline and returns the report.
///
/// The run executes on its own task so the session is finalized even if
/// the client disconnects.
pub(in crate::api) async fn start_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<StartAnalysisRequest>,
) -> Result<Json<ApiResponse<SeoReport>>, ApiError> {
    let url = normalize_url(&body.url).map_err(|e| {
        let err = PipelineError::from(e);
        ApiError::new(req_id.0.clone(), err.code(), err.user_message())
    })?;

    state
        .session
        .try_start(&url)
        .await
        .map_err(|busy| busy_error(&req_id.0, busy))?;

    let session = state.session.clone();
    match tokio::spawn(run_analysis(state, url)).await {
        Ok(Ok(report)) => Ok(Json(ApiResponse {
            data: report,
            meta: ResponseMeta::new(req_id.0),
        })),
        Ok(Err(e)) => Err(ApiError::new(req_id.0, e.code(), e.user_message())),
        Err(e) => {
            tracing::error!(error = %e, "analysis task aborted");
            session.fail(GENERIC_FAILURE_MESSAGE.to_string()).await;
            Err(ApiError::new(
                req_id.0,
                "internal_error",
                GENERIC_FAILURE_MESSAGE,
            ))
        }
    }
}

/// Drives one pipeline run, mirroring its stages into the session.
async fn run_analysis(state: AppState, url: String) -> Result<SeoReport, PipelineError> {
    let (tx, mut rx) = mpsc::channel(8);
    let session = state.session.clone();
    let forwarder = tokio::spawn(async move {
        while let Some(stage) = rx.recv().await {
            session.advance(stage).await;
        }
    });

    let result = state.pipeline.run(&url, Some(&tx)).await;
    drop(tx);
    if let Err(e) = forwarder.await {
        tracing::debug!(error = %e, "stage forwarder ended abnormally");
    }

    match &result {
        Ok(report) => state.session.complete(report.clone()).await,
        Err(e) => state.session.fail(e.user_message()).await,
    }
    result
}

/// `GET /api/v1/analysis`: current session state.
pub(in crate::api) async fn get_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<SessionSnapshot>> {
    Json(ApiResponse {
        data: state.session.snapshot().await,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// `DELETE /api/v1/analysis`: discard the last result and return to idle.
pub(in crate::api) async fn reset_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, ApiError> {
    state
        .session
        .reset()
        .await
        .map_err(|busy| busy_error(&req_id.0, busy))?;

    Ok(Json(ApiResponse {
        data: state.session.snapshot().await,
        meta: ResponseMeta::new(req_id.0),
    }))
}
