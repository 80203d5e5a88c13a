//! Axum route handlers for the fit analyzer.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::analyzer::FitView;
use crate::errors::AppError;
use crate::models::submission::Submission;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub job_description: String,
}

/// GET /api/v1/sessions/:id/fit
pub async fn handle_get_fit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<FitView>, AppError> {
    let view = state
        .sessions
        .with_session(session_id, |s| s.fit.view())
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/fit
///
/// Runs one analysis and returns the rendered result area. A blank job
/// description returns the current view unchanged.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<FitView>, AppError> {
    let submission = state
        .sessions
        .with_session(session_id, |s| s.fit.begin(&request.job_description))
        .await?;

    let completion = match submission {
        Submission::Started(completion) => completion,
        Submission::Blank => return handle_get_fit(State(state), Path(session_id)).await,
        Submission::Busy => {
            return Err(AppError::Conflict(
                "An analysis is already running for this session".to_string(),
            ))
        }
    };

    // The completion runs in its own task so the session is resolved even if
    // the client disconnects and this handler is dropped. The registry lock
    // is not held while the completion is in flight.
    let task = tokio::spawn(async move {
        let result = state.llm.execute(&completion).await;
        state
            .sessions
            .with_session(session_id, |s| {
                s.fit.resolve(result);
                s.fit.view()
            })
            .await
    });

    let view = task
        .await
        .map_err(|e| anyhow::anyhow!("Completion task failed: {e}"))??;
    Ok(Json(view))
}
