//! Axum route handlers for the chat assistant.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::chat::controller::ChatView;
use crate::errors::AppError;
use crate::models::submission::Submission;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// GET /api/v1/sessions/:id/chat
pub async fn handle_get_chat(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ChatView>, AppError> {
    let view = state
        .sessions
        .with_session(session_id, |s| s.chat.view())
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/chat
///
/// Appends the user message, waits for the reply (or fallback) and returns the
/// updated transcript. Blank text returns the transcript unchanged.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ChatView>, AppError> {
    let submission = state
        .sessions
        .with_session(session_id, |s| s.chat.submit(&request.text))
        .await?;

    let completion = match submission {
        Submission::Started(completion) => completion,
        Submission::Blank => return handle_get_chat(State(state), Path(session_id)).await,
        Submission::Busy => {
            return Err(AppError::Conflict(
                "A reply is already pending for this session".to_string(),
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
                s.chat.resolve(result);
                s.chat.view()
            })
            .await
    });

    let view = task
        .await
        .map_err(|e| anyhow::anyhow!("Completion task failed: {e}"))??;
    Ok(Json(view))
}
