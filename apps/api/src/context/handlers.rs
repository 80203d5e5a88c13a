use axum::{extract::State, Json};

use crate::context::models::Resume;
use crate::state::AppState;

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<Resume> {
    Json(state.resume.resume().clone())
}
