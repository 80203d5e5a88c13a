use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::showcase::{ProjectCard, SkillChart, TimelineEntry};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProjectFilterQuery {
    pub filter: Option<String>,
}

/// GET /api/v1/showcase/skills
pub async fn handle_skill_chart(State(state): State<AppState>) -> Json<SkillChart> {
    Json(state.showcase.skill_chart())
}

/// GET /api/v1/showcase/experience
pub async fn handle_timeline(State(state): State<AppState>) -> Json<Vec<TimelineEntry>> {
    Json(state.showcase.experience.clone())
}

/// GET /api/v1/showcase/experience/:index
pub async fn handle_select_experience(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<TimelineEntry>, AppError> {
    state
        .showcase
        .select_experience(index)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Experience entry {index} not found")))
}

/// GET /api/v1/showcase/projects?filter=
pub async fn handle_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectFilterQuery>,
) -> Json<Vec<ProjectCard>> {
    let cards = state
        .showcase
        .filter_projects(query.filter.as_deref())
        .into_iter()
        .cloned()
        .collect();
    Json(cards)
}
