pub mod health;
pub mod sessions;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as fit;
use crate::chat::handlers as chat;
use crate::context::handlers as context;
use crate::showcase::handlers as showcase;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume", get(context::handle_get_resume))
        // Sessions: one chat transcript + one fit analyzer each
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route("/api/v1/sessions/:id", delete(sessions::handle_delete_session))
        .route(
            "/api/v1/sessions/:id/chat",
            get(chat::handle_get_chat).post(chat::handle_send_message),
        )
        .route(
            "/api/v1/sessions/:id/fit",
            get(fit::handle_get_fit).post(fit::handle_analyze),
        )
        // Showcase (static page sections)
        .route("/api/v1/showcase/skills", get(showcase::handle_skill_chart))
        .route("/api/v1/showcase/experience", get(showcase::handle_timeline))
        .route(
            "/api/v1/showcase/experience/:index",
            get(showcase::handle_select_experience),
        )
        .route("/api/v1/showcase/projects", get(showcase::handle_projects))
        .with_state(state)
}
