use std::sync::Arc;

use crate::context::ResumeContext;
use crate::llm_client::CompletionClient;
use crate::sessions::SessionRegistry;
use crate::showcase::Showcase;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Default: GeminiClient. Tests inject a fake.
    pub llm: Arc<dyn CompletionClient>,
    pub resume: ResumeContext,
    pub showcase: Arc<Showcase>,
    pub sessions: SessionRegistry,
}
