use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portfolio_api::config::Config;
use portfolio_api::context::ResumeContext;
use portfolio_api::llm_client::{self, GeminiClient};
use portfolio_api::routes::build_router;
use portfolio_api::sessions::SessionRegistry;
use portfolio_api::showcase::Showcase;
use portfolio_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // Résumé context: fixed for the lifetime of the process
    let resume = ResumeContext::load(config.resume_path.as_deref())?;
    info!(
        "Resume context ready for {} ({} bytes serialized)",
        resume.subject_name(),
        resume.as_json().len()
    );

    let showcase = Showcase::load(config.showcase_path.as_deref())?;

    // Initialize completion client
    let llm = GeminiClient::new(
        config.gemini_api_key.clone(),
        &config.gemini_api_base,
        config.request_timeout,
    )?;
    info!(
        "Completion client initialized (model: {}, endpoint: {}, timeout: {}s)",
        llm_client::MODEL,
        llm.endpoint(),
        config.request_timeout.as_secs()
    );

    let state = AppState {
        llm: Arc::new(llm),
        sessions: SessionRegistry::new(resume.clone(), config.session_idle_timeout),
        resume,
        showcase: Arc::new(showcase),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        // The portfolio page is served from a different origin.
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
