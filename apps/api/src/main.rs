mod config;
mod document;
mod errors;
mod evaluation;
mod feedback;
mod llm_client;
mod resume;
mod roles;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::feedback::LlmFeedbackGenerator;
use crate::llm_client::LlmClient;
use crate::resume::structurer::LlmResumeStructurer;
use crate::roles::RoleCatalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Role catalog is loaded once and shared read-only
    let catalog = RoleCatalog::load(&config.roles_catalog_path)
        .with_context(|| format!("Loading role catalog from {}", config.roles_catalog_path))?;
    info!(
        "Role catalog loaded: {} categories, {} roles",
        catalog.categories().count(),
        catalog.role_count()
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.genai_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState::new(
        &config,
        catalog,
        Arc::new(LlmResumeStructurer(llm.clone())),
        Arc::new(LlmFeedbackGenerator(llm)),
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
