mod config;
mod docx;
mod errors;
mod extract;
mod llm_client;
mod markdown;
mod pipeline;
mod routes;
mod search;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::session::RunStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first. Model credentials are resolved per run, so
    // the server still starts without them and surfaces the error to users.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Architect API v{}", env!("CARGO_PKG_VERSION"));

    if config.gemini_api_key.is_none() || config.groq_api_key.is_none() {
        info!("Model credentials incomplete — runs will be rejected until both keys are set");
    }
    if config.serper_api_key.is_none() {
        info!("SERPER_API_KEY not set — research unit will run without web search");
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        runs: RunStore::new(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
