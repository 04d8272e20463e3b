mod ai_client;
mod assets;
mod assistant;
mod catalog;
mod config;
mod errors;
mod profile;
mod routes;
mod scripts;
mod state;
mod styling;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_client::GeminiClient;
use crate::assets::AssetNormalizer;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

const SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Styllen API v{}", env!("CARGO_PKG_VERSION"));

    let timeout = Duration::from_secs(config.ai_request_timeout_secs);

    // Initialize Gemini client
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_url.clone(),
        timeout,
    )?;
    if gemini.has_api_key() {
        info!(
            "Gemini client initialized (models: {}, {})",
            ai_client::TEXT_MODEL,
            ai_client::IMAGE_MODEL
        );
    } else {
        warn!("GEMINI_API_KEY is not set; AI features will return fallback content");
    }

    let assets = AssetNormalizer::new(timeout)?;

    let state = AppState::new(Arc::new(gemini), assets);

    let session_ttl = Duration::from_secs(config.session_ttl_secs.max(1));
    state
        .sessions
        .spawn_sweeper(session_ttl, session_ttl.min(SESSION_SWEEP_PERIOD));
    info!("Idle try-on sessions expire after {}s", session_ttl.as_secs());

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
