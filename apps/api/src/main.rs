mod analysis;
mod auth;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::extraction::HttpSkillExtractor;
use crate::auth::JwtVerifier;
use crate::config::Config;
use crate::llm_client::GeminiClient;
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

    info!("Starting SkillPath API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize extraction client
    let extractor = HttpSkillExtractor::new(config.extraction_service_url.clone())?;
    info!(
        "Extraction client initialized ({})",
        config.extraction_service_url
    );

    // Initialize LLM client
    let mut llm = GeminiClient::new(config.gemini_api_key.clone())?;
    if let Some(base_url) = &config.gemini_base_url {
        llm = llm.with_base_url(base_url.clone());
    }
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        extractor: Arc::new(extractor),
        llm: Arc::new(llm),
        jwt: JwtVerifier::new(&config.jwt_secret),
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
