use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hr_api::config::Config;
use hr_api::embedding::{create_provider, EmbeddingProvider};
use hr_api::roster::Roster;
use hr_api::routes::build_router;
use hr_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("hr_api={},tower_http={}", &config.rust_log, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HR API v{}", env!("CARGO_PKG_VERSION"));

    let roster = Roster::load(&config.roster_path)?;

    // Model load and roster embedding are CPU-bound
    let embedding_config = config.embedding.clone();
    let provider: Arc<dyn EmbeddingProvider> =
        tokio::task::spawn_blocking(move || create_provider(&embedding_config))
            .await??
            .into();
    info!(
        "Embedding provider initialized ({}, {} dims)",
        provider.name(),
        provider.dimensions()
    );

    let build_config = config.clone();
    let state =
        tokio::task::spawn_blocking(move || AppState::build(&build_config, roster, provider))
            .await??;
    info!("LLM endpoint: {}", state.llm.api_url());
    info!(
        "Matching: top_k={} threshold={}",
        config.matching.top_k, config.matching.threshold
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
