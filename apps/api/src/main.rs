mod analysis;
mod config;
mod errors;
mod routes;
mod state;
mod textrazor;

use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::textrazor::{KeywordExtractor, OfflineExtractor, TextRazorClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparseable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SEO Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize keyword extractor (local fallback only when no API key is set)
    let extractor: Arc<dyn KeywordExtractor> = match &config.text_razor_api_key {
        Some(key) => {
            let client = TextRazorClient::new(
                key.clone(),
                config.text_razor_url.clone(),
                config.adapter_timeout,
            )?;
            info!(
                "TextRazor client initialized (timeout: {}s)",
                config.adapter_timeout.as_secs()
            );
            Arc::new(client)
        }
        None => {
            info!("No TEXT_RAZOR_API_KEY set, using local keyword extraction only");
            Arc::new(OfflineExtractor)
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        extractor,
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
