mod assistant;
mod config;
mod errors;
mod models;
mod render;
mod routes;
mod sections;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::client::{LlmClient, MODEL};
use crate::assistant::AssistantBackend;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::storage::FileStorage;
use crate::store::DocumentStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Document store over the data directory
    let storage = FileStorage::new(&config.data_dir)?;
    info!("Document storage at {}", storage.dir().display());
    let store = DocumentStore::load(Box::new(storage));

    // Assistant is optional; without a key its endpoints answer 503
    let assistant: Option<Arc<dyn AssistantBackend>> = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone())?;
            info!("Assistant enabled (model: {MODEL})");
            Some(Arc::new(client) as Arc<dyn AssistantBackend>)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; assistant disabled");
            None
        }
    };

    let app = build_router(AppState::new(store, assistant))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
