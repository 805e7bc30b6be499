mod config;
mod document;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::drafter::{DocumentDrafter, GeminiDrafter};
use crate::layout::gb9704_2012;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
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

    info!("Starting Gongwen API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the drafter when an API key is configured; without one the
    // service still serves preview/export of previously generated documents
    let drafter: Option<Arc<dyn DocumentDrafter>> = match &config.gemini_api_key {
        Some(key) => {
            info!("Drafter initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(GeminiDrafter::new(GeminiClient::new(key.clone()))))
        }
        None => {
            warn!("GEMINI_API_KEY not set; generation requests will be rejected");
            None
        }
    };

    let layout = gb9704_2012();
    info!(
        "Layout: A4 {}x{}mm, {}pt line pitch",
        layout.page_width_mm, layout.page_height_mm, layout.line_pitch_pt
    );

    // Build app state
    let state = AppState {
        drafter,
        document: Arc::new(RwLock::new(None)),
        layout,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
