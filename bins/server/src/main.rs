//! Granary API Server
//!
//! Main entry point for the Granary backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use granary_api::{AppState, create_router};
use granary_shared::AppConfig;
use granary_store::{Directory, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "granary=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");
    info!(policy = ?config.directory.owner_policy, "directory policy configured");

    // Create stores
    let directory = Arc::new(Directory::new(config.directory.owner_policy));
    let sessions = Arc::new(SessionStore::new(config.session.expiry_secs));

    // Create application state
    let state = AppState::new(directory, sessions);

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
