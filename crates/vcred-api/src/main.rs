//! # vcred-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the credential registry.
//! Binds to a configurable port (`VCRED_PORT`, default 8080).

use vcred_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    // Initialize database pool (optional, absent means in-memory only).
    let db_pool = vcred_api::db::init_pool().await.map_err(|e| {
        tracing::error!("database initialization failed: {e}");
        e
    })?;

    // Attempt to create the identity platform client from environment.
    let identity = match vcred_identity_client::IdentityApiConfig::from_env() {
        Ok(identity_config) => {
            tracing::info!("identity platform client configured");
            match vcred_identity_client::IdentityClient::new(identity_config) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::error!("failed to create identity platform client: {e}");
                    return Err(e.into());
                }
            }
        }
        Err(e) => {
            tracing::warn!(
                "identity platform client not configured: {e}. Issue and verify endpoints will return 503."
            );
            None
        }
    };

    let port = config.port;
    let state = AppState::with_config(config, identity, db_pool);

    // Hydrate in-memory stores from database (if connected).
    state.hydrate_from_db().await.map_err(|e| {
        tracing::error!("database hydration failed: {e}");
        e
    })?;

    let app = vcred_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("vcred API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
