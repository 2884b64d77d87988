//! # vcred-api — Axum API Service for the Credential Registry
//!
//! HTTP surface over the credential lifecycle engine. Issuance delegates
//! signing to the external identity platform; verification resolves
//! issuer DIDs through the same platform.
//!
//! ## API Surface
//!
//! | Prefix                          | Module                  | Domain                 |
//! |---------------------------------|-------------------------|------------------------|
//! | `/v1/credentials/*`             | [`routes::credentials`] | Credential lifecycle   |
//! | `/v1/credentials/:id/render`    | [`routes::render`]      | Presentation formats   |
//! | `/openapi.json`                 | [`openapi`]             | OpenAPI 3.1 spec       |
//! | `/health/*`                     | (this module)           | Probes                 |
//!
//! ## OpenAPI
//!
//! Auto-generated OpenAPI 3.1 spec via utoipa derive macros at `/openapi.json`.

pub mod db;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::credentials::router())
        .merge(routes::render::router())
        .merge(openapi::router());

    Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe. Returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. Checks the database pool and identity platform;
/// returns 503 with per-dependency status when either is down. An
/// unconfigured dependency counts as ready (the API degrades per
/// endpoint instead).
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let database = match &state.db_pool {
        Some(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
        None => true,
    };
    let identity = match &state.identity {
        Some(client) => client.health_check().await,
        None => true,
    };

    let status = if database && identity {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = serde_json::json!({
        "status": if status == StatusCode::OK { "ready" } else { "degraded" },
        "database": database,
        "identity": identity,
    });
    (status, Json(body))
}
