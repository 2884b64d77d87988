//! # Application State
//!
//! Shared state for all route handlers: the lifecycle and verification
//! engines (over one shared credential store), the identity platform
//! client, the optional Postgres pool, and configuration.
//!
//! The in-memory store is authoritative for reads. When a database pool
//! is present, writes go through to Postgres and the stores are hydrated
//! from it on startup.

use sqlx::PgPool;

use vcred_identity_client::IdentityClient;
use vcred_registry::{
    CredentialStore, LifecycleEngine, SequenceAllocator, TagMatchPolicy, VerificationEngine,
    CREDENTIAL_ENTITY_TYPE,
};

/// Application configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to (`VCRED_PORT`, default 8080).
    pub port: u16,
    /// How multi-tag searches combine their tags
    /// (`VCRED_TAG_MATCH`, `any` or `all`, default `any`).
    pub tag_match: TagMatchPolicy,
}

impl AppConfig {
    /// Build configuration from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("VCRED_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let tag_match = std::env::var("VCRED_TAG_MATCH")
            .ok()
            .map(|v| TagMatchPolicy::parse(&v))
            .unwrap_or_default();
        Self { port, tag_match }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            tag_match: TagMatchPolicy::default(),
        }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: the engines share their store and allocator via `Arc`
/// internals.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Credential lifecycle engine (issue, fetch, search, revoke).
    pub engine: LifecycleEngine,
    /// Verification engine over the same store.
    pub verification: VerificationEngine,

    /// Identity platform client for signing and DID resolution.
    /// When `None`, issue and verify endpoints return 503.
    pub identity: Option<IdentityClient>,

    /// PostgreSQL connection pool for durable persistence.
    /// When `None`, the API operates in in-memory-only mode.
    pub db_pool: Option<PgPool>,

    /// Application configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create a state with default configuration and no external
    /// dependencies. Used by tests and in-memory deployments.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None, None)
    }

    /// Create a state with the given configuration, optional identity
    /// client, and optional database pool.
    pub fn with_config(
        config: AppConfig,
        identity: Option<IdentityClient>,
        db_pool: Option<PgPool>,
    ) -> Self {
        let store = CredentialStore::new();
        let sequences = SequenceAllocator::new();
        Self {
            engine: LifecycleEngine::new(store.clone(), sequences),
            verification: VerificationEngine::new(store),
            identity,
            db_pool,
            config,
        }
    }

    /// Hydrate the in-memory store and sequence counters from the
    /// database. Called once on startup when a pool is available.
    pub async fn hydrate_from_db(&self) -> Result<(), String> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let records = crate::db::credentials::load_all(pool)
            .await
            .map_err(|e| format!("failed to load credentials: {e}"))?;
        let credential_count = records.len();
        let max_sequence = records.iter().map(|r| r.sequence_id).max();
        self.engine.store().hydrate(records);

        let counters = crate::db::counters::load_all(pool)
            .await
            .map_err(|e| format!("failed to load sequence counters: {e}"))?;
        for (entity_type, next_value) in counters {
            self.engine.sequences().hydrate(&entity_type, next_value);
        }
        // The counter row can lag behind the credentials table if a prior
        // process stopped between the two write-through statements; the
        // persisted records themselves set the floor. Also creates the
        // counter on a fresh database.
        let floor = max_sequence.map_or(1, |seq| seq + 1);
        self.engine.sequences().raise_to(CREDENTIAL_ENTITY_TYPE, floor);

        tracing::info!(
            credentials = credential_count,
            "hydrated in-memory store from database"
        );
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
