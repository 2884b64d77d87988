//! # vcred-identity-client — Typed client for the external identity platform
//!
//! The identity platform is the registry's external authority for key
//! material. It exposes two capabilities the registry delegates to:
//!
//! - **Signing** via `POST /utils/sign` — the platform holds issuer private
//!   keys; the registry never sees them.
//! - **DID resolution** via `GET /did/resolve/{did}` — returns the DID
//!   document carrying public key material for proof verification.
//!
//! ## Architecture
//!
//! This crate is the only path from the registry to identity platform
//! endpoints. Signing requests are never retried (a duplicate signature on
//! a non-idempotent operation is worse than a failed issue); resolution is
//! an idempotent read and retries with bounded exponential backoff.

pub mod config;
pub mod error;
pub mod resolver;
pub(crate) mod retry;
pub mod signer;

pub use config::IdentityApiConfig;
pub use error::IdentityApiError;
pub use resolver::ResolverClient;
pub use signer::SignerClient;

use std::time::Duration;

/// Top-level identity platform client. Holds the signer and resolver
/// sub-clients, sharing one connection pool.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    signer: SignerClient,
    resolver: ResolverClient,
}

impl IdentityClient {
    /// Create a new identity platform client from configuration.
    pub fn new(config: IdentityApiConfig) -> Result<Self, IdentityApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| IdentityApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            signer: SignerClient::new(http.clone(), config.base_url.clone()),
            resolver: ResolverClient::new(http, config.base_url),
        })
    }

    /// Access the signing sub-client.
    pub fn signer(&self) -> &SignerClient {
        &self.signer
    }

    /// Access the resolution sub-client.
    pub fn resolver(&self) -> &ResolverClient {
        &self.resolver
    }

    /// Check whether the identity platform is reachable.
    ///
    /// Any HTTP response counts as reachable; only transport failures
    /// (connection refused, timeout) count as unreachable.
    pub async fn health_check(&self) -> bool {
        self.resolver.ping().await
    }
}
