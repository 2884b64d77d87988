//! DID resolution.
//!
//! Resolves DIDs to DID documents via `GET /did/resolve/{did}`. Resolution
//! is an idempotent read, so transient transport failures retry with
//! bounded exponential backoff.

use url::Url;

use vcred_core::Did;
use vcred_vc::DidDocument;

use crate::error::IdentityApiError;
use crate::retry::retry_send;

/// Client for the identity platform resolver endpoint.
#[derive(Debug, Clone)]
pub struct ResolverClient {
    http: reqwest::Client,
    base: Url,
}

impl ResolverClient {
    pub(crate) fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Resolve a DID to its DID document.
    ///
    /// # Errors
    ///
    /// - [`IdentityApiError::Http`] after retries are exhausted.
    /// - [`IdentityApiError::Api`] when the platform returns a non-2xx
    ///   status (e.g. 404 for an unknown DID).
    /// - [`IdentityApiError::Deserialization`] when the body is not a DID
    ///   document.
    pub async fn resolve(&self, did: &Did) -> Result<DidDocument, IdentityApiError> {
        let endpoint = "did/resolve";
        let url = self
            .base
            .join(&format!("did/resolve/{}", did.as_str()))
            .map_err(|e| {
                IdentityApiError::Config(crate::config::ConfigError::InvalidUrl(
                    endpoint.to_string(),
                    e.to_string(),
                ))
            })?;

        let resp = retry_send(|| self.http.get(url.clone()).send())
            .await
            .map_err(|e| IdentityApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IdentityApiError::Api {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| IdentityApiError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })
    }

    /// Reachability probe: any HTTP response counts as reachable.
    pub(crate) async fn ping(&self) -> bool {
        self.http.get(self.base.clone()).send().await.is_ok()
    }
}
