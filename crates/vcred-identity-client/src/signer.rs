//! Proof signing delegation.
//!
//! The identity platform holds issuer private keys and signs credential
//! payloads on the registry's behalf via `POST /utils/sign`. The registry
//! sends the canonical payload and receives the hex-encoded signature that
//! becomes the credential's `proofValue`.
//!
//! Signing is NOT retried. The call is not idempotent from the platform's
//! point of view, and the issue pipeline treats any failure as fatal for
//! the request (no record is persisted, no sequence id is consumed).

use serde::{Deserialize, Serialize};
use url::Url;

use vcred_core::{CanonicalBytes, Did};

use crate::error::IdentityApiError;

/// Client for the identity platform signing endpoint.
#[derive(Debug, Clone)]
pub struct SignerClient {
    http: reqwest::Client,
    base: Url,
}

/// Request body for `POST /utils/sign`.
#[derive(Debug, Serialize)]
struct SignRequest<'a> {
    /// DID whose key the platform should sign with.
    #[serde(rename = "DID")]
    did: &'a str,
    /// Canonical credential payload, as a JSON string.
    payload: &'a str,
}

/// Response body from `POST /utils/sign`.
#[derive(Debug, Deserialize)]
struct SignResponse {
    /// Hex-encoded signature bytes.
    signed: String,
}

impl SignerClient {
    pub(crate) fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Sign a canonical payload with the key the platform holds for
    /// `signing_did`. Returns the hex-encoded signature.
    ///
    /// # Errors
    ///
    /// - [`IdentityApiError::Http`] on transport failure (no retry).
    /// - [`IdentityApiError::Api`] when the platform rejects the request.
    /// - [`IdentityApiError::Deserialization`] when the response body does
    ///   not carry a `signed` field.
    pub async fn sign(
        &self,
        signing_did: &Did,
        payload: &CanonicalBytes,
    ) -> Result<String, IdentityApiError> {
        let endpoint = "utils/sign";
        let url = self
            .base
            .join(endpoint)
            .map_err(|e| IdentityApiError::Config(crate::config::ConfigError::InvalidUrl(
                endpoint.to_string(),
                e.to_string(),
            )))?;

        let body = SignRequest {
            did: signing_did.as_str(),
            payload: payload.as_str(),
        };

        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
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

        let signed: SignResponse =
            resp.json()
                .await
                .map_err(|e| IdentityApiError::Deserialization {
                    endpoint: endpoint.into(),
                    source: e,
                })?;

        Ok(signed.signed)
    }
}
