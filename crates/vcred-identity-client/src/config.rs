//! Identity platform client configuration.
//!
//! Configures the base URL and request timeout for the external identity
//! platform. There is no default production URL: every deployment names
//! its own platform, so `IDENTITY_BASE_URL` is required.

use url::Url;

/// Configuration for connecting to the identity platform.
#[derive(Debug, Clone)]
pub struct IdentityApiConfig {
    /// Base URL of the identity platform. Both the signing endpoint
    /// (`/utils/sign`) and the resolver (`/did/resolve/{did}`) live under
    /// this base.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl IdentityApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `IDENTITY_BASE_URL` (required)
    /// - `IDENTITY_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("IDENTITY_BASE_URL").map_err(|_| ConfigError::MissingBaseUrl)?;
        let base_url = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidUrl("IDENTITY_BASE_URL".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            timeout_secs: std::env::var("IDENTITY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be
    /// parsed (should not occur for valid port numbers, but avoids
    /// `expect()`).
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            timeout_secs: 5,
        })
    }

    /// Configuration from an explicit URL string (used by tests against
    /// wiremock servers, whose port is only known at runtime).
    pub fn for_base_url(raw: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(raw)
            .map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            timeout_secs: 5,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `IDENTITY_BASE_URL` was not set.
    #[error("IDENTITY_BASE_URL environment variable is required")]
    MissingBaseUrl,
    /// A URL value failed to parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = IdentityApiConfig::local_mock(9000).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn for_base_url_rejects_garbage() {
        assert!(IdentityApiConfig::for_base_url("not a url").is_err());
    }

    #[test]
    fn for_base_url_accepts_https() {
        let cfg = IdentityApiConfig::for_base_url("https://identity.example.org").unwrap();
        assert_eq!(cfg.base_url.scheme(), "https");
    }
}
