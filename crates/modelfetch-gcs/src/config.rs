//! Public configuration for the GCS client.
//!
//! Builder-style, with an environment reader that follows the conventions
//! of Google's own client libraries (`STORAGE_EMULATOR_HOST`,
//! `GCE_METADATA_HOST`).

use std::fmt;

/// Emulator endpoint; when set, requests go there unauthenticated.
pub const EMULATOR_HOST_ENV: &str = "STORAGE_EMULATOR_HOST";
/// Static OAuth2 access token.
pub const STATIC_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";
/// Metadata server host override.
pub const METADATA_HOST_ENV: &str = "GCE_METADATA_HOST";

/// Production GCS endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";
/// Instance metadata server host.
pub const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";

/// Where bearer tokens come from.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Send no `Authorization` header (emulators, public buckets).
    Anonymous,
    /// Use a fixed access token.
    AccessToken(String),
    /// Fetch and cache tokens from the instance metadata server.
    MetadataServer {
        /// Host (optionally with scheme and port) of the metadata server
        host: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            Self::MetadataServer { host } => f
                .debug_struct("MetadataServer")
                .field("host", host)
                .finish(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::MetadataServer {
            host: DEFAULT_METADATA_HOST.to_string(),
        }
    }
}

/// Configuration for the GCS client.
///
/// # Example
///
/// ```
/// use modelfetch_gcs::{Credentials, GcsClientConfig};
///
/// let config = GcsClientConfig::new()
///     .with_chunk_size(8 * 1024 * 1024)
///     .with_credentials(Credentials::Anonymous);
/// ```
#[derive(Debug, Clone)]
pub struct GcsClientConfig {
    /// Base URL of the storage API
    pub(crate) endpoint: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Size of each ranged media request
    pub(crate) chunk_size: u64,
    /// Token source
    pub(crate) credentials: Credentials,
}

impl Default for GcsClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("modelfetch-gcs/", env!("CARGO_PKG_VERSION")).to_string(),
            chunk_size: 64 * 1024 * 1024,
            credentials: Credentials::default(),
        }
    }
}

impl GcsClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration through an arbitrary variable lookup.
    ///
    /// Resolution order for the endpoint and credentials:
    /// 1. `STORAGE_EMULATOR_HOST` → emulator endpoint, anonymous
    /// 2. `GOOGLE_OAUTH_ACCESS_TOKEN` → production endpoint, static token
    /// 3. otherwise → production endpoint, metadata server
    ///    (`GCE_METADATA_HOST` or `metadata.google.internal`)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let config = Self::new();

        if let Some(emulator) = get(EMULATOR_HOST_ENV) {
            return config
                .with_endpoint(emulator)
                .with_credentials(Credentials::Anonymous);
        }

        if let Some(token) = get(STATIC_TOKEN_ENV) {
            return config.with_credentials(Credentials::AccessToken(token));
        }

        let host = get(METADATA_HOST_ENV).unwrap_or_else(|| DEFAULT_METADATA_HOST.to_string());
        config.with_credentials(Credentials::MetadataServer { host })
    }

    /// Set the storage API endpoint.
    ///
    /// A bare `host:port` is treated as `http://host:port`.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the size of each ranged media request.
    ///
    /// Defaults to 64 MiB.
    #[must_use]
    pub const fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = bytes;
        self
    }

    /// Set the token source.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The configured chunk size.
    pub const fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// The configured token source.
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = GcsClientConfig::new();
        assert_eq!(config.endpoint, "https://storage.googleapis.com");
        assert!(config.user_agent.contains("modelfetch-gcs"));
        assert_eq!(config.chunk_size, 67_108_864);
        assert_eq!(
            config.credentials,
            Credentials::MetadataServer {
                host: "metadata.google.internal".to_string()
            }
        );
    }

    #[test]
    fn test_builder_pattern() {
        let config = GcsClientConfig::new()
            .with_endpoint("http://localhost:4443")
            .with_user_agent("test-agent")
            .with_chunk_size(1024)
            .with_credentials(Credentials::AccessToken("secret".to_string()));

        assert_eq!(config.endpoint(), "http://localhost:4443");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.chunk_size(), 1024);
        assert_eq!(
            config.credentials(),
            &Credentials::AccessToken("secret".to_string())
        );
    }

    #[test]
    fn test_emulator_wins_over_token() {
        let config = GcsClientConfig::from_lookup(lookup_from(&[
            ("STORAGE_EMULATOR_HOST", "localhost:4443"),
            ("GOOGLE_OAUTH_ACCESS_TOKEN", "tok"),
        ]));
        assert_eq!(config.endpoint, "localhost:4443");
        assert_eq!(config.credentials, Credentials::Anonymous);
    }

    #[test]
    fn test_static_token_from_env() {
        let config =
            GcsClientConfig::from_lookup(lookup_from(&[("GOOGLE_OAUTH_ACCESS_TOKEN", "tok")]));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.credentials, Credentials::AccessToken("tok".to_string()));
    }

    #[test]
    fn test_metadata_host_override() {
        let config =
            GcsClientConfig::from_lookup(lookup_from(&[("GCE_METADATA_HOST", "169.254.169.254")]));
        assert_eq!(
            config.credentials,
            Credentials::MetadataServer {
                host: "169.254.169.254".to_string()
            }
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", Credentials::AccessToken("very-secret".to_string()));
        assert!(!rendered.contains("very-secret"));
    }
}
