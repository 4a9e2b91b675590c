//! Access token acquisition.
//!
//! Tokens from the metadata server are cached and shared by every worker;
//! the cache sits behind an async mutex so only one refresh is in flight.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::config::Credentials;
use crate::endpoints::{metadata_token_url, parse_base};
use crate::error::{GcsError, GcsResult};
use crate::models::TokenResponse;

/// Refresh this long before the server-reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct CachedToken {
    token: String,
    refresh_at: Instant,
}

#[derive(Debug)]
enum Source {
    Anonymous,
    Static(String),
    MetadataServer { token_url: Url },
}

/// Produces bearer tokens for storage requests.
#[derive(Debug)]
pub(crate) struct TokenProvider {
    source: Source,
    cache: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub(crate) fn new(credentials: &Credentials) -> GcsResult<Self> {
        let source = match credentials {
            Credentials::Anonymous => Source::Anonymous,
            Credentials::AccessToken(token) => Source::Static(token.clone()),
            Credentials::MetadataServer { host } => Source::MetadataServer {
                token_url: metadata_token_url(&parse_base(host)?)?,
            },
        };
        Ok(Self {
            source,
            cache: Mutex::new(None),
        })
    }

    /// Current bearer token, or `None` for anonymous access.
    pub(crate) async fn bearer(&self, http: &reqwest::Client) -> GcsResult<Option<String>> {
        let token_url = match &self.source {
            Source::Anonymous => return Ok(None),
            Source::Static(token) => return Ok(Some(token.clone())),
            Source::MetadataServer { token_url } => token_url,
        };

        let mut cache = self.cache.lock().await;
        if let Some(cached) = (*cache).as_ref().filter(|c| Instant::now() < c.refresh_at) {
            return Ok(Some(cached.token.clone()));
        }

        let fetched = fetch_metadata_token(http, token_url).await?;
        let lifetime = Duration::from_secs(fetched.expires_in).saturating_sub(EXPIRY_MARGIN);
        debug!(expires_in = fetched.expires_in, "Fetched access token from metadata server");

        let token = fetched.access_token;
        *cache = Some(CachedToken {
            token: token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(Some(token))
    }
}

async fn fetch_metadata_token(http: &reqwest::Client, url: &Url) -> GcsResult<TokenResponse> {
    let response = http
        .get(url.as_str())
        .header("Metadata-Flavor", "Google")
        .send()
        .await
        .map_err(|e| GcsError::Auth {
            message: format!("metadata server unreachable: {e}"),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GcsError::Auth {
            message: format!("metadata server returned {status}"),
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
