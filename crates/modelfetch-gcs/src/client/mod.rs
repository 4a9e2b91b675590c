//! GCS client for reading object metadata and media.
//!
//! One client is shared by every worker. The underlying `reqwest::Client`
//! pools connections and the token cache is internally synchronized, so
//! all methods take `&self`.

mod media;
mod metadata;

use reqwest::{RequestBuilder, Response, StatusCode};
use url::Url;

use crate::auth::TokenProvider;
use crate::config::GcsClientConfig;
use crate::endpoints::parse_base;
use crate::error::{GcsError, GcsResult};

/// Client for the Google Cloud Storage JSON API.
#[derive(Debug)]
pub struct GcsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) endpoint: Url,
    pub(crate) chunk_size: u64,
    auth: TokenProvider,
}

impl GcsClient {
    /// Create a new client with the given configuration.
    ///
    /// No request is made here; credentials are resolved lazily on first use.
    pub fn new(config: &GcsClientConfig) -> GcsResult<Self> {
        // No overall timeout: large objects stream for as long as they need.
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            endpoint: parse_base(&config.endpoint)?,
            chunk_size: config.chunk_size.max(1),
            auth: TokenProvider::new(&config.credentials)?,
        })
    }

    /// The parsed storage endpoint.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build a GET request carrying the current bearer token, if any.
    pub(crate) async fn authorized_get(&self, url: &Url) -> GcsResult<RequestBuilder> {
        let mut request = self.http.get(url.as_str());
        if let Some(token) = self.auth.bearer(&self.http).await? {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }
}

/// Turn non-success statuses into errors.
///
/// 404 is reported as a missing object rather than a generic failure.
pub(crate) fn check_status(
    response: Response,
    bucket: &str,
    key: &str,
    url: &Url,
) -> GcsResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(GcsError::ObjectNotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
    }
    Err(GcsError::ApiRequestFailed {
        status: status.as_u16(),
        url: url.to_string(),
    })
}
