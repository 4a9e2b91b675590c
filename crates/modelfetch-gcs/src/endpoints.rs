//! URL construction for the storage API and the metadata server.

use url::Url;

use crate::error::{GcsError, GcsResult};

/// Parse an endpoint, assuming `http://` when no scheme is given.
///
/// Emulator and metadata hosts are usually given as bare `host:port`.
pub(crate) fn parse_base(raw: &str) -> GcsResult<Url> {
    let raw = raw.trim().trim_end_matches('/');
    let url = if raw.contains("://") {
        Url::parse(raw)?
    } else {
        Url::parse(&format!("http://{raw}"))?
    };
    if url.cannot_be_a_base() {
        return Err(GcsError::InvalidEndpoint {
            endpoint: raw.to_string(),
        });
    }
    Ok(url)
}

/// Append path segments, percent-encoding each one (so `/` in an object
/// key becomes `%2F`).
fn with_segments(base: &Url, segments: &[&str]) -> GcsResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| GcsError::InvalidEndpoint {
            endpoint: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// JSON API resource URL of an object.
pub(crate) fn object_url(endpoint: &Url, bucket: &str, key: &str) -> GcsResult<Url> {
    with_segments(endpoint, &["storage", "v1", "b", bucket, "o", key])
}

/// Media download URL of an object.
pub(crate) fn media_url(endpoint: &Url, bucket: &str, key: &str) -> GcsResult<Url> {
    let mut url = object_url(endpoint, bucket, key)?;
    url.query_pairs_mut().append_pair("alt", "media");
    Ok(url)
}

/// Default service account token URL on the metadata server.
pub(crate) fn metadata_token_url(metadata_base: &Url) -> GcsResult<Url> {
    with_segments(
        metadata_base,
        &[
            "computeMetadata",
            "v1",
            "instance",
            "service-accounts",
            "default",
            "token",
        ],
    )
}
