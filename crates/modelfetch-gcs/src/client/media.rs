//! Chunked media download.
//!
//! Objects are read with consecutive `Range` requests of `chunk_size`
//! bytes. The first `206` answer tells us the total size through
//! `Content-Range`; a `200` means the server ignored the range and sent
//! the whole object at once.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_RANGE, RANGE};
use reqwest::{Response, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::debug;

use super::{GcsClient, check_status};
use crate::endpoints::media_url;
use crate::error::{GcsError, GcsResult};

/// Write buffer size (2 MB) - reduces small writes for chunked bodies
const WRITE_BUFFER_SIZE: usize = 2 * 1024 * 1024;

impl GcsClient {
    /// Stream `gs://{bucket}/{key}` into `dest`, returning the bytes written.
    ///
    /// `dest` is created or truncated. On error it may hold a partial object.
    pub async fn download_to_file(&self, bucket: &str, key: &str, dest: &Path) -> GcsResult<u64> {
        let url = media_url(&self.endpoint, bucket, key)?;
        let file = File::create(dest).await?;
        let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

        let mut offset: u64 = 0;
        let mut total: Option<u64> = None;

        loop {
            let end = offset.saturating_add(self.chunk_size - 1);
            debug!(bucket, key, offset, end, "Requesting byte range");

            let response = self
                .authorized_get(&url)
                .await?
                .header(RANGE, format!("bytes={offset}-{end}"))
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::RANGE_NOT_SATISFIABLE && offset == 0 {
                // Zero-length object: there is no byte 0 to ask for.
                total = Some(0);
                break;
            }
            let response = check_status(response, bucket, key, &url)?;

            if status != StatusCode::PARTIAL_CONTENT {
                if offset != 0 {
                    return Err(GcsError::invalid_response(format!(
                        "expected 206 for range starting at {offset}, got {status}"
                    )));
                }
                offset = write_body(response, &mut writer).await?;
                break;
            }

            let object_size = match total {
                Some(size) => size,
                None => {
                    let size = content_range_total(&response).ok_or_else(|| {
                        GcsError::invalid_response("206 response without a usable Content-Range")
                    })?;
                    total = Some(size);
                    size
                }
            };

            let written = write_body(response, &mut writer).await?;
            if written == 0 {
                return Err(GcsError::invalid_response(format!(
                    "empty body for range starting at {offset}"
                )));
            }
            offset += written;

            if offset >= object_size {
                break;
            }
        }

        writer.flush().await?;
        writer.into_inner().sync_all().await?;

        if let Some(expected) = total {
            if offset != expected {
                return Err(GcsError::invalid_response(format!(
                    "received {offset} bytes, object is {expected} bytes"
                )));
            }
        }

        debug!(bucket, key, bytes = offset, "Download complete");
        Ok(offset)
    }
}

/// Stream a response body into `writer`, returning the bytes written.
async fn write_body<W>(response: Response, writer: &mut W) -> GcsResult<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    Ok(written)
}

fn content_range_total(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_range_total)
}

/// Total length from a `Content-Range` value such as `bytes 0-99/1000`.
///
/// Returns `None` for an unknown length (`*`) or a malformed header.
pub(crate) fn parse_content_range_total(value: &str) -> Option<u64> {
    let rest = value.trim().strip_prefix("bytes")?.trim_start();
    let (_, total) = rest.rsplit_once('/')?;
    total.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("bytes 0-99/1000"), Some(1000));
        assert_eq!(parse_content_range_total("bytes 100-199/200"), Some(200));
        assert_eq!(parse_content_range_total("bytes */4096"), Some(4096));
        assert_eq!(parse_content_range_total("bytes 0-99/*"), None);
        assert_eq!(parse_content_range_total("items 0-1/2"), None);
        assert_eq!(parse_content_range_total(""), None);
    }
}
