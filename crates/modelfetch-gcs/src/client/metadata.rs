//! Object metadata lookup.

use tracing::debug;

use super::{GcsClient, check_status};
use crate::endpoints::object_url;
use crate::error::GcsResult;
use crate::models::ObjectResource;

impl GcsClient {
    /// Fetch the size of `gs://{bucket}/{key}`.
    pub async fn object_size(&self, bucket: &str, key: &str) -> GcsResult<Option<u64>> {
        let url = object_url(&self.endpoint, bucket, key)?;
        debug!(bucket, key, "Fetching object metadata");

        let response = self.authorized_get(&url).await?.send().await?;
        let response = check_status(response, bucket, key, &url)?;

        let body = response.bytes().await?;
        let object: ObjectResource = serde_json::from_slice(&body)?;
        object.size()
    }
}
