//! HTTP-level tests for the GCS client against a local mock server.

use modelfetch_core::ports::{ObjectStoreError, ObjectStorePort};
use modelfetch_gcs::{Credentials, GcsClient, GcsClientConfig, GcsError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const BUCKET: &str = "test-bucket";
const KEY: &str = "vae/ae.safetensors";
const OBJECT_PATH: &str = "/storage/v1/b/test-bucket/o/vae%2Fae.safetensors";

/// Serves `Range` requests out of an in-memory object.
struct RangeResponder {
    body: Vec<u8>,
}

impl Respond for RangeResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let len = self.body.len();
        let Some(range) = request
            .headers
            .get("range")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("bytes="))
        else {
            return ResponseTemplate::new(200).set_body_bytes(self.body.clone());
        };

        let (start, end) = range.split_once('-').expect("range has a dash");
        let start: usize = start.parse().expect("numeric start");
        let end: usize = end.parse().expect("numeric end");
        if start >= len {
            return ResponseTemplate::new(416).insert_header("content-range", format!("bytes */{len}"));
        }
        let end = end.min(len - 1);

        ResponseTemplate::new(206)
            .insert_header("content-range", format!("bytes {start}-{end}/{len}"))
            .set_body_bytes(self.body[start..=end].to_vec())
    }
}

fn client(server: &MockServer, credentials: Credentials, chunk_size: u64) -> GcsClient {
    let config = GcsClientConfig::new()
        .with_endpoint(server.uri())
        .with_chunk_size(chunk_size)
        .with_credentials(credentials);
    GcsClient::new(&config).unwrap()
}

fn media_requests(requests: &[Request]) -> usize {
    requests
        .iter()
        .filter(|r| r.url.query() == Some("alt=media"))
        .count()
}

#[tokio::test]
async fn object_size_reads_string_size_and_sends_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .and(header("authorization", "Bearer static-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": KEY,
            "bucket": BUCKET,
            "size": "335304388"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(
        &server,
        Credentials::AccessToken("static-token".to_string()),
        1024,
    );
    let size = client.object_size(BUCKET, KEY).await.unwrap();
    assert_eq!(size, Some(335_304_388));
}

#[tokio::test]
async fn object_size_missing_object_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client(&server, Credentials::Anonymous, 1024);

    let err = client.object_size(BUCKET, KEY).await.unwrap_err();
    assert!(matches!(err, GcsError::ObjectNotFound { ref key, .. } if key == KEY));

    let port_err = ObjectStorePort::object_size(&client, BUCKET, KEY)
        .await
        .unwrap_err();
    assert_eq!(port_err, ObjectStoreError::not_found(BUCKET, KEY));
}

#[tokio::test]
async fn download_reassembles_chunked_ranges() {
    let server = MockServer::start().await;
    let body: Vec<u8> = (0u8..10).collect();
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .and(query_param("alt", "media"))
        .respond_with(RangeResponder { body: body.clone() })
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("ae.safetensors.part");
    let client = client(&server, Credentials::Anonymous, 4);

    let written = client.download_to_file(BUCKET, KEY, &dest).await.unwrap();

    assert_eq!(written, 10);
    assert_eq!(std::fs::read(&dest).unwrap(), body);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(media_requests(&requests), 3);
}

#[tokio::test]
async fn download_single_chunk_when_chunk_exceeds_object() {
    let server = MockServer::start().await;
    let body = b"safetensors-bytes".to_vec();
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .and(query_param("alt", "media"))
        .respond_with(RangeResponder { body: body.clone() })
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out");
    let client = client(&server, Credentials::Anonymous, 64 * 1024 * 1024);

    let written = client.download_to_file(BUCKET, KEY, &dest).await.unwrap();

    assert_eq!(written, body.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), body);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(media_requests(&requests), 1);
}

#[tokio::test]
async fn download_accepts_full_body_when_range_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .and(query_param("alt", "media"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"whole object".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out");
    let client = client(&server, Credentials::Anonymous, 4);

    let written = client.download_to_file(BUCKET, KEY, &dest).await.unwrap();

    assert_eq!(written, 12);
    assert_eq!(std::fs::read(&dest).unwrap(), b"whole object");
}

#[tokio::test]
async fn download_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .and(query_param("alt", "media"))
        .respond_with(RangeResponder { body: Vec::new() })
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out");
    let client = client(&server, Credentials::Anonymous, 4);

    let written = client.download_to_file(BUCKET, KEY, &dest).await.unwrap();

    assert_eq!(written, 0);
    assert_eq!(std::fs::metadata(&dest).unwrap().len(), 0);
}

#[tokio::test]
async fn download_missing_object_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out");
    let client = client(&server, Credentials::Anonymous, 4);

    let err = ObjectStorePort::download_to_file(&client, BUCKET, KEY, &dest)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn forbidden_maps_to_auth_required() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client(&server, Credentials::AccessToken("expired".to_string()), 4);

    let err = ObjectStorePort::object_size(&client, BUCKET, KEY)
        .await
        .unwrap_err();
    assert!(matches!(err, ObjectStoreError::AuthRequired { .. }));
}

#[tokio::test]
async fn metadata_server_token_is_fetched_once_and_reused() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/computeMetadata/v1/instance/service-accounts/default/token",
        ))
        .and(header("metadata-flavor", "Google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.from-metadata",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(OBJECT_PATH))
        .and(header("authorization", "Bearer ya29.from-metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "size": "7" })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(
        &server,
        Credentials::MetadataServer { host: server.uri() },
        4,
    );

    assert_eq!(client.object_size(BUCKET, KEY).await.unwrap(), Some(7));
    assert_eq!(client.object_size(BUCKET, KEY).await.unwrap(), Some(7));
}

#[tokio::test]
async fn unreachable_metadata_server_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/computeMetadata/v1/instance/service-accounts/default/token",
        ))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(
        &server,
        Credentials::MetadataServer { host: server.uri() },
        4,
    );

    let err = ObjectStorePort::object_size(&client, BUCKET, KEY)
        .await
        .unwrap_err();
    assert!(matches!(err, ObjectStoreError::AuthRequired { .. }));
}
