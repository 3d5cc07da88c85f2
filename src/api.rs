//! Client for the Lorem Picsum listing endpoint

use crate::constants::USER_AGENT;
use crate::types::{FetchError, FetchRequest, ImageRecord};
use tracing::debug;

/// Builds `{base}/v2/list?page={page}&limit={limit}`.
pub fn list_url(base: &str, page: u32, limit: u32) -> String {
    format!(
        "{}/v2/list?page={}&limit={}",
        base.trim_end_matches('/'),
        page,
        limit
    )
}

#[derive(Clone)]
pub struct PicsumClient {
    client: reqwest::Client,
    base_url: String,
}

impl PicsumClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch one page of image metadata.
    pub async fn list(&self, request: FetchRequest) -> Result<Vec<ImageRecord>, FetchError> {
        let url = list_url(&self.base_url, request.page, request.limit);
        debug!(%url, "Fetching image list");

        let bytes = self.get_bytes(&url).await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Raw bytes of one photo
    pub async fn image_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.get_bytes(url).await
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves a single canned HTTP response and returns the base URL plus
    /// a handle resolving to the raw request head.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind should succeed");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept should succeed");
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.expect("read should succeed");
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write should succeed");
            socket.shutdown().await.ok();
            request
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn list_url_formats_query() {
        assert_eq!(
            list_url("https://picsum.photos", 3, 12),
            "https://picsum.photos/v2/list?page=3&limit=12"
        );
    }

    #[test]
    fn list_url_strips_trailing_slash() {
        assert_eq!(
            list_url("https://picsum.photos/", 1, 8),
            "https://picsum.photos/v2/list?page=1&limit=8"
        );
    }

    #[tokio::test]
    async fn list_parses_array_and_sends_page_and_limit() {
        let body = r#"[
            {"id":"10","author":"Paul Jarvis","width":2500,"height":1667,
             "url":"https://unsplash.com/photos/6J--NXulQCs",
             "download_url":"https://picsum.photos/id/10/2500/1667"},
            {"id":"11","author":"Paul Jarvis","width":2500,"height":1667,
             "url":"https://unsplash.com/photos/Cm7oKel-X2Q",
             "download_url":"https://picsum.photos/id/11/2500/1667"}
        ]"#;
        let (base, server) = serve_once("200 OK", body).await;
        let client = PicsumClient::new(base).expect("client should build");

        let records = client
            .list(FetchRequest { page: 2, limit: 2, generation: 0 })
            .await
            .expect("list should succeed");

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].download_url, "https://picsum.photos/id/11/2500/1667");
        let request = server.await.expect("server task");
        assert_eq!(
            request.lines().next(),
            Some("GET /v2/list?page=2&limit=2 HTTP/1.1")
        );
        assert!(request
            .to_ascii_lowercase()
            .contains(&format!("user-agent: {}", USER_AGENT)));
    }

    #[tokio::test]
    async fn list_maps_non_success_status() {
        let (base, _server) = serve_once("503 Service Unavailable", "").await;
        let client = PicsumClient::new(base).expect("client should build");

        let err = client
            .list(FetchRequest { page: 1, limit: 8, generation: 0 })
            .await
            .expect_err("503 should fail");
        assert_eq!(err, FetchError::Status(503));
    }

    #[tokio::test]
    async fn list_maps_malformed_body() {
        let (base, _server) = serve_once("200 OK", r#"{"error":"nope"}"#).await;
        let client = PicsumClient::new(base).expect("client should build");

        let err = client
            .list(FetchRequest { page: 1, limit: 8, generation: 0 })
            .await
            .expect_err("object body should fail");
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn list_maps_connection_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind should succeed");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        let client = PicsumClient::new(format!("http://{addr}")).expect("client should build");

        let err = client
            .list(FetchRequest { page: 1, limit: 8, generation: 0 })
            .await
            .expect_err("closed port should fail");
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
