//! The one GET-and-decode step every network operation goes through.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::{QuiverError, Result};

/// Issue a GET for `url`, require a 2xx status, and decode the body as `T`.
///
/// Nothing is logged here; callers log with their own context before
/// returning the error.
pub(crate) async fn get_json<T: DeserializeOwned>(client: &Client, url: Url) -> Result<T> {
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(QuiverError::Fetch {
            url: url.to_string(),
            status,
        });
    }

    let body = response.bytes().await?;
    decode(url.as_str(), &body)
}

/// Decode a JSON body, tagging failures with the resource they came from.
pub(crate) fn decode<T: DeserializeOwned>(resource: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| QuiverError::Decode {
        resource: resource.to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Stub server for tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod stub {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Client that talks to the stub directly, whatever proxy the
    /// environment configures.
    pub(crate) fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    /// A single-shot HTTP server on an ephemeral port.  It answers the first
    /// connection with the canned response and reports the request line.
    pub(crate) struct StubServer {
        pub base: String,
        request_line: oneshot::Receiver<String>,
    }

    impl StubServer {
        pub(crate) async fn start(status: u16, body: &str) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let (tx, rx) = oneshot::channel();
            let body = body.to_string();

            tokio::spawn(async move {
                let (mut stream, _) = listener.accept().await.unwrap();

                let mut buffer = Vec::new();
                let mut chunk = [0u8; 4096];
                loop {
                    let n = stream.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    buffer.extend_from_slice(&chunk[..n]);
                    if buffer.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let request = String::from_utf8_lossy(&buffer);
                let line = request.lines().next().unwrap_or_default().to_string();
                let _ = tx.send(line);

                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.ok();
            });

            StubServer {
                base: format!("http://{addr}"),
                request_line: rx,
            }
        }

        /// `GET /path?query HTTP/1.1` as received.
        pub(crate) async fn request_line(self) -> String {
            self.request_line.await.unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::stub::{client, StubServer};
    use super::*;

    #[tokio::test]
    async fn returns_decoded_body_on_success() {
        let server = StubServer::start(200, r#"{"ok":true}"#).await;
        let url = Url::parse(&format!("{}/ping", server.base)).unwrap();

        let value: serde_json::Value = get_json(&client(), url).await.unwrap();

        assert_eq!(value["ok"], true);
        assert_eq!(server.request_line().await, "GET /ping HTTP/1.1");
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let server = StubServer::start(404, r#"{"detail":"Not Found"}"#).await;
        let url = Url::parse(&format!("{}/missing", server.base)).unwrap();

        let err = get_json::<serde_json::Value>(&client(), url)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
        assert!(err.to_string().contains("status: 404"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = StubServer::start(200, "{not json").await;
        let url = Url::parse(&format!("{}/broken", server.base)).unwrap();

        let err = get_json::<serde_json::Value>(&client(), url)
            .await
            .unwrap_err();

        assert!(matches!(err, QuiverError::Decode { .. }));
    }

    #[test]
    fn decode_tags_the_resource() {
        let err = decode::<Vec<u32>>("waveform.json", b"[1, \"two\"]").unwrap_err();
        match err {
            QuiverError::Decode { resource, .. } => assert_eq!(resource, "waveform.json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
