//! Plain HTTP GET client for OTP feeds.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use crate::domain::Feed;
use crate::error::FeedError;
use crate::port::RecordSource;

/// Timeouts applied to every feed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpFeedConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpFeedConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Fetches feed bodies over HTTP.
pub struct HttpRecordSource {
    http: HttpClient,
}

impl HttpRecordSource {
    #[must_use]
    pub fn new(config: HttpFeedConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("otprelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self { http }
    }

    fn unreachable(feed: &Feed, err: &reqwest::Error) -> FeedError {
        let reason = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };
        FeedError::Unreachable {
            feed: feed.label.clone(),
            reason,
        }
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self, feed: &Feed) -> Result<String, FeedError> {
        let response = self
            .http
            .get(&feed.url)
            .send()
            .await
            .map_err(|e| Self::unreachable(feed, &e))?;

        let response = response
            .error_for_status()
            .map_err(|e| Self::unreachable(feed, &e))?;

        let body = response
            .text()
            .await
            .map_err(|e| Self::unreachable(feed, &e))?;

        debug!(feed = %feed.label, bytes = body.len(), "Fetched feed");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a random local port.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0_u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/api/sms")
    }

    #[tokio::test]
    async fn returns_body_on_success() {
        let url = serve_once("200 OK", r#"{"aaData":[]}"#).await;
        let source = HttpRecordSource::new(HttpFeedConfig::default());

        let body = source.fetch(&Feed::new("API 1", url)).await.unwrap();

        assert_eq!(body, r#"{"aaData":[]}"#);
    }

    #[tokio::test]
    async fn error_status_maps_to_feed_unreachable() {
        let url = serve_once("502 Bad Gateway", "upstream down").await;
        let source = HttpRecordSource::new(HttpFeedConfig::default());

        let err = source.fetch(&Feed::new("API 1", url)).await.unwrap_err();

        assert!(matches!(err, FeedError::Unreachable { .. }));
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_feed_unreachable() {
        let source = HttpRecordSource::new(HttpFeedConfig {
            timeout: Duration::from_millis(500),
            connect_timeout: Duration::from_millis(200),
        });
        // Port 9 on localhost is discard; nothing should be listening.
        let feed = Feed::new("local", "http://127.0.0.1:9/api/sms");

        let err = source.fetch(&feed).await.unwrap_err();

        assert!(matches!(err, FeedError::Unreachable { ref feed, .. } if feed == "local"));
    }

    #[tokio::test]
    async fn invalid_url_maps_to_feed_unreachable() {
        let source = HttpRecordSource::new(HttpFeedConfig::default());
        let feed = Feed::new("broken", "not a url");

        let err = source.fetch(&feed).await.unwrap_err();

        assert!(matches!(err, FeedError::Unreachable { .. }));
    }
}
