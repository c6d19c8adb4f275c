//! HTTP client for the news summarization backend

use crate::config::{OutgoingSettings, Settings};
use crate::search::{Article, FETCH_FAILED_MESSAGE};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure to obtain summaries from the backend
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned HTTP {status}")]
    Status {
        status: u16,
        /// Explicit `error` field from the response body, if any
        server_message: Option<String>,
    },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response has no summaries field")]
    MissingSummaries,
    #[error("invalid request timeout: {0} seconds")]
    InvalidTimeout(f64),
}

impl FetchError {
    /// Message to show the user
    ///
    /// The backend's own `error` string is surfaced verbatim; every other
    /// failure maps to the fixed generic message.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Status {
                server_message: Some(message),
                ..
            } => message.clone(),
            _ => FETCH_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Network collaborator that turns a topic into article summaries
#[async_trait]
pub trait NewsClient: Send + Sync {
    /// Fetch summaries for a topic
    async fn fetch_summaries(&self, topic: &str) -> Result<Vec<Article>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ThreadResponse {
    summaries: Option<Vec<Article>>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// reqwest-backed client for `POST {base_url}/api/news-thread`
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    /// Create a client for the given endpoint with default outgoing settings
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_settings(endpoint, &OutgoingSettings::default())
    }

    /// Create a client from the full application settings
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        Self::with_settings(settings.endpoint_url(), &settings.outgoing)
    }

    /// Create a client with custom outgoing settings
    pub fn with_settings(
        endpoint: impl Into<String>,
        settings: &OutgoingSettings,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .user_agent(format!("news-thread/{}", crate::VERSION))
            .gzip(true)
            .brotli(true);

        if let Some(secs) = settings.request_timeout {
            let timeout = Duration::try_from_secs_f64(secs)
                .ok()
                .filter(|timeout| !timeout.is_zero())
                .ok_or(FetchError::InvalidTimeout(secs))?;
            builder = builder.timeout(timeout);
        }

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let mut headers = HeaderMap::new();
        for (key, value) in &settings.extra_headers {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!("Ignoring invalid extra header {}", key),
            }
        }
        builder = builder.default_headers(headers);

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NewsClient for ApiClient {
    async fn fetch_summaries(&self, topic: &str) -> Result<Vec<Article>, FetchError> {
        debug!("POST {} topic={:?}", self.endpoint, topic);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "topic": topic }))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let server_message = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.is_empty());
            return Err(FetchError::Status {
                status: status.as_u16(),
                server_message,
            });
        }

        let body: ThreadResponse = serde_json::from_str(&text)?;
        let summaries = body.summaries.ok_or(FetchError::MissingSummaries)?;
        debug!("Backend returned {} summaries", summaries.len());
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(format!("{}/api/news-thread", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = ApiClient::new("http://localhost:5000/api/news-thread");
        assert!(client.is_ok());
    }

    #[test]
    fn test_rejects_unusable_timeouts() {
        for secs in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            let settings = OutgoingSettings {
                request_timeout: Some(secs),
                ..Default::default()
            };
            let result = ApiClient::with_settings("http://localhost:5000/api/news-thread", &settings);
            assert!(
                matches!(result, Err(FetchError::InvalidTimeout(_))),
                "timeout {} accepted",
                secs
            );
        }

        let settings = OutgoingSettings {
            request_timeout: Some(2.5),
            ..Default::default()
        };
        assert!(ApiClient::with_settings("http://localhost:5000/api/news-thread", &settings).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_summaries_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/news-thread"))
            .and(body_json(serde_json::json!({ "topic": "Mars rover" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "summaries": [{
                    "title": "Rover finds water",
                    "source": "Space News",
                    "url": "https://example.com/rover",
                    "summary": "Ice detected near the pole.",
                    "date": "2024-03-01",
                    "author": "J. Doe"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let articles = client_for(&server).fetch_summaries("Mars rover").await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Rover finds water");
        assert_eq!(articles[0].author.as_deref(), Some("J. Doe"));
    }

    #[tokio::test]
    async fn test_server_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "error": "Topic banned" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_summaries("x").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 400, .. }));
        assert_eq!(err.user_message(), "Topic banned");
    }

    #[tokio::test]
    async fn test_non_json_error_uses_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_summaries("x").await.unwrap_err();
        assert_eq!(err.user_message(), FETCH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_unparsable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_summaries("x").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(err.user_message(), FETCH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_missing_summaries_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_summaries("x").await.unwrap_err();
        assert!(matches!(err, FetchError::MissingSummaries));
    }

    #[tokio::test]
    async fn test_transport_error() {
        // Nothing listens on port 9 of localhost
        let client = ApiClient::new("http://127.0.0.1:9/api/news-thread").unwrap();
        let err = client.fetch_summaries("x").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.user_message(), FETCH_FAILED_MESSAGE);
    }
}
