use async_trait::async_trait;
use movieverse_model::{MovieId, Payload};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use tracing::{debug, info};

use crate::backend::MovieBackend;
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::routes;

#[derive(Debug, Serialize)]
struct RecommendRequest<'a> {
    movie: &'a str,
}

/// Direct request/response wrapper around the backend. No retries.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("movieverse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ConfigError::HttpClient)?;

        info!(base_url = %config.base_url, "creating movie backend client");

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Join a backend path onto the base URL.
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let path = path.as_ref().trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    async fn execute(
        &self,
        request: RequestBuilder,
    ) -> Result<Payload, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "backend responded");

        if status.is_success() {
            return Ok(Payload::from_slice(&body)?);
        }

        Err(ApiError::Status {
            status,
            message: failure_message(status, &body),
        })
    }
}

fn failure_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(Payload::Error(message)) = Payload::from_slice(body) {
        return message;
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() || text.starts_with('<') {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        text.to_string()
    }
}

#[async_trait]
impl MovieBackend for ApiClient {
    async fn popular(&self) -> Result<Payload, ApiError> {
        let url = self.build_url(routes::POPULAR);
        debug!(%url, "fetching popular movies");
        self.execute(self.client.get(url)).await
    }

    async fn movie(&self, id: MovieId) -> Result<Payload, ApiError> {
        let url = self.build_url(routes::movie(id));
        debug!(%url, "fetching movie details");
        self.execute(self.client.get(url)).await
    }

    async fn recommend(&self, title: &str) -> Result<Payload, ApiError> {
        let url = self.build_url(routes::RECOMMEND);
        debug!(%url, title, "requesting recommendations");
        let request = self
            .client
            .post(url)
            .json(&RecommendRequest { movie: title });
        self.execute(request).await
    }

    async fn random(&self) -> Result<Payload, ApiError> {
        let url = self.build_url(routes::RANDOM);
        debug!(%url, "fetching a random movie");
        self.execute(self.client.get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn build_url_joins_paths() {
        let api = client("http://localhost:5000");
        assert_eq!(api.build_url("/popular"), "http://localhost:5000/popular");
        assert_eq!(
            api.build_url(routes::movie(MovieId(27205))),
            "http://localhost:5000/movie/27205"
        );

        let nested = client("https://example.com/api");
        assert_eq!(
            nested.build_url("random"),
            "https://example.com/api/random"
        );
    }

    #[test]
    fn failure_message_prefers_error_envelope() {
        assert_eq!(
            failure_message(
                StatusCode::NOT_FOUND,
                br#"{"error": "no such movie"}"#
            ),
            "no such movie"
        );
        assert_eq!(
            failure_message(StatusCode::BAD_GATEWAY, b"upstream down"),
            "upstream down"
        );
        assert_eq!(
            failure_message(
                StatusCode::INTERNAL_SERVER_ERROR,
                b"<!doctype html><title>500</title>"
            ),
            "Internal Server Error"
        );
        assert_eq!(failure_message(StatusCode::NOT_FOUND, b""), "Not Found");
    }
}
