use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::Config;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur talking to the REST API.
///
/// These cover the full lifecycle of a request: network issues, HTTP
/// errors, timeouts, and malformed response bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body was not the expected JSON shape
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Base URL or endpoint path could not be parsed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

// ============================================================================
// ApiClient
// ============================================================================

/// HTTP client for the REST API.
///
/// One instance is shared (via `Arc`) by every store in a session. Endpoint
/// methods are defined per domain in the `endpoints` module; this type owns
/// the request plumbing: base-URL joining, the per-request timeout, status
/// checking, and JSON decoding.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Build a client from configuration with a fresh connection pool.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Build a client from configuration reusing an existing `reqwest` pool.
    pub fn with_http_client(config: &Config, http: reqwest::Client) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&config.base_url)?;
        // Endpoint paths are relative; a base without a trailing slash would
        // drop its last path segment on join.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Ok(Self {
            http,
            base_url,
            timeout: config.request_timeout(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// GET an endpoint and decode its JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.base_url.join(path)?;
        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| ApiError::Timeout)?
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }

        let bytes = response.bytes().await.map_err(ApiError::Network)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a bodyless request where only the status matters.
    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let url = self.base_url.join(path)?;
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| ApiError::Timeout)?
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        ok: bool,
    }

    fn client_for(uri: &str) -> ApiClient {
        let config = Config {
            base_url: uri.to_string(),
            ..Config::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_get_json_decodes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/probe"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let probe: Probe = client.get_json("probe", &[]).await.unwrap();
        assert_eq!(probe, Probe { ok: true });
    }

    #[tokio::test]
    async fn test_get_json_404_is_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let result: Result<Probe, _> = client.get_json("probe", &[]).await;
        match result.unwrap_err() {
            ApiError::HttpStatus(404) => {}
            e => panic!("Expected HttpStatus(404), got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_get_json_malformed_body_is_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let result: Result<Probe, _> = client.get_json("probe", &[]).await;
        match result.unwrap_err() {
            ApiError::Decode(_) => {}
            e => panic!("Expected Decode, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        use wiremock::matchers::header;

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer sekrit"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .mount(&server)
            .await;

        let config = Config {
            base_url: server.uri(),
            auth_token: Some("sekrit".to_string()),
            ..Config::default()
        };
        let client = ApiClient::new(&config).unwrap();
        let probe: Probe = client.get_json("probe", &[]).await.unwrap();
        assert!(probe.ok);
    }

    #[tokio::test]
    async fn test_base_url_without_trailing_slash_keeps_full_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nested/base/probe"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/nested/base", server.uri()));
        let probe: Probe = client.get_json("probe", &[]).await.unwrap();
        assert!(probe.ok);
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(ApiError::Url(_))));
    }
}
