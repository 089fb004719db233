//! Call executor: one request in, one normalized outcome out

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::common::{Error, Result};

use super::types::{ApiRequest, ApiResponse, HttpMethod, TransportError};

/// Something that can carry a single API request to the server
///
/// Implementations make exactly one attempt per call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> std::result::Result<ApiResponse, TransportError>;
}

/// reqwest-backed transport sharing one client (and its headers) across a run
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl ReqwestTransport {
    /// Build a client with the JSON content type and a fixed per-call timeout
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("crisismap-tester/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                secs: self.timeout_secs,
            }
        } else if error.is_connect() {
            TransportError::Connection(error.to_string())
        } else {
            TransportError::Unexpected(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> std::result::Result<ApiResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if matches!(request.method, HttpMethod::Post | HttpMethod::Put) {
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
        }

        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");

        let response = builder.send().await.map_err(|e| {
            let classified = self.classify(e);
            tracing::warn!(url = %request.url, error = %classified, "request failed");
            classified
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            let classified = self.classify(e);
            tracing::warn!(url = %request.url, error = %classified, "failed to read response body");
            classified
        })?;

        tracing::debug!(status, bytes = text.len(), "response received");

        Ok(ApiResponse::from_text(status, text))
    }
}
