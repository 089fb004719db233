//! Scripted transport for unit tests

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::client::Transport;
use super::types::{ApiRequest, ApiResponse, HttpMethod, TransportError};

pub const STUB_BASE: &str = "http://stub.invalid";

type Reply = std::result::Result<ApiResponse, TransportError>;

struct Route {
    method: HttpMethod,
    url: String,
    query: Option<(String, String)>,
    reply: Reply,
}

/// Answers requests from a fixed route table and records what it saw
///
/// Routes with a query constraint win over bare routes. Anything
/// unmatched gets a 404.
#[derive(Default)]
pub struct StubTransport {
    routes: Vec<Route>,
    seen: Mutex<Vec<ApiRequest>>,
}

/// Look up a query parameter on a recorded request
pub fn query_value<'a>(request: &'a ApiRequest, key: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn api_url(endpoint: &str) -> String {
    format!("{}/api/{}", STUB_BASE, endpoint)
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, method: HttpMethod, endpoint: &str, reply: Reply) -> Self {
        self.routes.push(Route {
            method,
            url: api_url(endpoint),
            query: None,
            reply,
        });
        self
    }

    pub fn reply_json(self, method: HttpMethod, endpoint: &str, status: u16, body: Value) -> Self {
        self.reply(method, endpoint, Ok(ApiResponse::json(status, body)))
    }

    pub fn reply_filtered(
        mut self,
        endpoint: &str,
        key: &str,
        value: &str,
        status: u16,
        body: Value,
    ) -> Self {
        self.routes.push(Route {
            method: HttpMethod::Get,
            url: api_url(endpoint),
            query: Some((key.to_string(), value.to_string())),
            reply: Ok(ApiResponse::json(status, body)),
        });
        self
    }

    /// Every request executed so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    /// How many requests hit a given endpoint with a given method
    pub fn count(&self, method: HttpMethod, endpoint: &str) -> usize {
        let url = api_url(endpoint);
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: &ApiRequest) -> Reply {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request.clone());
        }

        let candidates = self
            .routes
            .iter()
            .filter(|route| route.method == request.method && route.url == request.url);

        let mut fallback = None;
        for route in candidates {
            match &route.query {
                Some((key, value)) if query_value(request, key) == Some(value.as_str()) => {
                    return route.reply.clone();
                }
                Some(_) => {}
                None => {
                    fallback.get_or_insert(route);
                }
            }
        }

        match fallback {
            Some(route) => route.reply.clone(),
            None => Ok(ApiResponse::json(404, serde_json::json!({"detail": "Not Found"}))),
        }
    }
}
