//! Request/response types for the call executor

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// HTTP verbs the harness can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully-resolved request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    /// JSON body, sent for POST and PUT only
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

/// Response body after a JSON decode attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    /// Body that did not decode as JSON, kept in full
    Text(String),
}

/// Normalized outcome of a call that reached the server
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Build a response from raw body text, decoding JSON when possible
    pub fn from_text(status: u16, text: String) -> Self {
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        };
        Self { status, body }
    }

    pub fn json(status: u16, value: Value) -> Self {
        Self {
            status,
            body: ResponseBody::Json(value),
        }
    }

    /// Body rendered back to text, for trace output
    pub fn text(&self) -> String {
        match &self.body {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => text.clone(),
        }
    }
}

/// Failures where no usable response was obtained
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out after {secs} seconds")]
    Timeout { secs: u64 },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Error: {0}")]
    Unexpected(String),
}
