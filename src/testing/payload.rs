//! Tagged response payloads
//!
//! Every consumer matches on the shape explicitly instead of probing a
//! dynamic value at runtime.

use serde_json::{Map, Value};

use crate::http::{ApiResponse, ResponseBody};

/// Shape of a response body as seen by the test steps
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    List(Vec<Value>),
    Map(Map<String, Value>),
    /// Non-JSON body, or JSON that is neither a list nor an object
    RawText(String),
    Empty,
}

impl Payload {
    pub fn from_response(response: &ApiResponse) -> Self {
        match &response.body {
            ResponseBody::Json(Value::Array(items)) => Payload::List(items.clone()),
            ResponseBody::Json(Value::Object(map)) => Payload::Map(map.clone()),
            ResponseBody::Json(other) => Payload::RawText(other.to_string()),
            ResponseBody::Text(text) if text.is_empty() => Payload::Empty,
            ResponseBody::Text(text) => Payload::RawText(text.clone()),
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Payload::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Map(map) => Some(map),
            _ => None,
        }
    }

    /// One-line summary for the trace
    pub fn describe(&self) -> String {
        match self {
            Payload::List(items) => {
                let mut line = format!("List with {} items", items.len());
                if let Some(first) = items.first() {
                    match first.as_object() {
                        Some(obj) if !obj.is_empty() => {
                            let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
                            line.push_str(&format!("; sample item keys: {:?}", keys));
                        }
                        _ => line.push_str("; sample item: empty"),
                    }
                }
                line
            }
            Payload::Map(map) => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                format!("Response keys: {:?}", keys)
            }
            Payload::RawText(text) => crate::common::truncate_for_display(text, 200),
            Payload::Empty => "Empty body".to_string(),
        }
    }
}

/// What a single recorded test hands back to its step
#[derive(Debug, Clone, PartialEq)]
pub struct TestOutcome {
    pub success: bool,
    pub payload: Payload,
}

impl TestOutcome {
    pub fn passed(payload: Payload) -> Self {
        Self {
            success: true,
            payload,
        }
    }

    /// A failed call always hands back an empty mapping
    pub fn failed() -> Self {
        Self {
            success: false,
            payload: Payload::Map(Map::new()),
        }
    }
}
