//! Test recorder
//!
//! Wraps the call executor with pass/fail bookkeeping. Every call through
//! [`TestRecorder::run_test`] counts as exactly one executed test.

use serde::Serialize;
use serde_json::Value;

use crate::common::{truncate_for_display, Error};
use crate::http::{ApiRequest, HttpMethod, Transport};

use super::console::Console;
use super::payload::{Payload, TestOutcome};
use super::tally::RunTally;

/// A single named API check
#[derive(Debug, Clone)]
pub struct TestCall {
    pub name: String,
    pub method: HttpMethod,
    /// Path under the API root; empty means the root itself
    pub endpoint: String,
    pub expected_status: u16,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl TestCall {
    pub fn new(name: impl Into<String>, method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            endpoint: endpoint.into(),
            expected_status: 200,
            body: None,
            query: Vec::new(),
        }
    }

    pub fn get(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Get, endpoint)
    }

    pub fn post(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Post, endpoint)
    }

    pub fn expect(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Why a recorded call failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallFailure {
    pub code: &'static str,
    pub message: String,
}

impl From<&Error> for CallFailure {
    fn from(e: &Error) -> Self {
        Self {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

/// Log entry for one executed test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub expected_status: u16,
    pub actual_status: Option<u16>,
    pub passed: bool,
    pub failure: Option<CallFailure>,
}

/// Trace line naming the method and target of a call
fn request_line(method: HttpMethod, url: &str) -> String {
    format!("{} {}", method, url)
}

/// Owns the transport and the run tally for a single run
pub struct TestRecorder<T> {
    transport: T,
    api_url: String,
    tally: RunTally,
    calls: Vec<CallRecord>,
    console: Console,
}

impl<T: Transport> TestRecorder<T> {
    /// `base_url` is the server root; calls go to `<base_url>/api/...`
    pub fn new(transport: T, base_url: &str, console: Console) -> Self {
        Self {
            transport,
            api_url: format!("{}/api", base_url.trim_end_matches('/')),
            tally: RunTally::default(),
            calls: Vec::new(),
            console,
        }
    }

    /// Resolve an endpoint under the API root
    pub fn url_for(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        if endpoint.is_empty() {
            format!("{}/", self.api_url)
        } else {
            format!("{}/{}", self.api_url, endpoint)
        }
    }

    /// Execute one call and score it against its expected status
    pub async fn run_test(&mut self, call: TestCall) -> TestOutcome {
        let url = self.url_for(&call.endpoint);

        self.console.section(&call.name);
        self.console.detail("Request", &request_line(call.method, &url));

        let request = ApiRequest {
            method: call.method,
            url: url.clone(),
            body: call.body,
            query: call.query,
        };

        let (outcome, actual_status, error) = match self.transport.execute(&request).await {
            Ok(response) => {
                self.console.detail("Status Code", &response.status.to_string());
                if response.status == call.expected_status {
                    let payload = Payload::from_response(&response);
                    self.console.pass(&format!(
                        "PASSED - Expected {}, got {}",
                        call.expected_status, response.status
                    ));
                    self.console.detail("Response", &payload.describe());
                    (TestOutcome::passed(payload), Some(response.status), None)
                } else {
                    let err = Error::status_mismatch(call.expected_status, response.status);
                    self.console.fail(&format!("FAILED - {}", err));
                    self.console
                        .detail("Response", &truncate_for_display(&response.text(), 500));
                    (TestOutcome::failed(), Some(response.status), Some(err))
                }
            }
            Err(transport_error) => {
                let err = Error::from(transport_error);
                self.console.fail(&format!("FAILED - {}", err));
                (TestOutcome::failed(), None, Some(err))
            }
        };

        self.tally.record(outcome.success);
        tracing::debug!(
            test = %call.name,
            passed = outcome.success,
            run = self.tally.tests_run,
            "test recorded"
        );

        self.calls.push(CallRecord {
            name: call.name,
            method: call.method,
            url,
            expected_status: call.expected_status,
            actual_status,
            passed: outcome.success,
            failure: error.as_ref().map(CallFailure::from),
        });

        outcome
    }

    pub fn tally(&self) -> RunTally {
        self.tally
    }

    pub fn calls(&self) -> &[CallRecord] {
        &self.calls
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn console(&self) -> Console {
        self.console
    }
}
