//! HTTP call executor
//!
//! Issues single requests against the API under test and normalizes the
//! result into a status plus decoded body, or a classified transport error.

pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod stub;

pub use client::{ReqwestTransport, Transport};
pub use types::{ApiRequest, ApiResponse, HttpMethod, ResponseBody, TransportError};
