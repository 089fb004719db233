//! CrisisMap API tester - integration-test harness for the CrisisMap
//! multi-disaster tracking API
//!
//! This library provides the call executor, test recorder, structural
//! validator and scenario sequencer used by the `crisismap-tester` binary.

pub mod cli;
pub mod commands;
pub mod common;
pub mod http;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{RunReport, ScenarioRunner, TestRecorder};
