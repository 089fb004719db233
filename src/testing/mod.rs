//! API test engine
//!
//! Records individual API checks, validates disaster payloads and runs the
//! fixed CrisisMap scenario sequence against a [`crate::http::Transport`].

mod console;
mod disaster;
mod payload;
mod recorder;
mod scenario;
mod tally;
mod validator;

pub use console::Console;
pub use disaster::{DisasterType, Severity, REQUIRED_FIELDS};
pub use payload::{Payload, TestOutcome};
pub use recorder::{CallFailure, CallRecord, TestCall, TestRecorder};
pub use scenario::{RunReport, ScenarioRunner, Step, StepReport};
pub use tally::{RunTally, Verdict};
pub use validator::{check_disasters, check_records, report_structure, validate, Breakdown, StructuralError};
