//! Run tally and final verdict

use serde::Serialize;

use super::scenario::Step;

/// Executed vs. passed test counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTally {
    pub tests_run: usize,
    pub tests_passed: usize,
}

impl RunTally {
    /// Count one executed test
    pub fn record(&mut self, passed: bool) {
        self.tests_run += 1;
        if passed {
            self.tests_passed += 1;
        }
    }

    pub fn failed(&self) -> usize {
        self.tests_run - self.tests_passed
    }

    pub fn all_passed(&self) -> bool {
        self.tests_passed == self.tests_run
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    Failed { failed: usize },
    /// A gating step failed and the rest of the sequence was skipped
    Halted { step: Step, failed: usize },
}

impl Verdict {
    pub fn from_tally(tally: &RunTally, halted_at: Option<Step>) -> Self {
        match halted_at {
            Some(step) => Verdict::Halted {
                step,
                failed: tally.failed(),
            },
            None if tally.all_passed() => Verdict::Passed,
            None => Verdict::Failed {
                failed: tally.failed(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    /// Process exit status: 0 only when every executed test passed
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
