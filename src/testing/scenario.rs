//! Scenario sequencer
//!
//! Runs the fixed CrisisMap check sequence. The root check and the seed
//! step gate the run; every other step is independent so a single pass
//! reports as many problems as possible.

use serde::Serialize;
use std::fmt;

use crate::common::config::ScenarioConfig;
use crate::http::Transport;

use super::disaster::DisasterType;
use super::payload::Payload;
use super::recorder::{CallRecord, TestCall, TestRecorder};
use super::tally::{RunTally, Verdict};
use super::validator::{report_structure, Breakdown};

/// Named steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    RootCheck,
    ListPreSeed,
    Seed,
    ListPostSeed,
    FilteredList,
    Summary,
    MapsConfig,
    Sync,
}

impl Step {
    /// Execution order
    pub const SEQUENCE: [Step; 8] = [
        Step::RootCheck,
        Step::ListPreSeed,
        Step::Seed,
        Step::ListPostSeed,
        Step::FilteredList,
        Step::Summary,
        Step::MapsConfig,
        Step::Sync,
    ];

    /// Whether a failure of this step halts the run
    pub fn is_gating(&self) -> bool {
        self.halt_message().is_some()
    }

    /// Operator message printed when this step stops the run
    fn halt_message(&self) -> Option<&'static str> {
        match self {
            Step::RootCheck => Some("Root endpoint failed - API may be down"),
            Step::Seed => Some("Failed to initialize mock data"),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::RootCheck => "root check",
            Step::ListPreSeed => "list (pre-seed)",
            Step::Seed => "seed",
            Step::ListPostSeed => "list (post-seed)",
            Step::FilteredList => "filtered list",
            Step::Summary => "summary",
            Step::MapsConfig => "maps configuration",
            Step::Sync => "sync",
        };
        f.write_str(name)
    }
}

/// Step-level verdict
///
/// A step may fold shape or structure checks into `passed`; the run tally
/// only ever counts the underlying calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub passed: bool,
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Breakdown>,
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub tally: RunTally,
    pub verdict: Verdict,
    pub steps: Vec<StepReport>,
    pub calls: Vec<CallRecord>,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        self.verdict.exit_code()
    }

    pub fn step(&self, step: Step) -> Option<&StepReport> {
        self.steps.iter().find(|r| r.step == step)
    }
}

/// The sync endpoint only ever imports earthquakes
const SYNC_ENDPOINT: &str = "disasters/sync-earthquakes";
const SYNCED_TYPE: DisasterType = DisasterType::Earthquake;

fn plural_label(disaster_type: DisasterType) -> &'static str {
    match disaster_type {
        DisasterType::Earthquake => "Earthquakes",
        DisasterType::Wildfire => "Wildfires",
        DisasterType::Flood => "Floods",
        DisasterType::Tornado => "Tornadoes",
        DisasterType::AirQuality => "Air Quality Alerts",
    }
}

/// Drives one pass of the sequence over a recorder
pub struct ScenarioRunner<T> {
    recorder: TestRecorder<T>,
    options: ScenarioConfig,
    steps: Vec<StepReport>,
}

impl<T: Transport> ScenarioRunner<T> {
    pub fn new(recorder: TestRecorder<T>, options: ScenarioConfig) -> Self {
        Self {
            recorder,
            options,
            steps: Vec::new(),
        }
    }

    pub fn recorder(&self) -> &TestRecorder<T> {
        &self.recorder
    }

    /// Run the whole sequence and derive the verdict
    pub async fn run(&mut self) -> RunReport {
        let console = self.recorder.console();
        console.banner("CrisisMap Multi-Disaster Tracker API Testing");
        tracing::info!(api = %self.recorder.url_for(""), "starting scenario");

        let halted_at = self.run_steps().await;
        if let Some(step) = halted_at {
            tracing::info!(%step, "gating step failed, halting run");
        }

        let tally = self.recorder.tally();
        let verdict = Verdict::from_tally(&tally, halted_at);

        console.rule();
        console.note(&format!(
            "FINAL RESULTS: {}/{} tests passed",
            tally.tests_passed, tally.tests_run
        ));
        match verdict {
            Verdict::Passed => console.pass("ALL TESTS PASSED! Backend API is working correctly."),
            Verdict::Failed { failed } => {
                console.warn(&format!("{} test(s) failed. Check the issues above.", failed))
            }
            Verdict::Halted { step, failed } => console.fail(&format!(
                "Run halted at {}; {} test(s) failed",
                step, failed
            )),
        }

        tracing::info!(
            run = tally.tests_run,
            passed = tally.tests_passed,
            "scenario finished"
        );

        RunReport {
            tally,
            verdict,
            steps: self.steps.clone(),
            calls: self.recorder.calls().to_vec(),
        }
    }

    /// Returns the gating step that stopped the run, if any
    async fn run_steps(&mut self) -> Option<Step> {
        for step in Step::SEQUENCE {
            if !self.run_step(step).await {
                if let Some(message) = step.halt_message() {
                    self.recorder.console().fail(message);
                    return Some(step);
                }
            }
        }
        None
    }

    async fn run_step(&mut self, step: Step) -> bool {
        match step {
            Step::RootCheck => self.root_check().await,
            Step::ListPreSeed => self.list_pre_seed().await,
            Step::Seed => self.seed().await,
            Step::ListPostSeed => self.list_post_seed().await,
            Step::FilteredList => self.filtered_list().await,
            Step::Summary => self.summary().await,
            Step::MapsConfig => self.maps_config().await,
            Step::Sync => self.sync().await,
        }
    }

    fn finish_step(
        &mut self,
        step: Step,
        passed: bool,
        notes: Vec<String>,
        breakdown: Option<Breakdown>,
    ) -> bool {
        self.steps.push(StepReport {
            step,
            passed,
            notes,
            breakdown,
        });
        passed
    }

    async fn root_check(&mut self) -> bool {
        let outcome = self
            .recorder
            .run_test(TestCall::get("Root API Endpoint", ""))
            .await;
        self.finish_step(Step::RootCheck, outcome.success, Vec::new(), None)
    }

    async fn list_pre_seed(&mut self) -> bool {
        let outcome = self
            .recorder
            .run_test(TestCall::get("Get All Disasters", "disasters"))
            .await;
        if !outcome.success {
            return self.finish_step(Step::ListPreSeed, false, Vec::new(), None);
        }

        // informational only: the list may legitimately be empty or stale here
        let console = self.recorder.console();
        match report_structure(&outcome.payload, &console) {
            Ok(breakdown) => self.finish_step(Step::ListPreSeed, true, Vec::new(), Some(breakdown)),
            Err(e) => self.finish_step(
                Step::ListPreSeed,
                true,
                vec![format!("structure invalid before seeding: {}", e)],
                None,
            ),
        }
    }

    async fn seed(&mut self) -> bool {
        let outcome = self
            .recorder
            .run_test(TestCall::post("Initialize Mock Data", "disasters/initialize"))
            .await;
        self.finish_step(Step::Seed, outcome.success, Vec::new(), None)
    }

    async fn list_post_seed(&mut self) -> bool {
        let outcome = self
            .recorder
            .run_test(TestCall::get("Get All Disasters", "disasters"))
            .await;
        if !outcome.success {
            return self.finish_step(Step::ListPostSeed, false, Vec::new(), None);
        }

        let console = self.recorder.console();
        match report_structure(&outcome.payload, &console) {
            Ok(breakdown) => {
                console.pass("Mock data initialization successful");
                self.finish_step(Step::ListPostSeed, true, Vec::new(), Some(breakdown))
            }
            Err(e) => {
                console.fail("Mock data structure validation failed");
                self.finish_step(Step::ListPostSeed, false, vec![e.to_string()], None)
            }
        }
    }

    async fn filtered_list(&mut self) -> bool {
        let mut all_passed = true;
        let mut notes = Vec::new();

        for disaster_type in self.options.filter_types.clone() {
            let call = TestCall::get(format!("Get {} Only", plural_label(disaster_type)), "disasters")
                .query("disaster_type", disaster_type.as_str());
            let outcome = self.recorder.run_test(call).await;
            all_passed &= outcome.success;

            match (outcome.success, &outcome.payload) {
                (true, Payload::List(items)) => {
                    notes.push(format!("{}: {} records", disaster_type, items.len()))
                }
                (true, _) => notes.push(format!("{}: non-list response", disaster_type)),
                (false, _) => notes.push(format!("{}: failed", disaster_type)),
            }
        }

        if all_passed {
            self.recorder.console().pass("Disaster filtering by type works");
        }
        self.finish_step(Step::FilteredList, all_passed, notes, None)
    }

    async fn summary(&mut self) -> bool {
        let outcome = self
            .recorder
            .run_test(TestCall::get("Get Disaster Summary", "disasters/summary"))
            .await;
        let console = self.recorder.console();

        match (outcome.success, &outcome.payload) {
            (true, Payload::Map(_)) => {
                console.pass("Disaster summary endpoint works");
                self.finish_step(Step::Summary, true, Vec::new(), None)
            }
            (true, _) => {
                console.warn("Disaster summary response is not a mapping");
                self.finish_step(
                    Step::Summary,
                    false,
                    vec!["response is not a mapping".to_string()],
                    None,
                )
            }
            (false, _) => self.finish_step(Step::Summary, false, Vec::new(), None),
        }
    }

    async fn maps_config(&mut self) -> bool {
        let outcome = self
            .recorder
            .run_test(TestCall::get("Get Maps Config", "maps/config"))
            .await;
        let console = self.recorder.console();
        let key_field = self.options.maps_key_field.clone();

        match (outcome.success, &outcome.payload) {
            (true, Payload::Map(config)) => {
                let note = if config.contains_key(&key_field) {
                    console.pass("Maps configuration available");
                    format!("{} present", key_field)
                } else {
                    console.warn("Maps API key not found in config");
                    format!("{} absent", key_field)
                };
                self.finish_step(Step::MapsConfig, true, vec![note], None)
            }
            (true, _) => {
                console.warn("Maps config response is not a mapping");
                self.finish_step(
                    Step::MapsConfig,
                    false,
                    vec!["response is not a mapping".to_string()],
                    None,
                )
            }
            (false, _) => self.finish_step(Step::MapsConfig, false, Vec::new(), None),
        }
    }

    async fn sync(&mut self) -> bool {
        let console = self.recorder.console();
        let source = self.options.sync_source.clone();
        let label = plural_label(SYNCED_TYPE);

        console.note(&format!(
            "Testing {} data sync (may take 10-15 seconds)...",
            source
        ));
        let outcome = self
            .recorder
            .run_test(TestCall::post(
                format!("Sync {} Earthquake Data", source),
                SYNC_ENDPOINT,
            ))
            .await;
        if !outcome.success {
            console.fail(&format!("{} sync failed", source));
            return self.finish_step(Step::Sync, false, Vec::new(), None);
        }
        console.pass(&format!("{} sync successful", source));

        let verify = self
            .recorder
            .run_test(
                TestCall::get(format!("Verify Synced {}", label), "disasters")
                    .query("disaster_type", SYNCED_TYPE.as_str()),
            )
            .await;

        match (verify.success, &verify.payload) {
            (true, Payload::List(records)) => {
                let from_source = records
                    .iter()
                    .filter(|r| r.get("source").and_then(|s| s.as_str()) == Some(source.as_str()))
                    .count();
                console.pass(&format!(
                    "Found {} {} after sync",
                    records.len(),
                    label.to_lowercase()
                ));
                console.note(&format!(
                    "{} {} from {} source",
                    from_source,
                    label.to_lowercase(),
                    source
                ));
                self.finish_step(
                    Step::Sync,
                    true,
                    vec![
                        format!("{} records after sync", records.len()),
                        format!("{} from {}", from_source, source),
                    ],
                    None,
                )
            }
            (true, _) => self.finish_step(
                Step::Sync,
                false,
                vec!["verification response is not a list".to_string()],
                None,
            ),
            (false, _) => self.finish_step(Step::Sync, false, Vec::new(), None),
        }
    }
}
