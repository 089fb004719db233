//! CLI command handling
//!
//! Dispatches CLI commands to the test engine and maps outcomes to exit codes.

use std::path::Path;

use crate::commands::{Commands, RunArgs};
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::http::ReqwestTransport;
use crate::testing::{
    report_structure, Breakdown, Console, Payload, ScenarioRunner, TestRecorder,
};

/// Dispatch a CLI command, returning the process exit code
pub async fn dispatch(command: Commands) -> Result<i32> {
    match command {
        Commands::Run(args) => run(args).await,
        Commands::Validate { path } => validate_file(&path),
    }
}

async fn run(args: RunArgs) -> Result<i32> {
    let config = Config::load(args.config.as_deref())?.with_overrides(args.base_url, args.timeout)?;

    let transport = ReqwestTransport::new(config.api.timeout_secs)?;
    let recorder = TestRecorder::new(transport, &config.api.base_url, Console::new(args.json));
    let mut runner = ScenarioRunner::new(recorder, config.scenario);

    let report = runner.run().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(report.exit_code())
}

/// Exit 1 on a structural failure; read and parse errors propagate
fn validate_file(path: &Path) -> Result<i32> {
    match check_file(path) {
        Ok(_) => Ok(0),
        Err(e @ Error::StructuralInvalid(_)) => {
            tracing::debug!(
                path = %path.display(),
                code = e.code(),
                error = %e,
                "file failed validation"
            );
            Ok(1)
        }
        Err(e) => Err(e),
    }
}

fn check_file(path: &Path) -> Result<Breakdown> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    let payload = match value {
        serde_json::Value::Array(items) => Payload::List(items),
        serde_json::Value::Object(map) => Payload::Map(map),
        other => Payload::RawText(other.to_string()),
    };

    Ok(report_structure(&payload, &Console::default())?)
}
