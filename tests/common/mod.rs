// Shared test helpers for integration tests
#![allow(dead_code)]

use anyhow::{Result, bail};
use pr_check::core::execution::CheckEnvironment;
use pr_check::core::models::{Step, StepOutcome};
use pr_check::core::targets::BuildTargets;
use pr_check::core::timer::RunTimer;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Every step, in declaration order, with its config key.
pub const STEP_KEYS: [(Step, &str); 9] = [
    (Step::DownloadArtifact, "download_artifact"),
    (Step::UpdatePackages, "update_packages"),
    (Step::IntegrationReport, "integration_report"),
    (Step::UnitReport, "unit_report"),
    (Step::CoverageUpload, "coverage_upload"),
    (Step::ReportUpload, "report_upload"),
    (Step::UnitLocalChanges, "unit_local_changes"),
    (Step::IntegrationCoverage, "integration_coverage"),
    (Step::UnitCoverage, "unit_coverage"),
];

/// The marker a step's default test command prints.
pub fn marker(step: Step) -> String {
    format!("STEP-{}", step.name())
}

/// Writes a `PrCheck.toml` into `dir` where every step echoes its marker,
/// except for the steps listed in `overrides`.
///
/// `extra` is appended verbatim to the `[commands]` table.
pub fn write_marker_config(dir: &Path, overrides: &[(Step, &str)], extra: &str) -> PathBuf {
    let mut content = String::from("language = \"en\"\njob_name = \"test-job\"\n\n[commands]\n");
    for (step, key) in STEP_KEYS {
        let command = overrides
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, c)| c.to_string())
            .unwrap_or_else(|| format!("echo {}", marker(step)));
        content.push_str(&format!("{key} = {}\n", toml_string(&command)));
    }
    content.push_str("change_summary = \"echo CHANGE-SUMMARY\"\n");
    content.push_str(extra);

    let path = dir.join("PrCheck.toml");
    fs::write(&path, content).expect("Failed to write PrCheck.toml");
    path
}

/// A shell command that prints the step marker and exits with `code`.
pub fn failing(step: Step, code: i32) -> String {
    format!("sh -c \"echo {}; exit {code}\"", marker(step))
}

fn toml_string(value: &str) -> String {
    format!("'{value}'")
}

/// Asserts that `markers` appear in `output` in the given order.
pub fn assert_in_order(output: &str, markers: &[String]) {
    let mut last = 0;
    for m in markers {
        let pos = output[last..]
            .find(m.as_str())
            .unwrap_or_else(|| panic!("marker {m} not found in order in:\n{output}"));
        last += pos + m.len();
    }
}

/// A recording stand-in for the real process environment.
#[derive(Default)]
pub struct FakeEnvironment {
    /// Steps that fail, with their exit codes.
    pub failures: HashMap<Step, i32>,
    /// A step whose invocation returns an environment error.
    pub broken_step: Option<Step>,
    pub targets: BuildTargets,
    pub targets_error: bool,
    pub calls: Vec<Step>,
    pub summaries_printed: usize,
    pub targets_queried: usize,
    pub timer_starts: usize,
    pub timer_stops: usize,
}

impl FakeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_targets(labels: &[&str]) -> Self {
        Self {
            targets: BuildTargets::new(labels),
            ..Self::default()
        }
    }

    pub fn failing(mut self, step: Step, code: i32) -> Self {
        self.failures.insert(step, code);
        self
    }
}

impl CheckEnvironment for FakeEnvironment {
    async fn run_step(&mut self, step: Step) -> Result<StepOutcome> {
        self.calls.push(step);
        if self.broken_step == Some(step) {
            bail!("environment broke while running {step}");
        }
        Ok(self
            .failures
            .get(&step)
            .map(|code| StepOutcome::failed(*code))
            .unwrap_or(StepOutcome::Passed))
    }

    async fn print_change_summary(&mut self) -> Result<()> {
        self.summaries_printed += 1;
        Ok(())
    }

    async fn build_targets(&mut self) -> Result<BuildTargets> {
        self.targets_queried += 1;
        if self.targets_error {
            bail!("classifier unavailable");
        }
        Ok(self.targets.clone())
    }

    fn timer_started(&mut self, _timer: &RunTimer) {
        self.timer_starts += 1;
    }

    fn timer_stopped(&mut self, _label: &str, _elapsed: Duration) {
        self.timer_stops += 1;
    }
}
