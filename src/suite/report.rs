//! Reporting sinks
//!
//! The runner feeds every reporter the same stream of events and calls
//! `finish` once at the end of the suite.

use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use super::scenario::{Group, Scenario};
use crate::common::{Error, Result};

/// Why a scenario failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The `GET /mercado` baseline fetch failed
    Setup,
    /// The request timed out or the network failed
    Transport,
    /// Status or body did not match the declared contract
    Expectation,
}

/// Outcome of a single scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed { kind: FailureKind, message: String },
}

/// Result of one scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub group: Group,
    /// Market id fetched during setup, absent when setup failed
    pub mercado_id: Option<i64>,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed)
    }
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Aggregate of a whole suite run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub results: Vec<ScenarioResult>,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Sink for scenario events
pub trait Reporter {
    /// Called before a scenario's setup runs
    fn on_start(&mut self, _scenario: &Scenario) {}

    /// Called once per scenario with its result
    fn on_result(&mut self, result: &ScenarioResult);

    /// Called once after the last scenario
    fn finish(&mut self, summary: &Summary) -> Result<()>;
}

/// Colored console output on stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    current_group: Option<Group>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ConsoleReporter {
    fn on_start(&mut self, scenario: &Scenario) {
        if self.current_group != Some(scenario.group) {
            println!("\n{}", scenario.group.to_string().cyan().bold());
            self.current_group = Some(scenario.group);
        }
    }

    fn on_result(&mut self, result: &ScenarioResult) {
        let elapsed = format!("({} ms)", result.duration.as_millis());
        match &result.outcome {
            Outcome::Passed => {
                println!("  {} {} {}", "✓".green(), result.name, elapsed.dimmed());
            }
            Outcome::Failed { kind, message } => {
                println!("  {} {} {}", "✗".red(), result.name, elapsed.dimmed());
                println!("      {} {}", format!("[{:?}]", kind).yellow(), message);
            }
        }
    }

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        let tally = format!(
            "{} passed, {} failed, {} total in {:.1}s",
            summary.passed(),
            summary.failed(),
            summary.total(),
            summary.duration.as_secs_f64()
        );
        if summary.all_passed() {
            println!("\n{} {}\n", "✓".green().bold(), tally.green().bold());
        } else {
            println!("\n{} {}\n", "✗".red().bold(), tally.red().bold());
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    total: usize,
    passed: usize,
    failed: usize,
    #[serde(flatten)]
    summary: &'a Summary,
}

/// Writes the full summary as JSON when the suite finishes
#[derive(Debug)]
pub struct JsonReporter {
    path: PathBuf,
}

impl JsonReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Reporter for JsonReporter {
    fn on_result(&mut self, _result: &ScenarioResult) {}

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        let report = JsonReport {
            total: summary.total(),
            passed: summary.passed(),
            failed: summary.failed(),
            summary,
        };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(&report)?;
        std::fs::write(&self.path, content).map_err(|e| Error::FileWrite {
            path: self.path.display().to_string(),
            error: e.to_string(),
        })?;
        tracing::info!(path = %self.path.display(), "JSON report written");
        Ok(())
    }
}

/// Fan-out over several reporters
#[derive(Default)]
pub struct Reporters {
    sinks: Vec<Box<dyn Reporter + Send>>,
}

impl Reporters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reporter: impl Reporter + Send + 'static) -> Self {
        self.sinks.push(Box::new(reporter));
        self
    }
}

impl Reporter for Reporters {
    fn on_start(&mut self, scenario: &Scenario) {
        for sink in &mut self.sinks {
            sink.on_start(scenario);
        }
    }

    fn on_result(&mut self, result: &ScenarioResult) {
        for sink in &mut self.sinks {
            sink.on_result(result);
        }
    }

    /// Every sink is finished even if an earlier one fails; the first error wins.
    fn finish(&mut self, summary: &Summary) -> Result<()> {
        let mut first_err = None;
        for sink in &mut self.sinks {
            if let Err(e) = sink.finish(summary) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, outcome: Outcome) -> ScenarioResult {
        ScenarioResult {
            name: name.to_string(),
            group: Group::Mercado,
            mercado_id: Some(3),
            outcome,
            duration: Duration::from_millis(120),
        }
    }

    fn sample_summary() -> Summary {
        Summary {
            results: vec![
                result("passes", Outcome::Passed),
                result(
                    "fails",
                    Outcome::Failed {
                        kind: FailureKind::Expectation,
                        message: "$status: expected 201, got 400".to_string(),
                    },
                ),
            ],
            duration: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_summary_tally() {
        let summary = sample_summary();
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.passed(), 1);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.all_passed());
        assert!(Summary::default().all_passed());
    }

    #[test]
    fn test_json_reporter_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("mercado.json");
        let mut reporter = JsonReporter::new(&path);
        reporter.finish(&sample_summary()).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["total"], 2);
        assert_eq!(written["passed"], 1);
        assert_eq!(written["failed"], 1);
        assert_eq!(written["duration_ms"], 2000);
        assert_eq!(written["results"][0]["outcome"], "passed");
        assert_eq!(written["results"][1]["outcome"], "failed");
        assert_eq!(written["results"][1]["kind"], "expectation");
        assert_eq!(written["results"][1]["group"], "mercado");
        assert_eq!(written["results"][1]["duration_ms"], 120);
    }

    #[test]
    fn test_json_reporter_write_failure_is_file_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // The target path is an existing directory, so the write fails.
        let mut reporter = JsonReporter::new(dir.path());
        let err = reporter.finish(&sample_summary()).unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }), "unexpected error: {err}");
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    struct Failing;

    impl Reporter for Failing {
        fn on_result(&mut self, _result: &ScenarioResult) {}
        fn finish(&mut self, _summary: &Summary) -> Result<()> {
            Err(Error::Config("sink unavailable".to_string()))
        }
    }

    #[test]
    fn test_fan_out_finishes_every_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("after-failure.json");
        let mut reporters = Reporters::new()
            .with(Failing)
            .with(JsonReporter::new(&path));

        let err = reporters.finish(&sample_summary()).unwrap_err();
        assert!(err.to_string().contains("sink unavailable"));
        assert!(path.exists(), "later sinks still run after a failure");
    }
}
