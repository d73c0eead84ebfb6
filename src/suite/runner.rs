//! Scenario runner
//!
//! Runs scenarios one after another. Each scenario gets a fresh setup fetch
//! of the first market id, so nothing carries over between scenarios. A
//! failure is recorded and the runner moves on; it never retries.

use std::time::Instant;

use tracing::{debug, info, info_span, warn, Instrument};

use super::report::{FailureKind, Outcome, Reporter, ScenarioResult, Summary};
use super::scenario::Scenario;
use crate::client::MercadoClient;
use crate::common::{Error, Result};
use crate::fixtures::Fixtures;

/// Drives scenarios against one client and reports to one reporter
pub struct Runner<R: Reporter> {
    client: MercadoClient,
    fixtures: Fixtures,
    reporter: R,
}

impl<R: Reporter> Runner<R> {
    pub fn new(client: MercadoClient, fixtures: Fixtures, reporter: R) -> Self {
        Self {
            client,
            fixtures,
            reporter,
        }
    }

    /// Run every scenario, then finalize the reporter exactly once
    ///
    /// Consumes the runner so the reporter cannot be finished twice. The
    /// returned error only covers the reporter's own finalization.
    pub async fn run(mut self, scenarios: &[Scenario]) -> Result<Summary> {
        if scenarios.is_empty() {
            return Err(Error::Config("no scenarios selected".to_string()));
        }

        let started = Instant::now();
        let mut summary = Summary::default();

        for scenario in scenarios {
            self.reporter.on_start(scenario);

            let span = info_span!("scenario", name = scenario.name, group = %scenario.group);
            let result = self.run_one(scenario).instrument(span).await;

            self.reporter.on_result(&result);
            summary.results.push(result);
        }

        summary.duration = started.elapsed();
        info!(
            passed = summary.passed(),
            failed = summary.failed(),
            "suite finished"
        );

        self.reporter.finish(&summary)?;
        Ok(summary)
    }

    async fn run_one(&mut self, scenario: &Scenario) -> ScenarioResult {
        let started = Instant::now();
        let (mercado_id, outcome) = match self.client.first_mercado_id().await {
            Ok(id) => {
                debug!(mercado_id = id, "setup complete");
                (Some(id), self.act_and_assert(scenario, id).await)
            }
            Err(e) => {
                warn!(error = %e, "setup failed");
                (None, failed(FailureKind::Setup, &e))
            }
        };

        ScenarioResult {
            name: scenario.name.to_string(),
            group: scenario.group,
            mercado_id,
            outcome,
            duration: started.elapsed(),
        }
    }

    async fn act_and_assert(&mut self, scenario: &Scenario, mercado_id: i64) -> Outcome {
        let exchange = scenario.exchange(&mut self.fixtures, mercado_id);
        debug!(
            method = %exchange.request.method,
            path = %exchange.request.path,
            "sending request"
        );

        let response = match self.client.send(&exchange.request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "request failed");
                return failed(FailureKind::Transport, &e);
            }
        };

        match exchange.expect.verify(&response) {
            Ok(()) => Outcome::Passed,
            Err(mismatch) => {
                debug!(body = %response.text, "response body");
                failed(FailureKind::Expectation, &Error::from(mismatch))
            }
        }
    }
}

fn failed(kind: FailureKind, err: &Error) -> Outcome {
    Outcome::Failed {
        kind,
        message: err.to_string(),
    }
}
