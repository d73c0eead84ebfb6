//! CLI command handling
//!
//! Builds the client, fixtures and reporters from configuration and hands
//! the selected scenarios to the runner.

use colored::Colorize;

use crate::client::MercadoClient;
use crate::commands::{Commands, RunArgs};
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::fixtures::Fixtures;
use crate::suite::{self, ConsoleReporter, JsonReporter, Reporters, Runner};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run(args).await,
        Commands::List => {
            for scenario in suite::catalog() {
                println!(
                    "{:<8} {}",
                    scenario.group.to_string().cyan(),
                    scenario.name
                );
            }
            Ok(())
        }
    }
}

async fn run(args: RunArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let config = apply_overrides(config, &args)?;

    let scenarios = suite::select(suite::catalog(), args.filter.as_deref());
    if scenarios.is_empty() {
        return Err(Error::Config(format!(
            "No scenario matches filter '{}'",
            args.filter.unwrap_or_default()
        )));
    }

    tracing::info!(
        base_url = %config.api.base_url,
        timeout_secs = config.api.timeout_secs,
        scenarios = scenarios.len(),
        "starting contract suite"
    );

    let client = MercadoClient::new(&config.api)?;
    let fixtures = Fixtures::from_seed(config.fixtures.seed);

    let mut reporters = Reporters::new().with(ConsoleReporter::new());
    if let Some(path) = config.report.json_path {
        reporters = reporters.with(JsonReporter::new(path));
    }

    let summary = Runner::new(client, fixtures, reporters)
        .run(&scenarios)
        .await?;

    if summary.all_passed() {
        Ok(())
    } else {
        Err(Error::SuiteFailed {
            failed: summary.failed(),
            total: summary.total(),
        })
    }
}

/// Command-line flags win over the config file
fn apply_overrides(mut config: Config, args: &RunArgs) -> Result<Config> {
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.api.timeout_secs = timeout;
    }
    if args.seed.is_some() {
        config.fixtures.seed = args.seed;
    }
    if args.report.is_some() {
        config.report.json_path = args.report.clone();
    }
    config.validate()?;
    Ok(config)
}
