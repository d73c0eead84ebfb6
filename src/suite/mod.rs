//! Contract suite for the mercado API
//!
//! Scenarios are declared in `catalog`, executed by `runner` and recorded by
//! the sinks in `report`.

mod catalog;
mod report;
mod runner;
mod scenario;

pub use catalog::{catalog, select, CNPJ_LENGTH_MSG, NEGATIVE_VALUE_MSG};
pub use report::{
    ConsoleReporter, FailureKind, JsonReporter, Outcome, Reporter, Reporters, ScenarioResult,
    Summary,
};
pub use runner::Runner;
pub use scenario::{BuildFn, Exchange, Expectation, Group, Scenario};
