//! Error types for the contract suite
//!
//! Every failure a scenario can hit maps to one variant here. The runner
//! classifies them into setup, transport and expectation failures when it
//! records a result, so none of them ever aborts the suite.

use std::io;
use std::time::Duration;
use thiserror::Error;

use crate::matcher::Mismatch;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the contract suite
#[derive(Error, Debug)]
pub enum Error {
    // === Scenario Errors ===
    #[error("Setup failed: {reason}")]
    Setup { reason: String },

    #[error("Request to {url} timed out after {} seconds", .timeout.as_secs())]
    Timeout { url: String, timeout: Duration },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Expectation not met: {0}")]
    Assertion(Mismatch),

    #[error("{failed} of {total} scenarios failed")]
    SuiteFailed { failed: usize, total: usize },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write file '{path}': {error}")]
    FileWrite { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a setup error
    pub fn setup<S: Into<String>>(reason: S) -> Self {
        Self::Setup {
            reason: reason.into(),
        }
    }
}

impl From<Mismatch> for Error {
    fn from(m: Mismatch) -> Self {
        Self::Assertion(m)
    }
}
