//! Mercado contract suite
//!
//! End-to-end contract tests for the mercado grocery-store management API
//! and its nested frutas product category.

pub mod cli;
pub mod client;
pub mod commands;
pub mod common;
pub mod fixtures;
pub mod matcher;
pub mod suite;

// Re-export commonly used types for tests
pub use client::{ApiResponse, MercadoClient, Request};
pub use common::{Error, Result};
