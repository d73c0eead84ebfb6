//! Scenario definitions
//!
//! A scenario is immutable: it names its group and holds a builder that,
//! given fresh fixtures and the market id fetched during setup, produces the
//! request to send and the expectation to check.

use serde_json::Value;
use std::fmt;

use crate::client::{ApiResponse, Request};
use crate::fixtures::Fixtures;
use crate::matcher::{body_contains, json_like, Mismatch, MismatchReason};

/// Scenario group, mirroring the resource under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Mercado,
    Frutas,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Mercado => write!(f, "Mercado"),
            Group::Frutas => write!(f, "Frutas"),
        }
    }
}

/// Builds the concrete exchange for one invocation
pub type BuildFn = fn(&mut Fixtures, i64) -> Exchange;

/// A named, independently reported test case
#[derive(Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub group: Group,
    build: BuildFn,
}

impl Scenario {
    pub const fn new(name: &'static str, group: Group, build: BuildFn) -> Self {
        Self { name, group, build }
    }

    /// Bind fixtures and the setup id into a request and its expectation
    pub fn exchange(&self, fixtures: &mut Fixtures, mercado_id: i64) -> Exchange {
        (self.build)(fixtures, mercado_id)
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("group", &self.group)
            .finish()
    }
}

/// A fully bound request plus what the response must look like
#[derive(Debug, Clone)]
pub struct Exchange {
    pub request: Request,
    pub expect: Expectation,
}

/// Declared contract for a response
#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
    /// Exact HTTP status code
    pub status: u16,
    /// Substrings the raw body text must contain
    pub body_contains: Vec<String>,
    /// Structure the JSON body must contain
    pub json_like: Option<Value>,
}

impl Expectation {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body_contains: Vec::new(),
            json_like: None,
        }
    }

    pub fn json_like(mut self, expected: Value) -> Self {
        self.json_like = Some(expected);
        self
    }

    pub fn body_contains(mut self, needle: impl ToString) -> Self {
        self.body_contains.push(needle.to_string());
        self
    }

    /// Check status, then substrings, then structure; stop at the first miss
    pub fn verify(&self, response: &ApiResponse) -> Result<(), Mismatch> {
        let actual_status = response.status.as_u16();
        if actual_status != self.status {
            return Err(Mismatch::new(
                "$status",
                Value::from(self.status),
                Value::from(actual_status),
            ));
        }

        for needle in &self.body_contains {
            body_contains(&response.text, needle)?;
        }

        if let Some(expected) = &self.json_like {
            match &response.json {
                Some(actual) => json_like(expected, actual)?,
                None => {
                    return Err(Mismatch::new(
                        "$",
                        expected.clone(),
                        Value::String(response.text.clone()),
                    )
                    .with_reason(MismatchReason::TypeMismatch))
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    fn response(status: u16, body: Value) -> ApiResponse {
        ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            text: body.to_string(),
            json: Some(body),
        }
    }

    #[test]
    fn test_status_checked_first() {
        let expect = Expectation::status(201).json_like(json!({ "message": "ok" }));
        let err = expect.verify(&response(400, json!({}))).unwrap_err();
        assert_eq!(err.path, "$status");
        assert_eq!(err.expected, json!(201));
        assert_eq!(err.actual, json!(400));
    }

    #[test]
    fn test_body_contains_before_structure() {
        let expect = Expectation::status(201)
            .body_contains("adicionado com sucesso")
            .json_like(json!({ "product_item": { "nome": "kiwi" } }));
        let err = expect
            .verify(&response(201, json!({ "product_item": { "nome": "kiwi" } })))
            .unwrap_err();
        assert_eq!(err.reason, MismatchReason::NotContained);
    }

    #[test]
    fn test_numeric_needle_is_stringified() {
        let expect = Expectation::status(201).body_contains(42);
        assert_eq!(expect.body_contains, vec!["42".to_string()]);
        assert!(expect.verify(&response(201, json!({ "valor": 42 }))).is_ok());
    }

    #[test]
    fn test_non_json_body_fails_structure_check() {
        let expect = Expectation::status(200).json_like(json!({ "id": 1 }));
        let resp = ApiResponse {
            status: StatusCode::OK,
            text: "<html>gateway</html>".to_string(),
            json: None,
        };
        let err = expect.verify(&resp).unwrap_err();
        assert_eq!(err.reason, MismatchReason::TypeMismatch);
    }

    #[test]
    fn test_status_only_expectation_passes() {
        assert!(Expectation::status(200).verify(&response(200, json!([]))).is_ok());
    }
}
