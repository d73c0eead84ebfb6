//! Structural containment matching for response bodies
//!
//! `json_like` succeeds when the actual document includes everything the
//! expected document names. Objects may carry extra keys, arrays may carry
//! extra elements and expected array elements may appear in any order.

use serde_json::Value;
use std::fmt;

/// A single unmet expectation, located by a JSON path
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    /// Location of the mismatch, e.g. `$.errors[0].msg`
    pub path: String,
    /// What the scenario expected at `path`
    pub expected: Value,
    /// What the response held at `path` (`null` when absent)
    pub actual: Value,
    /// Short description of the kind of mismatch
    pub reason: MismatchReason,
}

/// Kind of mismatch found while matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchReason {
    /// Values differ
    NotEqual,
    /// Expected key is absent from an object
    MissingKey,
    /// Expected and actual have different JSON types
    TypeMismatch,
    /// No remaining array element matches the expected one
    NoMatchingElement,
    /// Body text does not contain the expected substring
    NotContained,
}

impl Mismatch {
    pub fn new(path: impl Into<String>, expected: Value, actual: Value) -> Self {
        Self {
            path: path.into(),
            expected,
            actual,
            reason: MismatchReason::NotEqual,
        }
    }

    pub fn with_reason(mut self, reason: MismatchReason) -> Self {
        self.reason = reason;
        self
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            MismatchReason::MissingKey => {
                write!(f, "{}: missing, expected {}", self.path, self.expected)
            }
            MismatchReason::NoMatchingElement => write!(
                f,
                "{}: no element matching {} in {}",
                self.path, self.expected, self.actual
            ),
            MismatchReason::NotContained => write!(
                f,
                "{}: body does not contain {}",
                self.path, self.expected
            ),
            MismatchReason::TypeMismatch | MismatchReason::NotEqual => write!(
                f,
                "{}: expected {}, got {}",
                self.path, self.expected, self.actual
            ),
        }
    }
}

/// Check that `actual` structurally contains `expected`
pub fn json_like(expected: &Value, actual: &Value) -> Result<(), Mismatch> {
    match_at("$", expected, actual)
}

/// Check that the raw body text contains `needle`
pub fn body_contains(body: &str, needle: &str) -> Result<(), Mismatch> {
    if body.contains(needle) {
        Ok(())
    } else {
        Err(Mismatch::new(
            "$body",
            Value::String(needle.to_string()),
            Value::String(body.to_string()),
        )
        .with_reason(MismatchReason::NotContained))
    }
}

fn match_at(path: &str, expected: &Value, actual: &Value) -> Result<(), Mismatch> {
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            for (key, exp_value) in exp {
                let child = format!("{}.{}", path, key);
                match act.get(key) {
                    Some(act_value) => match_at(&child, exp_value, act_value)?,
                    None => {
                        return Err(Mismatch::new(child, exp_value.clone(), Value::Null)
                            .with_reason(MismatchReason::MissingKey))
                    }
                }
            }
            Ok(())
        }
        (Value::Array(exp), Value::Array(act)) => match_array(path, exp, act),
        (Value::Number(e), Value::Number(a)) => {
            let equal = match (e.as_i64(), a.as_i64()) {
                (Some(e), Some(a)) => e == a,
                _ => e.as_f64() == a.as_f64(),
            };
            if equal {
                Ok(())
            } else {
                Err(Mismatch::new(path, expected.clone(), actual.clone()))
            }
        }
        (Value::Object(_), _) | (Value::Array(_), _) => Err(Mismatch::new(
            path,
            expected.clone(),
            actual.clone(),
        )
        .with_reason(MismatchReason::TypeMismatch)),
        _ if expected == actual => Ok(()),
        _ => Err(Mismatch::new(path, expected.clone(), actual.clone())),
    }
}

/// Each expected element must claim a distinct actual element.
fn match_array(path: &str, expected: &[Value], actual: &[Value]) -> Result<(), Mismatch> {
    let mut claimed = vec![false; actual.len()];

    for (i, exp_item) in expected.iter().enumerate() {
        let found = actual.iter().enumerate().find(|(j, act_item)| {
            !claimed[*j] && match_at(path, exp_item, act_item).is_ok()
        });

        match found {
            Some((j, _)) => claimed[j] = true,
            None => {
                return Err(Mismatch::new(
                    format!("{}[{}]", path, i),
                    exp_item.clone(),
                    Value::Array(actual.to_vec()),
                )
                .with_reason(MismatchReason::NoMatchingElement))
            }
        }
    }
    Ok(())
}
