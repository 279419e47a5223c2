//! Response checks
//!
//! Named boolean predicates evaluated per response. Check failures are
//! recorded against the request for the end-of-run report; they never abort
//! the iteration, and body predicates never panic on malformed input.

use serde_json::Value;

/// Filters a set of named check outcomes down to the failed names, in order.
pub fn failed_checks<'a>(checks: &[(&'a str, bool)]) -> Vec<&'a str> {
    checks
        .iter()
        .filter(|(_, passed)| !passed)
        .map(|(name, _)| *name)
        .collect()
}

/// The response envelope reports `success: true`. A body that is not valid
/// JSON (or not an object) evaluates to `false` rather than erroring.
pub fn body_reports_success(body: &str) -> bool {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value["success"] == Value::Bool(true),
        Err(_) => false,
    }
}

/// The envelope reports success and carries a non-null `data` payload
pub fn body_has_data(body: &str) -> bool {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value["success"] == Value::Bool(true) && !value["data"].is_null(),
        Err(_) => false,
    }
}
