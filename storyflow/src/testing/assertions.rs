//! Test assertions for run results.

use crate::pipeline::RunResult;

/// Asserts that no step aborted.
pub fn assert_success(result: &RunResult) {
    assert!(
        result.is_success(),
        "Expected success, got failure at step {:?}",
        result.failed_step()
    );
}

/// Asserts that a step aborted.
pub fn assert_failure(result: &RunResult) {
    assert!(result.is_failure(), "Expected failure, got {result}");
}

/// Asserts that the call succeeded with `expected` as its value.
pub fn assert_value(result: &RunResult, expected: Option<&serde_json::Value>) {
    match result.value() {
        Ok(actual) => assert_eq!(
            actual, expected,
            "Expected value {expected:?}, got {actual:?}"
        ),
        Err(err) => panic!("Expected value {expected:?}, got error: {err}"),
    }
}

/// Asserts that the call failed at `step`.
pub fn assert_failed_on(result: &RunResult, step: &str) {
    assert!(
        result.failed_on(step),
        "Expected failure at step '{step}', got {result}"
    );
}

/// Asserts that the final context equals the JSON object `expected`.
pub fn assert_context(result: &RunResult, expected: &serde_json::Value) {
    let actual = result.context().to_json();
    assert_eq!(
        &actual, expected,
        "Expected context {expected}, got {actual}"
    );
}
