#![allow(dead_code)]

use casematch::{Matcher, Value};

/// Build a sequence of numbers.
pub fn nums(values: &[f64]) -> Value {
    Value::sequence(values.iter().map(|&n| Value::Number(n)))
}

/// Compile and match, asserting success; returns the environment.
pub fn must_match(pattern: &str, value: &Value) -> Vec<Value> {
    let result = Matcher::compile(pattern)
        .unwrap_or_else(|e| panic!("pattern `{pattern}` failed to compile: {e}"))
        .apply(value);
    assert!(result.matched, "pattern `{pattern}` should match {value}");
    result.bindings
}

/// Compile and match, asserting a structural mismatch.
pub fn must_not_match(pattern: &str, value: &Value) {
    let result = Matcher::compile(pattern)
        .unwrap_or_else(|e| panic!("pattern `{pattern}` failed to compile: {e}"))
        .apply(value);
    assert!(!result.matched, "pattern `{pattern}` should not match {value}");
}
