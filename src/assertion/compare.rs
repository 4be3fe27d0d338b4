use crate::invoker::{InvocationResult, Outcome};

use super::expectation::{display_pointer, locate, Verdict};

/// Compares the value at `at` across two results; passes only when both
/// exist and differ.
pub fn values_differ(first: &InvocationResult, second: &InvocationResult, at: &str) -> Verdict {
    let (first_body, second_body) = match (&first.outcome, &second.outcome) {
        (Outcome::Completed { body: a, .. }, Outcome::Completed { body: b, .. }) => (a, b),
        (a, b) => {
            return Verdict::fail(format!(
                "values-differ needs two responses, got {} and {}",
                a.kind(),
                b.kind()
            ))
        }
    };

    let first_value = match locate(first_body, at) {
        Ok(value) => value,
        Err(message) => return Verdict::fail(format!("first response: {message}")),
    };
    let second_value = match locate(second_body, at) {
        Ok(value) => value,
        Err(message) => return Verdict::fail(format!("second response: {message}")),
    };

    if first_value == second_value {
        Verdict::fail(format!(
            "expected {} to differ, both responses returned {first_value}",
            display_pointer(at)
        ))
    } else {
        Verdict::pass(format!(
            "{} differs: {first_value} vs {second_value}",
            display_pointer(at)
        ))
    }
}
