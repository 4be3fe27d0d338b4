mod compare;
mod expectation;

pub use compare::values_differ;
pub use expectation::{Expectation, Shape, Verdict};
