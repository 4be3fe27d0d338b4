mod models;
mod runner;

pub use models::{BasicAuth, InvocationRequest, InvocationResult, Outcome, ResponseBody};
pub use runner::Invoker;
