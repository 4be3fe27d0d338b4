pub mod assertion;
pub mod catalog;
pub mod config;
pub mod error;
pub mod invoker;
pub mod logging;
pub mod report;
pub mod runner;

pub use error::{HarnessError, Result};
