mod driver;
mod summary;

pub use driver::RunDriver;
pub use summary::RunSummary;
